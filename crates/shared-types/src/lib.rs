use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sermon struct matching database column order exactly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Sermon {
    pub id: Uuid,
    pub church_id: Option<Uuid>,
    pub series_id: Option<Uuid>,
    pub title: Option<String>,
    pub theme: Option<String>,
    /// Calendar date used for all-day scheduling when no start time exists.
    pub date: Option<NaiveDate>,
    /// Explicit start instant; takes precedence over `date` when present.
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// Scripture references in presentation order, e.g. "John 3:16".
    pub passages: Option<Vec<Option<String>>>,
    pub notes: Option<String>,
    /// Song ids making up the worship setlist.
    pub setlist: Option<Vec<Option<i32>>>,
    pub is_series_item: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Church {
    pub id: Uuid,
    pub name: String,
    /// Opaque token granting read access to this church's calendar feed.
    pub feed_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Series {
    pub id: Uuid,
    pub church_id: Option<Uuid>,
    pub name: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Song {
    pub id: i32,
    pub title: String,
    pub artist: Option<String>,
    pub themes: Vec<Option<String>>,
    pub tempo: Option<String>, // stored as VARCHAR: "slow", "mid", "up"
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongTempo {
    Slow,
    Mid,
    Up,
}

impl SongTempo {
    pub fn as_str(&self) -> &str {
        match self {
            SongTempo::Slow => "slow",
            SongTempo::Mid => "mid",
            SongTempo::Up => "up",
        }
    }
}

/// Scripture reference with the themes it is tagged with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Verse {
    #[serde(rename = "ref")]
    pub reference: String,
    pub themes: Vec<Option<String>>,
}

/// One translation's text for a scripture reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct VerseText {
    pub id: i32,
    #[serde(rename = "ref")]
    pub reference: String,
    pub translation_id: String,
    pub text_body: String,
}

// API request types for sermon management
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSermonRequest {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub passages: Option<Vec<String>>,
    pub notes: Option<String>,
    pub setlist: Option<Vec<i32>>,
    pub is_series_item: Option<bool>,
    pub series_id: Option<Uuid>,
    pub church_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSermonRequest {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub passages: Option<Vec<String>>,
    pub notes: Option<String>,
    pub setlist: Option<Vec<i32>>,
    pub is_series_item: Option<bool>,
    pub series_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSeriesRequest {
    pub name: String,
    pub color: Option<String>,
    pub church_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSeriesRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSongRequest {
    pub title: String,
    pub artist: Option<String>,
    pub themes: Option<Vec<String>>,
    pub tempo: Option<SongTempo>,
}
