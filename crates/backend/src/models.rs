// Database models for Diesel
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Insertable struct for new sermons. `id` and `created_at` come from
/// database defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::sermons)]
pub struct NewSermon {
    pub church_id: Option<Uuid>,
    pub series_id: Option<Uuid>,
    pub title: Option<String>,
    pub theme: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub passages: Option<Vec<Option<String>>>,
    pub notes: Option<String>,
    pub setlist: Option<Vec<Option<i32>>>,
    pub is_series_item: bool,
}

impl From<shared_types::CreateSermonRequest> for NewSermon {
    fn from(req: shared_types::CreateSermonRequest) -> Self {
        NewSermon {
            church_id: req.church_id,
            series_id: req.series_id,
            title: req.title,
            theme: req.theme,
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
            location: req.location,
            passages: req.passages.map(wrap_elements),
            notes: req.notes,
            setlist: req.setlist.map(wrap_elements),
            is_series_item: req.is_series_item.unwrap_or(false),
        }
    }
}

/// Partial update for sermons. `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::sermons)]
pub struct SermonChangeset {
    pub series_id: Option<Uuid>,
    pub title: Option<String>,
    pub theme: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub passages: Option<Vec<Option<String>>>,
    pub notes: Option<String>,
    pub setlist: Option<Vec<Option<i32>>>,
    pub is_series_item: Option<bool>,
}

impl SermonChangeset {
    pub fn has_changes(&self) -> bool {
        self.series_id.is_some()
            || self.title.is_some()
            || self.theme.is_some()
            || self.date.is_some()
            || self.start_time.is_some()
            || self.end_time.is_some()
            || self.location.is_some()
            || self.passages.is_some()
            || self.notes.is_some()
            || self.setlist.is_some()
            || self.is_series_item.is_some()
    }
}

impl From<shared_types::UpdateSermonRequest> for SermonChangeset {
    fn from(req: shared_types::UpdateSermonRequest) -> Self {
        SermonChangeset {
            series_id: req.series_id,
            title: req.title,
            theme: req.theme,
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
            location: req.location,
            passages: req.passages.map(wrap_elements),
            notes: req.notes,
            setlist: req.setlist.map(wrap_elements),
            is_series_item: req.is_series_item,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::series)]
pub struct NewSeries {
    pub church_id: Option<Uuid>,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::series)]
pub struct SeriesChangeset {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl SeriesChangeset {
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.color.is_some()
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::songs)]
pub struct NewSong {
    pub title: String,
    pub artist: Option<String>,
    pub themes: Vec<Option<String>>,
    pub tempo: Option<String>,
}

/// Postgres array columns admit null elements, so diesel maps them through
/// `Vec<Option<T>>` even though the application never writes nulls.
fn wrap_elements<T>(values: Vec<T>) -> Vec<Option<T>> {
    values.into_iter().map(Some).collect()
}
