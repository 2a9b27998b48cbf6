//! Read-only repository interface for the calendar feed.
//!
//! The feed resolver talks to the record store through this narrow trait so
//! it stays store-agnostic and can be exercised against an in-memory store in
//! tests. `PgFeedRepository` is the production adapter over a pooled Postgres
//! connection.

use chrono::NaiveDate;
use diesel_async::AsyncPgConnection;
use shared_types::Sermon;
use uuid::Uuid;

use crate::db;
use crate::error::StoreError;

/// Filters applied when the feed is not pinned to a single sermon.
/// Both date bounds are inclusive; either may be absent for an open range.
#[derive(Debug, Clone, Copy, Default)]
pub struct SermonFilter {
    pub church_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[allow(async_fn_in_trait)]
pub trait SermonFeedRepository {
    /// Keyed lookup of a single sermon record.
    async fn sermon_by_id(&mut self, id: Uuid) -> Result<Option<Sermon>, StoreError>;

    /// Range/filter query, ascending by date with undated records last.
    async fn sermons_by_filter(&mut self, filter: SermonFilter) -> Result<Vec<Sermon>, StoreError>;

    /// Resolve an opaque feed token to a church identifier.
    async fn church_id_for_feed_token(&mut self, token: &str) -> Result<Option<Uuid>, StoreError>;
}

pub struct PgFeedRepository<'a> {
    conn: &'a mut AsyncPgConnection,
}

impl<'a> PgFeedRepository<'a> {
    pub fn new(conn: &'a mut AsyncPgConnection) -> Self {
        Self { conn }
    }
}

impl SermonFeedRepository for PgFeedRepository<'_> {
    async fn sermon_by_id(&mut self, id: Uuid) -> Result<Option<Sermon>, StoreError> {
        db::sermons::get_by_id(self.conn, id)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }

    async fn sermons_by_filter(&mut self, filter: SermonFilter) -> Result<Vec<Sermon>, StoreError> {
        db::sermons::list_in_range(self.conn, filter.church_id, filter.from, filter.to)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }

    async fn church_id_for_feed_token(&mut self, token: &str) -> Result<Option<Uuid>, StoreError> {
        db::churches::resolve_feed_token(self.conn, token)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }
}
