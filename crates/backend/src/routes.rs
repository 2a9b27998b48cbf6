use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::db::DbPool;
use crate::handlers::{feed, health, sermons, series, songs, verses};

pub fn api_routes() -> Router<DbPool> {
    Router::new()
        .route("/health", get(health::health_check))
        // Calendar feed
        .route("/api/ics", get(feed::sermon_feed))
        // Sermon routes
        .route("/api/sermons", get(sermons::list_sermons))
        .route("/api/sermons", post(sermons::create_sermon))
        .route("/api/sermons/:id", get(sermons::get_sermon))
        .route("/api/sermons/:id", put(sermons::update_sermon))
        .route("/api/sermons/:id", delete(sermons::delete_sermon))
        // Series routes
        .route("/api/series", get(series::list_series))
        .route("/api/series", post(series::create_series))
        .route("/api/series/:id", put(series::update_series))
        .route("/api/series/:id", delete(series::delete_series))
        // Song library routes
        .route("/api/songs", get(songs::list_songs))
        .route("/api/songs", post(songs::create_song))
        // Scripture library routes
        .route("/api/verses", get(verses::list_verses))
        .route("/api/verse-texts", get(verses::list_verse_texts))
}
