use axum::extract::{Json, State};
use shared_types::{CreateSongRequest, Song};

use crate::db::{self, DbPool};
use crate::error::ApiResult;
use crate::models::NewSong;

pub async fn list_songs(State(pool): State<DbPool>) -> ApiResult<Json<Vec<Song>>> {
    let mut conn = pool.get().await?;

    let songs = db::songs::list_all(&mut conn).await?;

    Ok(Json(songs))
}

pub async fn create_song(
    State(pool): State<DbPool>,
    Json(payload): Json<CreateSongRequest>,
) -> ApiResult<Json<Song>> {
    let mut conn = pool.get().await?;

    let new_song = NewSong {
        title: payload.title,
        artist: payload.artist,
        themes: payload
            .themes
            .unwrap_or_default()
            .into_iter()
            .map(Some)
            .collect(),
        tempo: payload.tempo.map(|t| t.as_str().to_string()),
    };
    let created = db::songs::create(&mut conn, new_song).await?;

    Ok(Json(created))
}
