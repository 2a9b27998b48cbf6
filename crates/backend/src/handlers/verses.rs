use axum::extract::{Json, State};
use shared_types::{Verse, VerseText};

use crate::db::{self, DbPool};
use crate::error::ApiResult;

pub async fn list_verses(State(pool): State<DbPool>) -> ApiResult<Json<Vec<Verse>>> {
    let mut conn = pool.get().await?;

    let verses = db::verses::list_all(&mut conn).await?;

    Ok(Json(verses))
}

pub async fn list_verse_texts(State(pool): State<DbPool>) -> ApiResult<Json<Vec<VerseText>>> {
    let mut conn = pool.get().await?;

    let texts = db::verses::list_texts(&mut conn).await?;

    Ok(Json(texts))
}
