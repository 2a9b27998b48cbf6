use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared_types::{CreateSermonRequest, Sermon, UpdateSermonRequest};
use uuid::Uuid;

use crate::db::{self, DbPool};
use crate::error::{ApiError, ApiResult};
use crate::models::{NewSermon, SermonChangeset};

#[derive(Debug, Deserialize)]
pub struct ListSermonsQuery {
    pub church_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub async fn list_sermons(
    State(pool): State<DbPool>,
    Query(query): Query<ListSermonsQuery>,
) -> ApiResult<Json<Vec<Sermon>>> {
    let mut conn = pool.get().await?;

    // A date bound switches to the planning view: chronological order,
    // undated sermons excluded by the bound itself.
    let sermons = if query.from.is_some() || query.to.is_some() {
        db::sermons::list_in_range(&mut conn, query.church_id, query.from, query.to).await?
    } else {
        db::sermons::list_all(&mut conn, query.church_id).await?
    };

    Ok(Json(sermons))
}

pub async fn get_sermon(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Sermon>> {
    let mut conn = pool.get().await?;

    let sermon = db::sermons::get_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sermon"))?;

    Ok(Json(sermon))
}

pub async fn create_sermon(
    State(pool): State<DbPool>,
    Json(payload): Json<CreateSermonRequest>,
) -> ApiResult<Json<Sermon>> {
    let mut conn = pool.get().await?;

    let sermon = db::sermons::create(&mut conn, NewSermon::from(payload)).await?;

    Ok(Json(sermon))
}

pub async fn update_sermon(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSermonRequest>,
) -> ApiResult<Json<Sermon>> {
    let mut conn = pool.get().await?;

    let sermon = db::sermons::update(&mut conn, id, SermonChangeset::from(payload))
        .await?
        .ok_or_else(|| ApiError::not_found("Sermon"))?;

    Ok(Json(sermon))
}

pub async fn delete_sermon(State(pool): State<DbPool>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    let mut conn = pool.get().await?;

    let deleted = db::sermons::delete(&mut conn, id).await?;
    if !deleted {
        return Err(ApiError::not_found("Sermon"));
    }

    Ok(StatusCode::NO_CONTENT)
}
