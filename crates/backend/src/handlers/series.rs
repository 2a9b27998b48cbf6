use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use shared_types::{CreateSeriesRequest, Series, UpdateSeriesRequest};
use uuid::Uuid;

use crate::db::{self, DbPool};
use crate::error::{ApiError, ApiResult};
use crate::models::{NewSeries, SeriesChangeset};

pub async fn list_series(State(pool): State<DbPool>) -> ApiResult<Json<Vec<Series>>> {
    let mut conn = pool.get().await?;

    let series = db::series::list_all(&mut conn).await?;

    Ok(Json(series))
}

pub async fn create_series(
    State(pool): State<DbPool>,
    Json(payload): Json<CreateSeriesRequest>,
) -> ApiResult<Json<Series>> {
    let mut conn = pool.get().await?;

    let new_series = NewSeries {
        church_id: payload.church_id,
        name: payload.name,
        color: payload.color,
    };
    let created = db::series::create(&mut conn, new_series).await?;

    Ok(Json(created))
}

pub async fn update_series(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSeriesRequest>,
) -> ApiResult<Json<Series>> {
    let mut conn = pool.get().await?;

    let changes = SeriesChangeset {
        name: payload.name,
        color: payload.color,
    };
    let updated = db::series::update(&mut conn, id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Series"))?;

    Ok(Json(updated))
}

pub async fn delete_series(State(pool): State<DbPool>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    let mut conn = pool.get().await?;

    let deleted = db::series::delete(&mut conn, id).await?;
    if !deleted {
        return Err(ApiError::not_found("Series"));
    }

    Ok(StatusCode::NO_CONTENT)
}
