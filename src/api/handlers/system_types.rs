//! System type endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::validated;
use crate::{
    api::dto::{PaginationParams, SystemTypeCreate, SystemTypeDto},
    models::Page,
    state::AppState,
    Result,
};

pub async fn get_system_types(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<SystemTypeDto>>> {
    let params = validated(params)?;
    let page = state
        .system_types
        .get_paginated(params.limit, params.offset)
        .await?;
    Ok(Json(page.map(SystemTypeDto::from)))
}

pub async fn get_system_type_by_id(
    State(state): State<AppState>,
    Path(system_type_id): Path<Uuid>,
) -> Result<Json<SystemTypeDto>> {
    let system_type = state.system_types.get_one(system_type_id).await?;
    Ok(Json(system_type.into()))
}

pub async fn create_system_type(
    State(state): State<AppState>,
    Json(body): Json<SystemTypeCreate>,
) -> Result<(StatusCode, Json<SystemTypeDto>)> {
    let body = validated(body)?;
    let system_type = state
        .system_types
        .add_one(&body.name, body.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(system_type.into())))
}

pub async fn delete_system_type(
    State(state): State<AppState>,
    Path(system_type_id): Path<Uuid>,
) -> Result<Json<SystemTypeDto>> {
    let system_type = state.system_types.remove_one(system_type_id).await?;
    Ok(Json(system_type.into()))
}
