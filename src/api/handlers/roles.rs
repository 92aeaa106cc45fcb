//! Role endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::validated;
use crate::{
    api::dto::{PaginationParams, RoleCreate, RoleDto, RoleUpdate},
    models::Page,
    state::AppState,
    Result,
};

pub async fn get_roles(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<RoleDto>>> {
    let params = validated(params)?;
    let page = state.roles.get_paginated(params.limit, params.offset).await?;
    Ok(Json(page.map(RoleDto::from)))
}

pub async fn get_role_by_id(
    State(state): State<AppState>,
    Path(role_id): Path<Uuid>,
) -> Result<Json<RoleDto>> {
    let role = state.roles.get_one(role_id).await?;
    Ok(Json(role.into()))
}

pub async fn create_role(
    State(state): State<AppState>,
    Json(body): Json<RoleCreate>,
) -> Result<(StatusCode, Json<RoleDto>)> {
    let body = validated(body)?;
    let role = state
        .roles
        .add_one(&body.name, body.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(role.into())))
}

pub async fn update_role_description(
    State(state): State<AppState>,
    Path(role_id): Path<Uuid>,
    Json(body): Json<RoleUpdate>,
) -> Result<Json<RoleDto>> {
    let role = state
        .roles
        .update_description(role_id, body.description.as_deref())
        .await?;
    Ok(Json(role.into()))
}

pub async fn delete_role(
    State(state): State<AppState>,
    Path(role_id): Path<Uuid>,
) -> Result<Json<RoleDto>> {
    let role = state.roles.remove_one(role_id).await?;
    Ok(Json(role.into()))
}
