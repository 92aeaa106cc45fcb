//! Protocol and protocol version endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::validated;
use crate::{
    api::dto::{
        PaginationParams, ProtocolCreate, ProtocolDto, ProtocolVersionCreate, ProtocolVersionDto,
    },
    models::Page,
    state::AppState,
    Result,
};

pub async fn get_protocols(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<ProtocolDto>>> {
    let params = validated(params)?;
    let page = state
        .protocols
        .get_paginated(params.limit, params.offset)
        .await?;
    Ok(Json(page.map(ProtocolDto::from)))
}

pub async fn create_protocol(
    State(state): State<AppState>,
    Json(body): Json<ProtocolCreate>,
) -> Result<(StatusCode, Json<ProtocolDto>)> {
    let body = validated(body)?;
    let protocol = state
        .protocols
        .add_one(body.protocol_type, &body.name, body.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(protocol.into())))
}

pub async fn get_protocol_by_id(
    State(state): State<AppState>,
    Path(protocol_id): Path<Uuid>,
) -> Result<Json<ProtocolDto>> {
    let protocol = state.protocols.get_one(protocol_id).await?;
    Ok(Json(protocol.into()))
}

pub async fn delete_protocol(
    State(state): State<AppState>,
    Path(protocol_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.protocols.remove_one(protocol_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_protocol_versions(
    State(state): State<AppState>,
    Path(protocol_id): Path<Uuid>,
) -> Result<Json<Vec<ProtocolVersionDto>>> {
    let versions = state.protocol_versions.get_for_protocol(protocol_id).await?;
    Ok(Json(versions.into_iter().map(Into::into).collect()))
}

pub async fn add_protocol_version(
    State(state): State<AppState>,
    Path(protocol_id): Path<Uuid>,
    Json(body): Json<ProtocolVersionCreate>,
) -> Result<(StatusCode, Json<ProtocolVersionDto>)> {
    let body = validated(body)?;
    let version = state
        .protocol_versions
        .add_one(protocol_id, &body.version, body.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(version.into())))
}

pub async fn get_protocol_version(
    State(state): State<AppState>,
    Path((protocol_id, version_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ProtocolVersionDto>> {
    let version = state
        .protocol_versions
        .get_one(protocol_id, version_id)
        .await?;
    Ok(Json(version.into()))
}

pub async fn delete_protocol_version(
    State(state): State<AppState>,
    Path((protocol_id, version_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    state
        .protocol_versions
        .remove_one(protocol_id, version_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
