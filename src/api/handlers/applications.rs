//! Application endpoints, including role, system-type and version
//! sub-resources.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::validated;
use crate::{
    api::dto::{
        ApplicationCreate, ApplicationDto, ApplicationVersionCreate, ApplicationVersionDto,
        PaginationParams, RoleDto, SystemTypeDto,
    },
    models::Page,
    state::AppState,
    Result,
};

pub async fn get_applications(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<ApplicationDto>>> {
    let params = validated(params)?;
    let page = state
        .applications
        .get_paginated(params.limit, params.offset)
        .await?;
    Ok(Json(page.map(ApplicationDto::from)))
}

pub async fn get_application_by_id(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<ApplicationDto>> {
    let application = state.applications.get_one(application_id).await?;
    Ok(Json(application.into()))
}

pub async fn delete_application_by_id(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<ApplicationDto>> {
    let application = state.applications.remove_one(application_id).await?;
    Ok(Json(application.into()))
}

pub async fn get_vendor_applications(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationDto>>> {
    let applications = state.applications.get_by_vendor_id(vendor_id).await?;
    Ok(Json(applications.into_iter().map(Into::into).collect()))
}

pub async fn register_vendor_application(
    State(state): State<AppState>,
    Path(vendor_id): Path<Uuid>,
    Json(body): Json<ApplicationCreate>,
) -> Result<(StatusCode, Json<ApplicationDto>)> {
    let body = validated(body)?;
    let application = state
        .applications
        .add_one(
            vendor_id,
            &body.name,
            &body.version,
            &body.roles,
            &body.system_types,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(application.into())))
}

pub async fn get_application_versions(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationVersionDto>>> {
    let versions = state
        .application_versions
        .get_for_application(application_id)
        .await?;
    Ok(Json(versions.into_iter().map(Into::into).collect()))
}

pub async fn get_application_roles(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<Vec<RoleDto>>> {
    let roles = state.application_roles.get_roles(application_id).await?;
    Ok(Json(roles.into_iter().map(Into::into).collect()))
}

pub async fn get_application_system_types(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<Json<Vec<SystemTypeDto>>> {
    let system_types = state
        .application_system_types
        .get_system_types(application_id)
        .await?;
    Ok(Json(system_types.into_iter().map(Into::into).collect()))
}

pub async fn add_application_version(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(body): Json<ApplicationVersionCreate>,
) -> Result<(StatusCode, Json<Vec<ApplicationVersionDto>>)> {
    let body = validated(body)?;
    let versions = state
        .application_versions
        .add_one(application_id, &body.version)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(versions.into_iter().map(Into::into).collect()),
    ))
}

pub async fn delete_application_version(
    State(state): State<AppState>,
    Path((application_id, version_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<ApplicationVersionDto>>> {
    let versions = state
        .application_versions
        .remove_one(application_id, version_id)
        .await?;
    Ok(Json(versions.into_iter().map(Into::into).collect()))
}

pub async fn assign_application_role(
    State(state): State<AppState>,
    Path((application_id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApplicationDto>> {
    let application = state
        .application_roles
        .assign_role(application_id, role_id)
        .await?;
    Ok(Json(application.into()))
}

pub async fn unassign_application_role(
    State(state): State<AppState>,
    Path((application_id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApplicationDto>> {
    let application = state
        .application_roles
        .unassign_role(application_id, role_id)
        .await?;
    Ok(Json(application.into()))
}

pub async fn assign_application_system_type(
    State(state): State<AppState>,
    Path((application_id, system_type_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApplicationDto>> {
    let application = state
        .application_system_types
        .assign_system_type(application_id, system_type_id)
        .await?;
    Ok(Json(application.into()))
}

pub async fn unassign_application_system_type(
    State(state): State<AppState>,
    Path((application_id, system_type_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApplicationDto>> {
    let application = state
        .application_system_types
        .unassign_system_type(application_id, system_type_id)
        .await?;
    Ok(Json(application.into()))
}
