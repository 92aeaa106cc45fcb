//! Healthcare provider endpoints, including application-version
//! registration.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::validated;
use crate::{
    api::dto::{
        ApplicationVersionDto, HealthcareProviderCreate, HealthcareProviderDto, PaginationParams,
    },
    models::Page,
    state::AppState,
    Result,
};

pub async fn get_healthcare_providers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<HealthcareProviderDto>>> {
    let params = validated(params)?;
    let page = state
        .healthcare_providers
        .get_paginated(params.limit, params.offset)
        .await?;
    Ok(Json(page.map(HealthcareProviderDto::from)))
}

pub async fn get_healthcare_provider_by_id(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<HealthcareProviderDto>> {
    let provider = state.healthcare_providers.get_one(provider_id).await?;
    Ok(Json(provider.into()))
}

pub async fn register_healthcare_provider(
    State(state): State<AppState>,
    Json(body): Json<HealthcareProviderCreate>,
) -> Result<(StatusCode, Json<HealthcareProviderDto>)> {
    let body = validated(body)?;
    let provider = state
        .healthcare_providers
        .add_one(
            &body.ura_code,
            &body.agb_code,
            &body.trade_name,
            &body.statutory_name,
            body.protocol_version_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(provider.into())))
}

pub async fn deregister_healthcare_provider(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<HealthcareProviderDto>> {
    let provider = state.healthcare_providers.remove_one(provider_id).await?;
    Ok(Json(provider.into()))
}

pub async fn get_application_versions(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationVersionDto>>> {
    let versions = state
        .provider_application_versions
        .get_application_versions(provider_id)
        .await?;
    Ok(Json(versions.into_iter().map(Into::into).collect()))
}

pub async fn register_application_version(
    State(state): State<AppState>,
    Path((provider_id, version_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<HealthcareProviderDto>> {
    let provider = state
        .provider_application_versions
        .assign_application_version(provider_id, version_id)
        .await?;
    Ok(Json(provider.into()))
}

pub async fn deregister_application_version(
    State(state): State<AppState>,
    Path((provider_id, version_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<HealthcareProviderDto>> {
    let provider = state
        .provider_application_versions
        .unassign_application_version(provider_id, version_id)
        .await?;
    Ok(Json(provider.into()))
}
