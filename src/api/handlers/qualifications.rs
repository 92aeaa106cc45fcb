//! Qualification endpoints for both association kinds.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    api::dto::{HealthcareProviderDto, ProtocolVersionQualificationsDto, QualificationCreate},
    state::AppState,
    Result,
};

pub async fn qualify_application_version(
    State(state): State<AppState>,
    Path((protocol_version_id, application_version_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<QualificationCreate>,
) -> Result<Json<ProtocolVersionQualificationsDto>> {
    let protocol_version = state
        .application_qualifications
        .qualify(
            protocol_version_id,
            application_version_id,
            body.qualification_date,
        )
        .await?;
    Ok(Json(protocol_version.into()))
}

pub async fn archive_application_version_qualification(
    State(state): State<AppState>,
    Path((protocol_version_id, application_version_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ProtocolVersionQualificationsDto>> {
    let protocol_version = state
        .application_qualifications
        .archive(protocol_version_id, application_version_id)
        .await?;
    Ok(Json(protocol_version.into()))
}

pub async fn qualify_healthcare_provider(
    State(state): State<AppState>,
    Path((provider_id, protocol_version_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<QualificationCreate>,
) -> Result<Json<HealthcareProviderDto>> {
    let provider = state
        .provider_qualifications
        .qualify(provider_id, protocol_version_id, body.qualification_date)
        .await?;
    Ok(Json(provider.into()))
}

pub async fn archive_healthcare_provider_qualification(
    State(state): State<AppState>,
    Path((provider_id, protocol_version_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<HealthcareProviderDto>> {
    let provider = state
        .provider_qualifications
        .archive(provider_id, protocol_version_id)
        .await?;
    Ok(Json(provider.into()))
}
