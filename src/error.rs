//! Error types for the qualification registry

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generic repository lookup miss, raised by `get_or_fail` and
    /// `get_by_property_exact` before a service maps it to an
    /// aggregate-specific not-found error.
    #[error("No matching entry found in {table}")]
    EntryNotFound { table: &'static str },

    /// A filter or property lookup referenced a column that does not exist
    /// on the target table. Caller defect, not a business rule violation.
    #[error("{column} is not a column of {table}")]
    UnknownColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("Vendor not found")]
    VendorNotFound,

    #[error("Vendor already exists")]
    VendorAlreadyExists,

    #[error("Vendor cannot be deleted while it still has applications")]
    VendorHasApplications,

    #[error("Application not found")]
    ApplicationNotFound,

    #[error("Application already exists")]
    ApplicationAlreadyExists,

    #[error("Application version not found")]
    ApplicationVersionNotFound,

    #[error("Cannot delete version, application should at least contain one version")]
    LastApplicationVersion,

    #[error("Role not found")]
    RoleNotFound,

    #[error("Role already exists")]
    RoleAlreadyExists,

    #[error("Role is already assigned to application")]
    RoleAlreadyAssigned,

    #[error("Role is not assigned to application")]
    RoleNotAssigned,

    #[error("Cannot delete role, application should at least contain one role")]
    LastRole,

    #[error("System type not found")]
    SystemTypeNotFound,

    #[error("System type already exists")]
    SystemTypeAlreadyExists,

    #[error("System type is already assigned to application")]
    SystemTypeAlreadyAssigned,

    #[error("System type is not assigned to application")]
    SystemTypeNotAssigned,

    #[error("Cannot delete system type, application should at least contain one system type")]
    LastSystemType,

    #[error("Protocol not found")]
    ProtocolNotFound,

    #[error("Protocol version not found")]
    ProtocolVersionNotFound,

    #[error("Healthcare provider not found")]
    HealthcareProviderNotFound,

    #[error("URA code already exists")]
    UraCodeAlreadyExists,

    #[error("AGB code already exists")]
    AgbCodeAlreadyExists,

    #[error("Application version is already registered to healthcare provider")]
    ApplicationVersionAlreadyRegistered,

    #[error("Application version is not registered to healthcare provider")]
    ApplicationVersionNotRegistered,

    #[error("Healthcare provider is already qualified for protocol version")]
    ProviderAlreadyQualified,

    #[error("Healthcare provider qualification is already archived")]
    ProviderQualificationArchived,

    #[error("Healthcare provider is not qualified for protocol version")]
    ProviderNotQualified,

    #[error("Application version is already qualified for protocol version")]
    ApplicationVersionAlreadyQualified,

    #[error("Application version qualification is already archived")]
    ApplicationVersionQualificationArchived,

    #[error("Application version is not qualified for protocol version")]
    ApplicationVersionNotQualified,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::VendorNotFound
            | Error::ApplicationNotFound
            | Error::ApplicationVersionNotFound
            | Error::RoleNotFound
            | Error::SystemTypeNotFound
            | Error::ProtocolNotFound
            | Error::ProtocolVersionNotFound
            | Error::HealthcareProviderNotFound
            | Error::RoleNotAssigned
            | Error::SystemTypeNotAssigned
            | Error::ApplicationVersionNotRegistered
            | Error::ProviderNotQualified
            | Error::ApplicationVersionNotQualified => StatusCode::NOT_FOUND,

            Error::VendorAlreadyExists
            | Error::VendorHasApplications
            | Error::ApplicationAlreadyExists
            | Error::LastApplicationVersion
            | Error::RoleAlreadyExists
            | Error::RoleAlreadyAssigned
            | Error::LastRole
            | Error::SystemTypeAlreadyExists
            | Error::SystemTypeAlreadyAssigned
            | Error::LastSystemType
            | Error::UraCodeAlreadyExists
            | Error::AgbCodeAlreadyExists
            | Error::ApplicationVersionAlreadyRegistered
            | Error::ProviderAlreadyQualified
            | Error::ProviderQualificationArchived
            | Error::ApplicationVersionAlreadyQualified
            | Error::ApplicationVersionQualificationArchived => StatusCode::CONFLICT,

            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            Error::Database(_)
            | Error::EntryNotFound { .. }
            | Error::UnknownColumn { .. }
            | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::CONFLICT => "conflict",
            StatusCode::UNPROCESSABLE_ENTITY => "validation",
            _ => "internal",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
