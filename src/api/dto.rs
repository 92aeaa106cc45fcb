//! Request and response bodies, and their projections from domain views.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    ApplicationAggregate, ApplicationVersion, ProtocolAggregate, ProtocolType, ProtocolVersion,
    ProtocolVersionAggregate, ProviderAggregate, QualifiedApplicationVersion,
    QualifiedProtocolVersion, Role, SystemType, VendorAggregate,
};

// ---------------------------------------------------------------------------
// Query parameters

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 250))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub offset: i64,
}

fn default_limit() -> i64 {
    10
}

// ---------------------------------------------------------------------------
// Request bodies

#[derive(Debug, Deserialize, Validate)]
pub struct VendorCreate {
    #[validate(length(min = 1, max = 50))]
    pub kvk_number: String,
    #[validate(length(min = 1, max = 150))]
    pub trade_name: String,
    #[validate(length(min = 1, max = 150))]
    pub statutory_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplicationCreate {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub version: String,
    #[validate(length(min = 1))]
    pub roles: Vec<String>,
    #[validate(length(min = 1))]
    pub system_types: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplicationVersionCreate {
    #[validate(length(min = 1, max = 50))]
    pub version: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RoleCreate {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SystemTypeCreate {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProtocolCreate {
    pub protocol_type: ProtocolType,
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProtocolVersionCreate {
    #[validate(length(min = 1, max = 50))]
    pub version: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct HealthcareProviderCreate {
    #[validate(length(min = 1, max = 50))]
    pub ura_code: String,
    #[validate(length(min = 1, max = 50))]
    pub agb_code: String,
    #[validate(length(min = 1, max = 150))]
    pub trade_name: String,
    #[validate(length(min = 1, max = 150))]
    pub statutory_name: String,
    pub protocol_version_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct QualificationCreate {
    pub qualification_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Response bodies

#[derive(Debug, Serialize)]
pub struct RoleDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            description: role.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemTypeDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<SystemType> for SystemTypeDto {
    fn from(system_type: SystemType) -> Self {
        Self {
            id: system_type.id,
            name: system_type.name,
            description: system_type.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicationVersionDto {
    pub id: Uuid,
    pub version: String,
}

impl From<ApplicationVersion> for ApplicationVersionDto {
    fn from(version: ApplicationVersion) -> Self {
        Self {
            id: version.id,
            version: version.version,
        }
    }
}

/// Vendor identification embedded in application responses.
#[derive(Debug, Serialize)]
pub struct VendorSummaryDto {
    pub id: Uuid,
    pub kvk_number: String,
    pub trade_name: String,
}

#[derive(Debug, Serialize)]
pub struct ApplicationDto {
    pub id: Uuid,
    pub name: String,
    pub vendor: VendorSummaryDto,
    pub versions: Vec<ApplicationVersionDto>,
    pub roles: Vec<RoleDto>,
    pub system_types: Vec<SystemTypeDto>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<ApplicationAggregate> for ApplicationDto {
    fn from(aggregate: ApplicationAggregate) -> Self {
        Self {
            id: aggregate.application.id,
            name: aggregate.application.name,
            vendor: VendorSummaryDto {
                id: aggregate.vendor.id,
                kvk_number: aggregate.vendor.kvk_number,
                trade_name: aggregate.vendor.trade_name,
            },
            versions: aggregate.versions.into_iter().map(Into::into).collect(),
            roles: aggregate.roles.into_iter().map(Into::into).collect(),
            system_types: aggregate.system_types.into_iter().map(Into::into).collect(),
            created_at: aggregate.application.created_at,
            modified_at: aggregate.application.modified_at,
        }
    }
}

/// Application as listed under its owning vendor.
#[derive(Debug, Serialize)]
pub struct VendorApplicationDto {
    pub id: Uuid,
    pub name: String,
    pub versions: Vec<ApplicationVersionDto>,
    pub roles: Vec<RoleDto>,
    pub system_types: Vec<SystemTypeDto>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct VendorDto {
    pub id: Uuid,
    pub kvk_number: String,
    pub trade_name: String,
    pub statutory_name: String,
    pub applications: Vec<VendorApplicationDto>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<VendorAggregate> for VendorDto {
    fn from(aggregate: VendorAggregate) -> Self {
        let applications = aggregate
            .applications
            .into_iter()
            .map(|app| VendorApplicationDto {
                id: app.application.id,
                name: app.application.name,
                versions: app.versions.into_iter().map(Into::into).collect(),
                roles: app.roles.into_iter().map(Into::into).collect(),
                system_types: app.system_types.into_iter().map(Into::into).collect(),
                created_at: app.application.created_at,
                modified_at: app.application.modified_at,
            })
            .collect();

        Self {
            id: aggregate.vendor.id,
            kvk_number: aggregate.vendor.kvk_number,
            trade_name: aggregate.vendor.trade_name,
            statutory_name: aggregate.vendor.statutory_name,
            applications,
            created_at: aggregate.vendor.created_at,
            modified_at: aggregate.vendor.modified_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProtocolVersionDto {
    pub id: Uuid,
    pub version: String,
    pub description: Option<String>,
}

impl From<ProtocolVersion> for ProtocolVersionDto {
    fn from(version: ProtocolVersion) -> Self {
        Self {
            id: version.id,
            version: version.version,
            description: version.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProtocolDto {
    pub id: Uuid,
    pub protocol_type: ProtocolType,
    pub name: String,
    pub description: Option<String>,
    pub versions: Vec<ProtocolVersionDto>,
}

impl From<ProtocolAggregate> for ProtocolDto {
    fn from(aggregate: ProtocolAggregate) -> Self {
        Self {
            id: aggregate.protocol.id,
            protocol_type: aggregate.protocol.protocol_type,
            name: aggregate.protocol.name,
            description: aggregate.protocol.description,
            versions: aggregate.versions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Qualified protocol version as listed under a healthcare provider.
#[derive(Debug, Serialize)]
pub struct QualifiedProtocolVersionDto {
    pub id: Uuid,
    pub protocol_id: Uuid,
    pub version_id: Uuid,
    pub version: String,
    pub description: Option<String>,
    pub qualification_date: NaiveDate,
    pub archived_date: Option<DateTime<Utc>>,
}

impl From<QualifiedProtocolVersion> for QualifiedProtocolVersionDto {
    fn from(qualified: QualifiedProtocolVersion) -> Self {
        Self {
            id: qualified.qualification.id,
            protocol_id: qualified.protocol_version.protocol_id,
            version_id: qualified.protocol_version.id,
            version: qualified.protocol_version.version,
            description: qualified.protocol_version.description,
            qualification_date: qualified.qualification.qualification_date,
            archived_date: qualified.qualification.archived_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthcareProviderDto {
    pub id: Uuid,
    pub ura_code: String,
    pub agb_code: String,
    pub trade_name: String,
    pub statutory_name: String,
    pub application_versions: Vec<ApplicationVersionDto>,
    pub qualified_protocols: Vec<QualifiedProtocolVersionDto>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<ProviderAggregate> for HealthcareProviderDto {
    fn from(aggregate: ProviderAggregate) -> Self {
        Self {
            id: aggregate.provider.id,
            ura_code: aggregate.provider.ura_code,
            agb_code: aggregate.provider.agb_code,
            trade_name: aggregate.provider.trade_name,
            statutory_name: aggregate.provider.statutory_name,
            application_versions: aggregate
                .application_versions
                .into_iter()
                .map(Into::into)
                .collect(),
            qualified_protocols: aggregate
                .qualified_protocols
                .into_iter()
                .map(Into::into)
                .collect(),
            created_at: aggregate.provider.created_at,
            modified_at: aggregate.provider.modified_at,
        }
    }
}

/// Qualified application version as listed under a protocol version.
#[derive(Debug, Serialize)]
pub struct QualifiedApplicationVersionDto {
    pub qualification_id: Uuid,
    pub application_id: Uuid,
    pub version_id: Uuid,
    pub version: String,
    pub qualification_date: NaiveDate,
    pub archived_date: Option<DateTime<Utc>>,
}

impl From<QualifiedApplicationVersion> for QualifiedApplicationVersionDto {
    fn from(qualified: QualifiedApplicationVersion) -> Self {
        Self {
            qualification_id: qualified.qualification.id,
            application_id: qualified.application_version.application_id,
            version_id: qualified.application_version.id,
            version: qualified.application_version.version,
            qualification_date: qualified.qualification.qualification_date,
            archived_date: qualified.qualification.archived_date,
        }
    }
}

/// Protocol version together with every application version qualified
/// against it.
#[derive(Debug, Serialize)]
pub struct ProtocolVersionQualificationsDto {
    pub id: Uuid,
    pub protocol_id: Uuid,
    pub version: String,
    pub description: Option<String>,
    pub application_versions: Vec<QualifiedApplicationVersionDto>,
}

impl From<ProtocolVersionAggregate> for ProtocolVersionQualificationsDto {
    fn from(aggregate: ProtocolVersionAggregate) -> Self {
        Self {
            id: aggregate.protocol_version.id,
            protocol_id: aggregate.protocol_version.protocol_id,
            version: aggregate.protocol_version.version,
            description: aggregate.protocol_version.description,
            application_versions: aggregate
                .qualified_application_versions
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}
