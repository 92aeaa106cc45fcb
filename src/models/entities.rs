//! Row types mirroring the relational schema.
//!
//! Every aggregate row carries a v4 UUID primary key plus `created_at` /
//! `modified_at` timestamps. Association rows additionally carry the two
//! foreign keys that form their composite primary key; qualification rows
//! carry a `qualification_date` and an optional, immutable `archived_date`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Software vendor, identified by its chamber-of-commerce (KVK) number.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Vendor {
    pub id: Uuid,
    pub kvk_number: String,
    pub trade_name: String,
    pub statutory_name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub name: String,
    pub vendor_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ApplicationVersion {
    pub id: Uuid,
    pub version: String,
    pub application_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Functional role an application can fulfill (e.g. referral index).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SystemType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Kind of interoperability protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "protocol_type")]
pub enum ProtocolType {
    InformationStandard,
    Directive,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Protocol {
    pub id: Uuid,
    pub protocol_type: ProtocolType,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProtocolVersion {
    pub id: Uuid,
    pub version: String,
    pub description: Option<String>,
    pub protocol_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Healthcare provider, identified by its URA and AGB codes.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct HealthcareProvider {
    pub id: Uuid,
    pub ura_code: String,
    pub agb_code: String,
    pub trade_name: String,
    pub statutory_name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Association row: application fulfills a role.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ApplicationRole {
    pub id: Uuid,
    pub application_id: Uuid,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Association row: application is of a system type.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ApplicationType {
    pub id: Uuid,
    pub application_id: Uuid,
    pub system_type_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Association row: healthcare provider runs an application version.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct HealthcareProviderApplicationVersion {
    pub id: Uuid,
    pub healthcare_provider_id: Uuid,
    pub application_version_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Dated qualification of a healthcare provider against a protocol version.
///
/// `archived_date` is set at most once; an archived qualification is never
/// reactivated and the row is never deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct HealthcareProviderQualification {
    pub id: Uuid,
    pub healthcare_provider_id: Uuid,
    pub protocol_version_id: Uuid,
    pub qualification_date: NaiveDate,
    pub archived_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Dated qualification of an application version against a protocol version.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProtocolApplicationQualification {
    pub id: Uuid,
    pub application_version_id: Uuid,
    pub protocol_version_id: Uuid,
    pub qualification_date: NaiveDate,
    pub archived_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}
