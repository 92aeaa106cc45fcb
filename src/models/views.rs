//! Aggregate views returned by the service layer.
//!
//! A view bundles an aggregate root with the child rows the HTTP layer
//! projects into response DTOs. Views are assembled by the repositories in
//! one transaction; they carry plain data and no connection handles.

use serde::Serialize;

use super::entities::{
    Application, ApplicationVersion, HealthcareProvider, HealthcareProviderQualification,
    Protocol, ProtocolApplicationQualification, ProtocolVersion, Role, SystemType, Vendor,
};

/// One page of results plus the pagination window that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            limit: self.limit,
            offset: self.offset,
            total: self.total,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VendorAggregate {
    pub vendor: Vendor,
    pub applications: Vec<ApplicationAggregate>,
}

#[derive(Debug, Clone)]
pub struct ApplicationAggregate {
    pub application: Application,
    pub vendor: Vendor,
    pub versions: Vec<ApplicationVersion>,
    pub roles: Vec<Role>,
    pub system_types: Vec<SystemType>,
}

#[derive(Debug, Clone)]
pub struct ProtocolAggregate {
    pub protocol: Protocol,
    pub versions: Vec<ProtocolVersion>,
}

/// Protocol version together with the application versions qualified
/// against it.
#[derive(Debug, Clone)]
pub struct ProtocolVersionAggregate {
    pub protocol_version: ProtocolVersion,
    pub qualified_application_versions: Vec<QualifiedApplicationVersion>,
}

#[derive(Debug, Clone)]
pub struct QualifiedApplicationVersion {
    pub qualification: ProtocolApplicationQualification,
    pub application_version: ApplicationVersion,
}

#[derive(Debug, Clone)]
pub struct ProviderAggregate {
    pub provider: HealthcareProvider,
    pub application_versions: Vec<ApplicationVersion>,
    pub qualified_protocols: Vec<QualifiedProtocolVersion>,
}

#[derive(Debug, Clone)]
pub struct QualifiedProtocolVersion {
    pub qualification: HealthcareProviderQualification,
    pub protocol_version: ProtocolVersion,
}
