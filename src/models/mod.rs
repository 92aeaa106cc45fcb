//! Domain models - database row types and aggregate views

mod entities;
mod views;

pub use entities::{
    Application, ApplicationRole, ApplicationType, ApplicationVersion, HealthcareProvider,
    HealthcareProviderApplicationVersion, HealthcareProviderQualification, Protocol,
    ProtocolApplicationQualification, ProtocolType, ProtocolVersion, Role, SystemType, Vendor,
};
pub use views::{
    ApplicationAggregate, Page, ProtocolAggregate, ProtocolVersionAggregate, ProviderAggregate,
    QualifiedApplicationVersion, QualifiedProtocolVersion, VendorAggregate,
};
