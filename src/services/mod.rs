//! Service layer - business rules and transaction boundaries.
//!
//! Each service owns the pool and opens one transaction per mutating
//! operation; a failure anywhere inside an operation rolls the whole
//! operation back. Services are constructed once in the composition root
//! ([`crate::state::AppState`]) and injected into handlers via shared state.

pub mod application;
pub mod application_qualification;
pub mod application_role;
pub mod application_type;
pub mod application_version;
pub mod healthcare_provider;
pub mod protocol;
pub mod protocol_version;
pub mod provider_application_version;
pub mod provider_qualification;
pub mod role;
pub mod system_type;
pub mod vendor;

pub use application::ApplicationService;
pub use application_qualification::ApplicationQualificationService;
pub use application_role::ApplicationRolesService;
pub use application_type::ApplicationSystemTypesService;
pub use application_version::ApplicationVersionService;
pub use healthcare_provider::HealthcareProviderService;
pub use protocol::ProtocolService;
pub use protocol_version::ProtocolVersionService;
pub use provider_application_version::ProviderApplicationVersionService;
pub use provider_qualification::ProviderQualificationService;
pub use role::RoleService;
pub use system_type::SystemTypeService;
pub use vendor::VendorService;
