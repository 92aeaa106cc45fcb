//! Pure entity constructors.
//!
//! Factories take already-loaded parent entities (never bare ids) and return
//! unpersisted rows with fresh UUIDs and timestamps. They never touch the
//! database; persisting the result is the calling service's responsibility.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{
    Application, ApplicationRole, ApplicationType, ApplicationVersion, HealthcareProvider,
    HealthcareProviderApplicationVersion, HealthcareProviderQualification, Protocol,
    ProtocolApplicationQualification, ProtocolType, ProtocolVersion, Role, SystemType, Vendor,
};

pub fn new_vendor(kvk_number: &str, trade_name: &str, statutory_name: &str) -> Vendor {
    let now = Utc::now();
    Vendor {
        id: Uuid::new_v4(),
        kvk_number: kvk_number.to_string(),
        trade_name: trade_name.to_string(),
        statutory_name: statutory_name.to_string(),
        created_at: now,
        modified_at: now,
    }
}

pub fn new_role(name: &str, description: Option<&str>) -> Role {
    let now = Utc::now();
    Role {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.map(str::to_string),
        created_at: now,
        modified_at: now,
    }
}

pub fn new_system_type(name: &str, description: Option<&str>) -> SystemType {
    let now = Utc::now();
    SystemType {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.map(str::to_string),
        created_at: now,
        modified_at: now,
    }
}

pub fn new_protocol(
    protocol_type: ProtocolType,
    name: &str,
    description: Option<&str>,
) -> Protocol {
    let now = Utc::now();
    Protocol {
        id: Uuid::new_v4(),
        protocol_type,
        name: name.to_string(),
        description: description.map(str::to_string),
        created_at: now,
        modified_at: now,
    }
}

pub fn new_protocol_version(
    protocol: &Protocol,
    version: &str,
    description: Option<&str>,
) -> ProtocolVersion {
    let now = Utc::now();
    ProtocolVersion {
        id: Uuid::new_v4(),
        version: version.to_string(),
        description: description.map(str::to_string),
        protocol_id: protocol.id,
        created_at: now,
        modified_at: now,
    }
}

pub fn new_healthcare_provider(
    ura_code: &str,
    agb_code: &str,
    trade_name: &str,
    statutory_name: &str,
) -> HealthcareProvider {
    let now = Utc::now();
    HealthcareProvider {
        id: Uuid::new_v4(),
        ura_code: ura_code.to_string(),
        agb_code: agb_code.to_string(),
        trade_name: trade_name.to_string(),
        statutory_name: statutory_name.to_string(),
        created_at: now,
        modified_at: now,
    }
}

pub fn new_application_version(application: &Application, version: &str) -> ApplicationVersion {
    let now = Utc::now();
    ApplicationVersion {
        id: Uuid::new_v4(),
        version: version.to_string(),
        application_id: application.id,
        created_at: now,
        modified_at: now,
    }
}

pub fn new_application_role(application: &Application, role: &Role) -> ApplicationRole {
    let now = Utc::now();
    ApplicationRole {
        id: Uuid::new_v4(),
        application_id: application.id,
        role_id: role.id,
        created_at: now,
        modified_at: now,
    }
}

pub fn new_application_type(application: &Application, system_type: &SystemType) -> ApplicationType {
    let now = Utc::now();
    ApplicationType {
        id: Uuid::new_v4(),
        application_id: application.id,
        system_type_id: system_type.id,
        created_at: now,
        modified_at: now,
    }
}

/// A freshly constructed application together with its first version and the
/// association rows linking it to the requested roles and system types.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub application: Application,
    pub first_version: ApplicationVersion,
    pub roles: Vec<ApplicationRole>,
    pub system_types: Vec<ApplicationType>,
}

/// An application is never created bare: it always starts with one version
/// and link rows for every requested role and system type.
pub fn new_application(
    vendor: &Vendor,
    name: &str,
    version: &str,
    roles: &[Role],
    system_types: &[SystemType],
) -> NewApplication {
    let now = Utc::now();
    let application = Application {
        id: Uuid::new_v4(),
        name: name.to_string(),
        vendor_id: vendor.id,
        created_at: now,
        modified_at: now,
    };
    let first_version = new_application_version(&application, version);
    let roles = roles
        .iter()
        .map(|role| new_application_role(&application, role))
        .collect();
    let system_types = system_types
        .iter()
        .map(|system_type| new_application_type(&application, system_type))
        .collect();

    NewApplication {
        application,
        first_version,
        roles,
        system_types,
    }
}

pub fn new_provider_application_version(
    provider: &HealthcareProvider,
    application_version: &ApplicationVersion,
) -> HealthcareProviderApplicationVersion {
    let now = Utc::now();
    HealthcareProviderApplicationVersion {
        id: Uuid::new_v4(),
        healthcare_provider_id: provider.id,
        application_version_id: application_version.id,
        created_at: now,
        modified_at: now,
    }
}

pub fn new_provider_qualification(
    provider: &HealthcareProvider,
    protocol_version: &ProtocolVersion,
    qualification_date: NaiveDate,
) -> HealthcareProviderQualification {
    let now = Utc::now();
    HealthcareProviderQualification {
        id: Uuid::new_v4(),
        healthcare_provider_id: provider.id,
        protocol_version_id: protocol_version.id,
        qualification_date,
        archived_date: None,
        created_at: now,
        modified_at: now,
    }
}

pub fn new_application_qualification(
    application_version: &ApplicationVersion,
    protocol_version: &ProtocolVersion,
    qualification_date: NaiveDate,
) -> ProtocolApplicationQualification {
    let now = Utc::now();
    ProtocolApplicationQualification {
        id: Uuid::new_v4(),
        application_version_id: application_version.id,
        protocol_version_id: protocol_version.id,
        qualification_date,
        archived_date: None,
        created_at: now,
        modified_at: now,
    }
}
