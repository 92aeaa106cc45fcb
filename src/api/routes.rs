//! Registry API routes.
//!
//! All routes are mounted under `/v1` by [`crate::api::create_router`].

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    applications, healthcare_providers, protocols, qualifications, roles, system_types, vendors,
};
use crate::state::AppState;

pub fn registry_routes() -> Router<AppState> {
    Router::new()
        // Vendors
        .route(
            "/vendors",
            get(vendors::get_vendors).post(vendors::add_one_vendor),
        )
        .route(
            "/vendors/kvk_number/:kvk_number",
            get(vendors::get_vendor_by_kvk_number),
        )
        .route(
            "/vendors/:vendor_id",
            get(vendors::get_vendor_by_id).delete(vendors::delete_vendor_by_id),
        )
        // Applications (exact sub-paths before the parameterized id routes)
        .route("/applications", get(applications::get_applications))
        .route(
            "/applications/vendors/:vendor_id",
            get(applications::get_vendor_applications)
                .post(applications::register_vendor_application),
        )
        .route(
            "/applications/:application_id",
            get(applications::get_application_by_id).delete(applications::delete_application_by_id),
        )
        .route(
            "/applications/:application_id/versions",
            get(applications::get_application_versions)
                .post(applications::add_application_version),
        )
        .route(
            "/applications/:application_id/versions/:version_id",
            delete(applications::delete_application_version),
        )
        .route(
            "/applications/:application_id/roles",
            get(applications::get_application_roles),
        )
        .route(
            "/applications/:application_id/system-types",
            get(applications::get_application_system_types),
        )
        .route(
            "/applications/:application_id/roles/:role_id",
            patch(applications::assign_application_role)
                .delete(applications::unassign_application_role),
        )
        .route(
            "/applications/:application_id/system-types/:system_type_id",
            post(applications::assign_application_system_type)
                .delete(applications::unassign_application_system_type),
        )
        // Roles
        .route("/roles", get(roles::get_roles).post(roles::create_role))
        .route(
            "/roles/:role_id",
            get(roles::get_role_by_id)
                .put(roles::update_role_description)
                .delete(roles::delete_role),
        )
        // System types
        .route(
            "/system-types",
            get(system_types::get_system_types).post(system_types::create_system_type),
        )
        .route(
            "/system-types/:system_type_id",
            get(system_types::get_system_type_by_id).delete(system_types::delete_system_type),
        )
        // Protocols
        .route(
            "/protocols",
            get(protocols::get_protocols).post(protocols::create_protocol),
        )
        .route(
            "/protocols/:protocol_id",
            get(protocols::get_protocol_by_id).delete(protocols::delete_protocol),
        )
        .route(
            "/protocols/:protocol_id/versions",
            get(protocols::get_protocol_versions).post(protocols::add_protocol_version),
        )
        .route(
            "/protocols/:protocol_id/versions/:version_id",
            get(protocols::get_protocol_version).delete(protocols::delete_protocol_version),
        )
        // Healthcare providers
        .route(
            "/healthcare-providers",
            get(healthcare_providers::get_healthcare_providers)
                .post(healthcare_providers::register_healthcare_provider),
        )
        .route(
            "/healthcare-providers/:provider_id",
            get(healthcare_providers::get_healthcare_provider_by_id)
                .delete(healthcare_providers::deregister_healthcare_provider),
        )
        .route(
            "/healthcare-providers/:provider_id/application-versions",
            get(healthcare_providers::get_application_versions),
        )
        .route(
            "/healthcare-providers/:provider_id/application-versions/:version_id",
            post(healthcare_providers::register_application_version)
                .delete(healthcare_providers::deregister_application_version),
        )
        // Qualifications
        .route(
            "/qualifications/:protocol_version_id/application-versions/:application_version_id",
            post(qualifications::qualify_application_version)
                .delete(qualifications::archive_application_version_qualification),
        )
        .route(
            "/qualifications/:provider_id/protocol-versions/:protocol_version_id",
            post(qualifications::qualify_healthcare_provider)
                .delete(qualifications::archive_healthcare_provider_qualification),
        )
}
