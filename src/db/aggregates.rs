//! Aggregate hydration.
//!
//! Loads the child rows a view needs around an already-fetched aggregate
//! root. All loaders run on the caller's connection so a service can return
//! a consistent view from the same transaction that mutated it.

use sqlx::postgres::PgConnection;
use uuid::Uuid;

use super::{
    links::{
        ApplicationQualifications, ApplicationRoleLinks, ApplicationTypeLinks,
        ProviderApplicationVersionLinks, ProviderQualifications,
    },
    repository::{Filter, Repository},
};
use crate::{
    models::{
        Application, ApplicationAggregate, ApplicationVersion, HealthcareProvider, Protocol,
        ProtocolAggregate, ProtocolVersion, ProtocolVersionAggregate, ProviderAggregate, Vendor,
        VendorAggregate,
    },
    Error, Result,
};

pub async fn load_application(
    conn: &mut PgConnection,
    application: Application,
) -> Result<ApplicationAggregate> {
    let vendor = Repository::<Vendor>::get(conn, &[Filter::eq("id", application.vendor_id)])
        .await?
        .ok_or(Error::VendorNotFound)?;
    let versions = Repository::<ApplicationVersion>::get_many(
        conn,
        None,
        None,
        &[Filter::eq("application_id", application.id)],
    )
    .await?;
    let roles = ApplicationRoleLinks::roles_of(conn, application.id).await?;
    let system_types = ApplicationTypeLinks::system_types_of(conn, application.id).await?;

    Ok(ApplicationAggregate {
        application,
        vendor,
        versions,
        roles,
        system_types,
    })
}

pub async fn load_applications(
    conn: &mut PgConnection,
    applications: Vec<Application>,
) -> Result<Vec<ApplicationAggregate>> {
    let mut aggregates = Vec::with_capacity(applications.len());
    for application in applications {
        aggregates.push(load_application(conn, application).await?);
    }
    Ok(aggregates)
}

pub async fn load_vendor(conn: &mut PgConnection, vendor: Vendor) -> Result<VendorAggregate> {
    let applications = Repository::<Application>::get_many(
        conn,
        None,
        None,
        &[Filter::eq("vendor_id", vendor.id)],
    )
    .await?;
    let applications = load_applications(conn, applications).await?;

    Ok(VendorAggregate {
        vendor,
        applications,
    })
}

pub async fn load_protocol(
    conn: &mut PgConnection,
    protocol: Protocol,
) -> Result<ProtocolAggregate> {
    let versions = Repository::<ProtocolVersion>::get_many(
        conn,
        None,
        None,
        &[Filter::eq("protocol_id", protocol.id)],
    )
    .await?;

    Ok(ProtocolAggregate { protocol, versions })
}

pub async fn load_protocol_version(
    conn: &mut PgConnection,
    protocol_version: ProtocolVersion,
) -> Result<ProtocolVersionAggregate> {
    let qualified_application_versions =
        ApplicationQualifications::qualified_application_versions_of(conn, protocol_version.id)
            .await?;

    Ok(ProtocolVersionAggregate {
        protocol_version,
        qualified_application_versions,
    })
}

pub async fn load_provider(
    conn: &mut PgConnection,
    provider: HealthcareProvider,
) -> Result<ProviderAggregate> {
    let application_versions =
        ProviderApplicationVersionLinks::application_versions_of(conn, provider.id).await?;
    let qualified_protocols =
        ProviderQualifications::qualified_protocols_of(conn, provider.id).await?;

    Ok(ProviderAggregate {
        provider,
        application_versions,
        qualified_protocols,
    })
}

/// Convenience: fetch an aggregate root by id or fail with the supplied
/// domain error.
pub async fn get_or_not_found<T: super::Entity>(
    conn: &mut PgConnection,
    id: Uuid,
    not_found: Error,
) -> Result<T> {
    match Repository::<T>::get(conn, &[Filter::eq("id", id)]).await? {
        Some(entity) => Ok(entity),
        None => Err(not_found),
    }
}
