//! Application management.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        aggregates::{get_or_not_found, load_application, load_applications},
        ApplicationRoleLinks, ApplicationTypeLinks, Filter, Repository,
    },
    factory,
    models::{
        Application, ApplicationAggregate, ApplicationVersion, Page, Role, SystemType, Vendor,
    },
    Error, Result,
};

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_one(&self, application_id: Uuid) -> Result<ApplicationAggregate> {
        let mut conn = self.pool.acquire().await?;
        let application =
            get_or_not_found::<Application>(&mut conn, application_id, Error::ApplicationNotFound)
                .await?;
        load_application(&mut conn, application).await
    }

    pub async fn get_paginated(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Page<ApplicationAggregate>> {
        let mut conn = self.pool.acquire().await?;
        let applications =
            Repository::<Application>::get_many(&mut conn, Some(limit), Some(offset), &[]).await?;
        let total = Repository::<Application>::count(&mut conn, &[]).await?;
        let items = load_applications(&mut conn, applications).await?;

        Ok(Page {
            items,
            limit,
            offset,
            total,
        })
    }

    pub async fn get_by_vendor_id(&self, vendor_id: Uuid) -> Result<Vec<ApplicationAggregate>> {
        let mut conn = self.pool.acquire().await?;
        get_or_not_found::<Vendor>(&mut conn, vendor_id, Error::VendorNotFound).await?;
        let applications = Repository::<Application>::get_many(
            &mut conn,
            None,
            None,
            &[Filter::eq("vendor_id", vendor_id)],
        )
        .await?;
        load_applications(&mut conn, applications).await
    }

    /// Register an application for a vendor.
    ///
    /// Role and system-type names are resolved all-or-nothing: when any
    /// requested name does not exist the whole operation fails and nothing
    /// is persisted. The new application always starts with one version and
    /// link rows for every resolved role and system type.
    pub async fn add_one(
        &self,
        vendor_id: Uuid,
        application_name: &str,
        version: &str,
        role_names: &[String],
        system_type_names: &[String],
    ) -> Result<ApplicationAggregate> {
        let mut tx = self.pool.begin().await?;

        let vendor = get_or_not_found::<Vendor>(&mut tx, vendor_id, Error::VendorNotFound).await?;

        let roles = Repository::<Role>::get_by_property_exact(&mut tx, "name", role_names)
            .await
            .map_err(|err| match err {
                Error::EntryNotFound { .. } => Error::RoleNotFound,
                other => other,
            })?;
        let system_types =
            Repository::<SystemType>::get_by_property_exact(&mut tx, "name", system_type_names)
                .await
                .map_err(|err| match err {
                    Error::EntryNotFound { .. } => Error::SystemTypeNotFound,
                    other => other,
                })?;

        let existing = Repository::<Application>::get(
            &mut tx,
            &[
                Filter::eq("name", application_name),
                Filter::eq("vendor_id", vendor.id),
            ],
        )
        .await?;
        if existing.is_some() {
            return Err(Error::ApplicationAlreadyExists);
        }

        let new_application =
            factory::new_application(&vendor, application_name, version, &roles, &system_types);

        Repository::<Application>::create(&mut tx, &new_application.application).await?;
        Repository::<ApplicationVersion>::create(&mut tx, &new_application.first_version).await?;
        for link in &new_application.roles {
            ApplicationRoleLinks::insert(&mut tx, link).await?;
        }
        for link in &new_application.system_types {
            ApplicationTypeLinks::insert(&mut tx, link).await?;
        }

        let aggregate = load_application(&mut tx, new_application.application).await?;

        tx.commit().await?;
        Ok(aggregate)
    }

    /// Remove an application; versions and link rows go with it.
    pub async fn remove_one(&self, application_id: Uuid) -> Result<ApplicationAggregate> {
        let mut tx = self.pool.begin().await?;

        let application =
            get_or_not_found::<Application>(&mut tx, application_id, Error::ApplicationNotFound)
                .await?;
        let aggregate = load_application(&mut tx, application).await?;

        Repository::<Application>::delete(&mut tx, &aggregate.application).await?;

        tx.commit().await?;
        Ok(aggregate)
    }
}
