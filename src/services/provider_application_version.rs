//! Healthcare provider ↔ application version registration.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        aggregates::{get_or_not_found, load_provider},
        ProviderApplicationVersionLinks,
    },
    factory,
    models::{ApplicationVersion, HealthcareProvider, ProviderAggregate},
    Error, Result,
};

#[derive(Clone)]
pub struct ProviderApplicationVersionService {
    pool: PgPool,
}

impl ProviderApplicationVersionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_application_versions(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<ApplicationVersion>> {
        let mut conn = self.pool.acquire().await?;
        get_or_not_found::<HealthcareProvider>(
            &mut conn,
            provider_id,
            Error::HealthcareProviderNotFound,
        )
        .await?;
        ProviderApplicationVersionLinks::application_versions_of(&mut conn, provider_id).await
    }

    pub async fn assign_application_version(
        &self,
        provider_id: Uuid,
        application_version_id: Uuid,
    ) -> Result<ProviderAggregate> {
        let mut tx = self.pool.begin().await?;

        let provider = get_or_not_found::<HealthcareProvider>(
            &mut tx,
            provider_id,
            Error::HealthcareProviderNotFound,
        )
        .await?;
        let application_version = get_or_not_found::<ApplicationVersion>(
            &mut tx,
            application_version_id,
            Error::ApplicationVersionNotFound,
        )
        .await?;

        let existing =
            ProviderApplicationVersionLinks::get(&mut tx, provider.id, application_version.id)
                .await?;
        if existing.is_some() {
            return Err(Error::ApplicationVersionAlreadyRegistered);
        }

        let link = factory::new_provider_application_version(&provider, &application_version);
        ProviderApplicationVersionLinks::insert(&mut tx, &link).await?;

        let aggregate = load_provider(&mut tx, provider).await?;

        tx.commit().await?;
        Ok(aggregate)
    }

    pub async fn unassign_application_version(
        &self,
        provider_id: Uuid,
        application_version_id: Uuid,
    ) -> Result<ProviderAggregate> {
        let mut tx = self.pool.begin().await?;

        let provider = get_or_not_found::<HealthcareProvider>(
            &mut tx,
            provider_id,
            Error::HealthcareProviderNotFound,
        )
        .await?;
        let application_version = get_or_not_found::<ApplicationVersion>(
            &mut tx,
            application_version_id,
            Error::ApplicationVersionNotFound,
        )
        .await?;

        let removed =
            ProviderApplicationVersionLinks::delete(&mut tx, provider.id, application_version.id)
                .await?;
        if removed == 0 {
            return Err(Error::ApplicationVersionNotRegistered);
        }

        let aggregate = load_provider(&mut tx, provider).await?;

        tx.commit().await?;
        Ok(aggregate)
    }
}
