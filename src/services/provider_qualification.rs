//! Healthcare provider qualification lifecycle.
//!
//! A provider/protocol-version pair moves through exactly one path:
//! unqualified → qualified → archived. Archival stamps a timestamp and is
//! terminal; the qualification row is never deleted and never reactivated.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        aggregates::{get_or_not_found, load_provider},
        ProviderQualifications,
    },
    factory,
    models::{HealthcareProvider, ProtocolVersion, ProviderAggregate},
    Error, Result,
};

#[derive(Clone)]
pub struct ProviderQualificationService {
    pool: PgPool,
}

impl ProviderQualificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn qualify(
        &self,
        provider_id: Uuid,
        protocol_version_id: Uuid,
        qualification_date: NaiveDate,
    ) -> Result<ProviderAggregate> {
        let mut tx = self.pool.begin().await?;

        let provider = get_or_not_found::<HealthcareProvider>(
            &mut tx,
            provider_id,
            Error::HealthcareProviderNotFound,
        )
        .await?;
        let protocol_version = get_or_not_found::<ProtocolVersion>(
            &mut tx,
            protocol_version_id,
            Error::ProtocolVersionNotFound,
        )
        .await?;

        if let Some(existing) =
            ProviderQualifications::get(&mut tx, provider.id, protocol_version.id).await?
        {
            if existing.archived_date.is_some() {
                return Err(Error::ProviderQualificationArchived);
            }
            return Err(Error::ProviderAlreadyQualified);
        }

        let qualification =
            factory::new_provider_qualification(&provider, &protocol_version, qualification_date);
        ProviderQualifications::insert(&mut tx, &qualification).await?;

        let aggregate = load_provider(&mut tx, provider).await?;

        tx.commit().await?;
        Ok(aggregate)
    }

    pub async fn archive(
        &self,
        provider_id: Uuid,
        protocol_version_id: Uuid,
    ) -> Result<ProviderAggregate> {
        let mut tx = self.pool.begin().await?;

        let provider = get_or_not_found::<HealthcareProvider>(
            &mut tx,
            provider_id,
            Error::HealthcareProviderNotFound,
        )
        .await?;
        let protocol_version = get_or_not_found::<ProtocolVersion>(
            &mut tx,
            protocol_version_id,
            Error::ProtocolVersionNotFound,
        )
        .await?;

        let qualification =
            ProviderQualifications::get(&mut tx, provider.id, protocol_version.id)
                .await?
                .ok_or(Error::ProviderNotQualified)?;

        if qualification.archived_date.is_some() {
            return Err(Error::ProviderQualificationArchived);
        }

        ProviderQualifications::archive(&mut tx, qualification.id, Utc::now()).await?;

        let aggregate = load_provider(&mut tx, provider).await?;

        tx.commit().await?;
        Ok(aggregate)
    }
}
