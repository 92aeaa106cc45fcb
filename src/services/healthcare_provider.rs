//! Healthcare provider management.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        aggregates::{get_or_not_found, load_provider},
        Filter, Repository,
    },
    factory,
    models::{HealthcareProvider, Page, ProtocolVersion, ProviderAggregate},
    Error, Result,
};

#[derive(Clone)]
pub struct HealthcareProviderService {
    pool: PgPool,
}

impl HealthcareProviderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_one(&self, provider_id: Uuid) -> Result<ProviderAggregate> {
        let mut conn = self.pool.acquire().await?;
        let provider = get_or_not_found::<HealthcareProvider>(
            &mut conn,
            provider_id,
            Error::HealthcareProviderNotFound,
        )
        .await?;
        load_provider(&mut conn, provider).await
    }

    pub async fn get_paginated(&self, limit: i64, offset: i64) -> Result<Page<ProviderAggregate>> {
        let mut conn = self.pool.acquire().await?;
        let providers =
            Repository::<HealthcareProvider>::get_many(&mut conn, Some(limit), Some(offset), &[])
                .await?;
        let total = Repository::<HealthcareProvider>::count(&mut conn, &[]).await?;

        let mut items = Vec::with_capacity(providers.len());
        for provider in providers {
            items.push(load_provider(&mut conn, provider).await?);
        }

        Ok(Page {
            items,
            limit,
            offset,
            total,
        })
    }

    /// Register a provider. URA and AGB codes are checked separately so the
    /// caller learns which one collides; the referenced protocol version
    /// must exist even though registration itself creates no qualification.
    pub async fn add_one(
        &self,
        ura_code: &str,
        agb_code: &str,
        trade_name: &str,
        statutory_name: &str,
        protocol_version_id: Uuid,
    ) -> Result<ProviderAggregate> {
        let mut tx = self.pool.begin().await?;

        let ura_exists =
            Repository::<HealthcareProvider>::get(&mut tx, &[Filter::eq("ura_code", ura_code)])
                .await?;
        if ura_exists.is_some() {
            return Err(Error::UraCodeAlreadyExists);
        }

        let agb_exists =
            Repository::<HealthcareProvider>::get(&mut tx, &[Filter::eq("agb_code", agb_code)])
                .await?;
        if agb_exists.is_some() {
            return Err(Error::AgbCodeAlreadyExists);
        }

        get_or_not_found::<ProtocolVersion>(
            &mut tx,
            protocol_version_id,
            Error::ProtocolVersionNotFound,
        )
        .await?;

        let provider =
            factory::new_healthcare_provider(ura_code, agb_code, trade_name, statutory_name);
        Repository::<HealthcareProvider>::create(&mut tx, &provider).await?;

        tx.commit().await?;
        Ok(ProviderAggregate {
            provider,
            application_versions: Vec::new(),
            qualified_protocols: Vec::new(),
        })
    }

    pub async fn remove_one(&self, provider_id: Uuid) -> Result<ProviderAggregate> {
        let mut tx = self.pool.begin().await?;

        let provider = get_or_not_found::<HealthcareProvider>(
            &mut tx,
            provider_id,
            Error::HealthcareProviderNotFound,
        )
        .await?;
        let aggregate = load_provider(&mut tx, provider).await?;

        Repository::<HealthcareProvider>::delete(&mut tx, &aggregate.provider).await?;

        tx.commit().await?;
        Ok(aggregate)
    }
}
