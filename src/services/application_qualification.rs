//! Application version qualification lifecycle.
//!
//! Mirrors the provider qualification state machine for the
//! application-version ↔ protocol-version association: unqualified →
//! qualified → archived, archival terminal, rows never deleted.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        aggregates::{get_or_not_found, load_protocol_version},
        ApplicationQualifications,
    },
    factory,
    models::{ApplicationVersion, ProtocolVersion, ProtocolVersionAggregate},
    Error, Result,
};

#[derive(Clone)]
pub struct ApplicationQualificationService {
    pool: PgPool,
}

impl ApplicationQualificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn qualify(
        &self,
        protocol_version_id: Uuid,
        application_version_id: Uuid,
        qualification_date: NaiveDate,
    ) -> Result<ProtocolVersionAggregate> {
        let mut tx = self.pool.begin().await?;

        let protocol_version = get_or_not_found::<ProtocolVersion>(
            &mut tx,
            protocol_version_id,
            Error::ProtocolVersionNotFound,
        )
        .await?;
        let application_version = get_or_not_found::<ApplicationVersion>(
            &mut tx,
            application_version_id,
            Error::ApplicationVersionNotFound,
        )
        .await?;

        if let Some(existing) =
            ApplicationQualifications::get(&mut tx, application_version.id, protocol_version.id)
                .await?
        {
            if existing.archived_date.is_some() {
                return Err(Error::ApplicationVersionQualificationArchived);
            }
            return Err(Error::ApplicationVersionAlreadyQualified);
        }

        let qualification = factory::new_application_qualification(
            &application_version,
            &protocol_version,
            qualification_date,
        );
        ApplicationQualifications::insert(&mut tx, &qualification).await?;

        let aggregate = load_protocol_version(&mut tx, protocol_version).await?;

        tx.commit().await?;
        Ok(aggregate)
    }

    pub async fn archive(
        &self,
        protocol_version_id: Uuid,
        application_version_id: Uuid,
    ) -> Result<ProtocolVersionAggregate> {
        let mut tx = self.pool.begin().await?;

        let protocol_version = get_or_not_found::<ProtocolVersion>(
            &mut tx,
            protocol_version_id,
            Error::ProtocolVersionNotFound,
        )
        .await?;
        let application_version = get_or_not_found::<ApplicationVersion>(
            &mut tx,
            application_version_id,
            Error::ApplicationVersionNotFound,
        )
        .await?;

        let qualification =
            ApplicationQualifications::get(&mut tx, application_version.id, protocol_version.id)
                .await?
                .ok_or(Error::ApplicationVersionNotQualified)?;

        if qualification.archived_date.is_some() {
            return Err(Error::ApplicationVersionQualificationArchived);
        }

        ApplicationQualifications::archive(&mut tx, qualification.id, Utc::now()).await?;

        let aggregate = load_protocol_version(&mut tx, protocol_version).await?;

        tx.commit().await?;
        Ok(aggregate)
    }
}
