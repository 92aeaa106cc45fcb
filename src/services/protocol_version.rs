//! Protocol version management.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{aggregates::get_or_not_found, Filter, Repository},
    factory,
    models::{Protocol, ProtocolVersion},
    Error, Result,
};

#[derive(Clone)]
pub struct ProtocolVersionService {
    pool: PgPool,
}

impl ProtocolVersionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_one(&self, protocol_id: Uuid, version_id: Uuid) -> Result<ProtocolVersion> {
        let mut conn = self.pool.acquire().await?;
        get_or_not_found::<Protocol>(&mut conn, protocol_id, Error::ProtocolNotFound).await?;
        Repository::<ProtocolVersion>::get(
            &mut conn,
            &[
                Filter::eq("id", version_id),
                Filter::eq("protocol_id", protocol_id),
            ],
        )
        .await?
        .ok_or(Error::ProtocolVersionNotFound)
    }

    pub async fn get_for_protocol(&self, protocol_id: Uuid) -> Result<Vec<ProtocolVersion>> {
        let mut conn = self.pool.acquire().await?;
        get_or_not_found::<Protocol>(&mut conn, protocol_id, Error::ProtocolNotFound).await?;
        Repository::<ProtocolVersion>::get_many(
            &mut conn,
            None,
            None,
            &[Filter::eq("protocol_id", protocol_id)],
        )
        .await
    }

    pub async fn add_one(
        &self,
        protocol_id: Uuid,
        version: &str,
        description: Option<&str>,
    ) -> Result<ProtocolVersion> {
        let mut tx = self.pool.begin().await?;

        let protocol =
            get_or_not_found::<Protocol>(&mut tx, protocol_id, Error::ProtocolNotFound).await?;

        let protocol_version = factory::new_protocol_version(&protocol, version, description);
        Repository::<ProtocolVersion>::create(&mut tx, &protocol_version).await?;

        tx.commit().await?;
        Ok(protocol_version)
    }

    pub async fn remove_one(
        &self,
        protocol_id: Uuid,
        version_id: Uuid,
    ) -> Result<Vec<ProtocolVersion>> {
        let mut tx = self.pool.begin().await?;

        let protocol =
            get_or_not_found::<Protocol>(&mut tx, protocol_id, Error::ProtocolNotFound).await?;

        let version = Repository::<ProtocolVersion>::get(
            &mut tx,
            &[
                Filter::eq("id", version_id),
                Filter::eq("protocol_id", protocol.id),
            ],
        )
        .await?
        .ok_or(Error::ProtocolVersionNotFound)?;

        Repository::<ProtocolVersion>::delete(&mut tx, &version).await?;

        let versions = Repository::<ProtocolVersion>::get_many(
            &mut tx,
            None,
            None,
            &[Filter::eq("protocol_id", protocol.id)],
        )
        .await?;

        tx.commit().await?;
        Ok(versions)
    }
}
