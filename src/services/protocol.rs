//! Protocol management.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        aggregates::{get_or_not_found, load_protocol},
        Repository,
    },
    factory,
    models::{Page, Protocol, ProtocolAggregate, ProtocolType},
    Error, Result,
};

#[derive(Clone)]
pub struct ProtocolService {
    pool: PgPool,
}

impl ProtocolService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_one(&self, protocol_id: Uuid) -> Result<ProtocolAggregate> {
        let mut conn = self.pool.acquire().await?;
        let protocol =
            get_or_not_found::<Protocol>(&mut conn, protocol_id, Error::ProtocolNotFound).await?;
        load_protocol(&mut conn, protocol).await
    }

    pub async fn get_paginated(&self, limit: i64, offset: i64) -> Result<Page<ProtocolAggregate>> {
        let mut conn = self.pool.acquire().await?;
        let protocols =
            Repository::<Protocol>::get_many(&mut conn, Some(limit), Some(offset), &[]).await?;
        let total = Repository::<Protocol>::count(&mut conn, &[]).await?;

        let mut items = Vec::with_capacity(protocols.len());
        for protocol in protocols {
            items.push(load_protocol(&mut conn, protocol).await?);
        }

        Ok(Page {
            items,
            limit,
            offset,
            total,
        })
    }

    pub async fn add_one(
        &self,
        protocol_type: ProtocolType,
        name: &str,
        description: Option<&str>,
    ) -> Result<ProtocolAggregate> {
        let mut tx = self.pool.begin().await?;

        let protocol = factory::new_protocol(protocol_type, name, description);
        Repository::<Protocol>::create(&mut tx, &protocol).await?;

        tx.commit().await?;
        Ok(ProtocolAggregate {
            protocol,
            versions: Vec::new(),
        })
    }

    pub async fn remove_one(&self, protocol_id: Uuid) -> Result<ProtocolAggregate> {
        let mut tx = self.pool.begin().await?;

        let protocol =
            get_or_not_found::<Protocol>(&mut tx, protocol_id, Error::ProtocolNotFound).await?;
        let aggregate = load_protocol(&mut tx, protocol).await?;
        Repository::<Protocol>::delete(&mut tx, &aggregate.protocol).await?;

        tx.commit().await?;
        Ok(aggregate)
    }
}
