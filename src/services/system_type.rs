//! System type management.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{aggregates::get_or_not_found, Filter, Repository},
    factory,
    models::{Page, SystemType},
    Error, Result,
};

#[derive(Clone)]
pub struct SystemTypeService {
    pool: PgPool,
}

impl SystemTypeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_one(&self, system_type_id: Uuid) -> Result<SystemType> {
        let mut conn = self.pool.acquire().await?;
        get_or_not_found::<SystemType>(&mut conn, system_type_id, Error::SystemTypeNotFound).await
    }

    pub async fn get_paginated(&self, limit: i64, offset: i64) -> Result<Page<SystemType>> {
        let mut conn = self.pool.acquire().await?;
        let items =
            Repository::<SystemType>::get_many(&mut conn, Some(limit), Some(offset), &[]).await?;
        let total = Repository::<SystemType>::count(&mut conn, &[]).await?;

        Ok(Page {
            items,
            limit,
            offset,
            total,
        })
    }

    pub async fn add_one(&self, name: &str, description: Option<&str>) -> Result<SystemType> {
        let mut tx = self.pool.begin().await?;

        let existing = Repository::<SystemType>::get(&mut tx, &[Filter::eq("name", name)]).await?;
        if existing.is_some() {
            return Err(Error::SystemTypeAlreadyExists);
        }

        let system_type = factory::new_system_type(name, description);
        Repository::<SystemType>::create(&mut tx, &system_type).await?;

        tx.commit().await?;
        Ok(system_type)
    }

    pub async fn remove_one(&self, system_type_id: Uuid) -> Result<SystemType> {
        let mut tx = self.pool.begin().await?;

        let system_type =
            get_or_not_found::<SystemType>(&mut tx, system_type_id, Error::SystemTypeNotFound)
                .await?;
        Repository::<SystemType>::delete(&mut tx, &system_type).await?;

        tx.commit().await?;
        Ok(system_type)
    }
}
