//! Role management.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{aggregates::get_or_not_found, Filter, Repository},
    factory,
    models::{Page, Role},
    Error, Result,
};

#[derive(Clone)]
pub struct RoleService {
    pool: PgPool,
}

impl RoleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_one(&self, role_id: Uuid) -> Result<Role> {
        let mut conn = self.pool.acquire().await?;
        get_or_not_found::<Role>(&mut conn, role_id, Error::RoleNotFound).await
    }

    pub async fn get_paginated(&self, limit: i64, offset: i64) -> Result<Page<Role>> {
        let mut conn = self.pool.acquire().await?;
        let items = Repository::<Role>::get_many(&mut conn, Some(limit), Some(offset), &[]).await?;
        let total = Repository::<Role>::count(&mut conn, &[]).await?;

        Ok(Page {
            items,
            limit,
            offset,
            total,
        })
    }

    pub async fn add_one(&self, name: &str, description: Option<&str>) -> Result<Role> {
        let mut tx = self.pool.begin().await?;

        let existing = Repository::<Role>::get(&mut tx, &[Filter::eq("name", name)]).await?;
        if existing.is_some() {
            return Err(Error::RoleAlreadyExists);
        }

        let role = factory::new_role(name, description);
        Repository::<Role>::create(&mut tx, &role).await?;

        tx.commit().await?;
        Ok(role)
    }

    pub async fn update_description(
        &self,
        role_id: Uuid,
        description: Option<&str>,
    ) -> Result<Role> {
        let mut tx = self.pool.begin().await?;

        let mut role = get_or_not_found::<Role>(&mut tx, role_id, Error::RoleNotFound).await?;
        role.description = description.map(str::to_string);
        role.modified_at = Utc::now();
        Repository::<Role>::update(&mut tx, &role).await?;

        tx.commit().await?;
        Ok(role)
    }

    pub async fn remove_one(&self, role_id: Uuid) -> Result<Role> {
        let mut tx = self.pool.begin().await?;

        let role = get_or_not_found::<Role>(&mut tx, role_id, Error::RoleNotFound).await?;
        Repository::<Role>::delete(&mut tx, &role).await?;

        tx.commit().await?;
        Ok(role)
    }
}
