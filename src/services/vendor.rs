//! Vendor management.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        aggregates::{get_or_not_found, load_vendor},
        Filter, Repository,
    },
    factory,
    models::{Application, Page, Vendor, VendorAggregate},
    Error, Result,
};

#[derive(Clone)]
pub struct VendorService {
    pool: PgPool,
}

impl VendorService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_one(&self, vendor_id: Uuid) -> Result<VendorAggregate> {
        let mut conn = self.pool.acquire().await?;
        let vendor =
            get_or_not_found::<Vendor>(&mut conn, vendor_id, Error::VendorNotFound).await?;
        load_vendor(&mut conn, vendor).await
    }

    pub async fn get_one_by_kvk_number(&self, kvk_number: &str) -> Result<VendorAggregate> {
        let mut conn = self.pool.acquire().await?;
        let vendor = Repository::<Vendor>::get(&mut conn, &[Filter::eq("kvk_number", kvk_number)])
            .await?
            .ok_or(Error::VendorNotFound)?;
        load_vendor(&mut conn, vendor).await
    }

    pub async fn get_paginated(&self, limit: i64, offset: i64) -> Result<Page<VendorAggregate>> {
        let mut conn = self.pool.acquire().await?;
        let vendors =
            Repository::<Vendor>::get_many(&mut conn, Some(limit), Some(offset), &[]).await?;
        let total = Repository::<Vendor>::count(&mut conn, &[]).await?;

        let mut items = Vec::with_capacity(vendors.len());
        for vendor in vendors {
            items.push(load_vendor(&mut conn, vendor).await?);
        }

        Ok(Page {
            items,
            limit,
            offset,
            total,
        })
    }

    /// Vendors are keyed by KVK number; a duplicate registration is a
    /// conflict regardless of the other attributes.
    pub async fn add_one(
        &self,
        kvk_number: &str,
        trade_name: &str,
        statutory_name: &str,
    ) -> Result<Vendor> {
        let mut tx = self.pool.begin().await?;

        let existing =
            Repository::<Vendor>::get(&mut tx, &[Filter::eq("kvk_number", kvk_number)]).await?;
        if existing.is_some() {
            return Err(Error::VendorAlreadyExists);
        }

        let vendor = factory::new_vendor(kvk_number, trade_name, statutory_name);
        Repository::<Vendor>::create(&mut tx, &vendor).await?;

        tx.commit().await?;
        Ok(vendor)
    }

    /// A vendor that still owns applications cannot be removed.
    pub async fn remove_one(&self, vendor_id: Uuid) -> Result<Vendor> {
        let mut tx = self.pool.begin().await?;

        let vendor = get_or_not_found::<Vendor>(&mut tx, vendor_id, Error::VendorNotFound).await?;

        let applications =
            Repository::<Application>::count(&mut tx, &[Filter::eq("vendor_id", vendor.id)])
                .await?;
        if applications > 0 {
            return Err(Error::VendorHasApplications);
        }

        Repository::<Vendor>::delete(&mut tx, &vendor).await?;

        tx.commit().await?;
        Ok(vendor)
    }
}
