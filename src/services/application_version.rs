//! Application version management.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{aggregates::get_or_not_found, Filter, Repository},
    factory,
    models::{Application, ApplicationVersion},
    Error, Result,
};

#[derive(Clone)]
pub struct ApplicationVersionService {
    pool: PgPool,
}

impl ApplicationVersionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_for_application(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<ApplicationVersion>> {
        let mut conn = self.pool.acquire().await?;
        get_or_not_found::<Application>(&mut conn, application_id, Error::ApplicationNotFound)
            .await?;
        Repository::<ApplicationVersion>::get_many(
            &mut conn,
            None,
            None,
            &[Filter::eq("application_id", application_id)],
        )
        .await
    }

    pub async fn add_one(
        &self,
        application_id: Uuid,
        version: &str,
    ) -> Result<Vec<ApplicationVersion>> {
        let mut tx = self.pool.begin().await?;

        let application =
            get_or_not_found::<Application>(&mut tx, application_id, Error::ApplicationNotFound)
                .await?;

        let new_version = factory::new_application_version(&application, version);
        Repository::<ApplicationVersion>::create(&mut tx, &new_version).await?;

        let versions = Repository::<ApplicationVersion>::get_many(
            &mut tx,
            None,
            None,
            &[Filter::eq("application_id", application.id)],
        )
        .await?;

        tx.commit().await?;
        Ok(versions)
    }

    /// An application must keep at least one version. The guard runs before
    /// the version lookup, so removing an unknown version from a singleton
    /// collection reports the guard violation, not a miss.
    pub async fn remove_one(
        &self,
        application_id: Uuid,
        version_id: Uuid,
    ) -> Result<Vec<ApplicationVersion>> {
        let mut tx = self.pool.begin().await?;

        let application =
            get_or_not_found::<Application>(&mut tx, application_id, Error::ApplicationNotFound)
                .await?;

        let count = Repository::<ApplicationVersion>::count(
            &mut tx,
            &[Filter::eq("application_id", application.id)],
        )
        .await?;
        if count <= 1 {
            return Err(Error::LastApplicationVersion);
        }

        let version = Repository::<ApplicationVersion>::get(
            &mut tx,
            &[
                Filter::eq("id", version_id),
                Filter::eq("application_id", application.id),
            ],
        )
        .await?
        .ok_or(Error::ApplicationVersionNotFound)?;

        Repository::<ApplicationVersion>::delete(&mut tx, &version).await?;

        let versions = Repository::<ApplicationVersion>::get_many(
            &mut tx,
            None,
            None,
            &[Filter::eq("application_id", application.id)],
        )
        .await?;

        tx.commit().await?;
        Ok(versions)
    }
}
