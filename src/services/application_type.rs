//! Application ↔ system type assignment.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        aggregates::{get_or_not_found, load_application},
        ApplicationTypeLinks,
    },
    factory,
    models::{Application, ApplicationAggregate, SystemType},
    Error, Result,
};

#[derive(Clone)]
pub struct ApplicationSystemTypesService {
    pool: PgPool,
}

impl ApplicationSystemTypesService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_system_types(&self, application_id: Uuid) -> Result<Vec<SystemType>> {
        let mut conn = self.pool.acquire().await?;
        get_or_not_found::<Application>(&mut conn, application_id, Error::ApplicationNotFound)
            .await?;
        ApplicationTypeLinks::system_types_of(&mut conn, application_id).await
    }

    pub async fn assign_system_type(
        &self,
        application_id: Uuid,
        system_type_id: Uuid,
    ) -> Result<ApplicationAggregate> {
        let mut tx = self.pool.begin().await?;

        let application =
            get_or_not_found::<Application>(&mut tx, application_id, Error::ApplicationNotFound)
                .await?;
        let system_type =
            get_or_not_found::<SystemType>(&mut tx, system_type_id, Error::SystemTypeNotFound)
                .await?;

        let existing = ApplicationTypeLinks::get(&mut tx, application.id, system_type.id).await?;
        if existing.is_some() {
            return Err(Error::SystemTypeAlreadyAssigned);
        }

        let link = factory::new_application_type(&application, &system_type);
        ApplicationTypeLinks::insert(&mut tx, &link).await?;

        let aggregate = load_application(&mut tx, application).await?;

        tx.commit().await?;
        Ok(aggregate)
    }

    /// Same guard ordering as role unassignment: the last system type of an
    /// application cannot be removed, and the guard runs before the link
    /// lookup.
    pub async fn unassign_system_type(
        &self,
        application_id: Uuid,
        system_type_id: Uuid,
    ) -> Result<ApplicationAggregate> {
        let mut tx = self.pool.begin().await?;

        let application =
            get_or_not_found::<Application>(&mut tx, application_id, Error::ApplicationNotFound)
                .await?;

        let count = ApplicationTypeLinks::count_for_application(&mut tx, application.id).await?;
        if count <= 1 {
            return Err(Error::LastSystemType);
        }

        let system_type =
            get_or_not_found::<SystemType>(&mut tx, system_type_id, Error::SystemTypeNotFound)
                .await?;

        let removed = ApplicationTypeLinks::delete(&mut tx, application.id, system_type.id).await?;
        if removed == 0 {
            return Err(Error::SystemTypeNotAssigned);
        }

        let aggregate = load_application(&mut tx, application).await?;

        tx.commit().await?;
        Ok(aggregate)
    }
}
