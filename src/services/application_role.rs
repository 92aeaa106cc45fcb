//! Application ↔ role assignment.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        aggregates::{get_or_not_found, load_application},
        ApplicationRoleLinks,
    },
    factory,
    models::{Application, ApplicationAggregate, Role},
    Error, Result,
};

#[derive(Clone)]
pub struct ApplicationRolesService {
    pool: PgPool,
}

impl ApplicationRolesService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_roles(&self, application_id: Uuid) -> Result<Vec<Role>> {
        let mut conn = self.pool.acquire().await?;
        get_or_not_found::<Application>(&mut conn, application_id, Error::ApplicationNotFound)
            .await?;
        ApplicationRoleLinks::roles_of(&mut conn, application_id).await
    }

    pub async fn assign_role(
        &self,
        application_id: Uuid,
        role_id: Uuid,
    ) -> Result<ApplicationAggregate> {
        let mut tx = self.pool.begin().await?;

        let application =
            get_or_not_found::<Application>(&mut tx, application_id, Error::ApplicationNotFound)
                .await?;
        let role = get_or_not_found::<Role>(&mut tx, role_id, Error::RoleNotFound).await?;

        let existing = ApplicationRoleLinks::get(&mut tx, application.id, role.id).await?;
        if existing.is_some() {
            return Err(Error::RoleAlreadyAssigned);
        }

        let link = factory::new_application_role(&application, &role);
        ApplicationRoleLinks::insert(&mut tx, &link).await?;

        let aggregate = load_application(&mut tx, application).await?;

        tx.commit().await?;
        Ok(aggregate)
    }

    /// An application must keep at least one role. The guard deliberately
    /// runs before the role and link lookups, so unassigning any role id
    /// from a single-role application reports the guard violation rather
    /// than a miss.
    pub async fn unassign_role(
        &self,
        application_id: Uuid,
        role_id: Uuid,
    ) -> Result<ApplicationAggregate> {
        let mut tx = self.pool.begin().await?;

        let application =
            get_or_not_found::<Application>(&mut tx, application_id, Error::ApplicationNotFound)
                .await?;

        let count = ApplicationRoleLinks::count_for_application(&mut tx, application.id).await?;
        if count <= 1 {
            return Err(Error::LastRole);
        }

        let role = get_or_not_found::<Role>(&mut tx, role_id, Error::RoleNotFound).await?;

        let removed = ApplicationRoleLinks::delete(&mut tx, application.id, role.id).await?;
        if removed == 0 {
            return Err(Error::RoleNotAssigned);
        }

        let aggregate = load_application(&mut tx, application).await?;

        tx.commit().await?;
        Ok(aggregate)
    }
}
