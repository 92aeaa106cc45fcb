//! Application state and composition root.
//!
//! Every service is constructed here, once, with its dependencies passed in
//! explicitly. Handlers receive the assembled [`AppState`] through axum's
//! state extraction; nothing is resolved through globals.

use anyhow::Context;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    db::MIGRATOR,
    services::{
        ApplicationQualificationService, ApplicationRolesService, ApplicationService,
        ApplicationSystemTypesService, ApplicationVersionService, HealthcareProviderService,
        ProtocolService, ProtocolVersionService, ProviderApplicationVersionService,
        ProviderQualificationService, RoleService, SystemTypeService, VendorService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
    pub vendors: VendorService,
    pub applications: ApplicationService,
    pub application_versions: ApplicationVersionService,
    pub application_roles: ApplicationRolesService,
    pub application_system_types: ApplicationSystemTypesService,
    pub roles: RoleService,
    pub system_types: SystemTypeService,
    pub protocols: ProtocolService,
    pub protocol_versions: ProtocolVersionService,
    pub healthcare_providers: HealthcareProviderService,
    pub provider_application_versions: ProviderApplicationVersionService,
    pub provider_qualifications: ProviderQualificationService,
    pub application_qualifications: ApplicationQualificationService,
}

pub struct AppStateOptions {
    pub run_migrations: bool,
}

impl Default for AppStateOptions {
    fn default() -> Self {
        Self {
            run_migrations: true,
        }
    }
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_options(config, AppStateOptions::default()).await
    }

    pub async fn new_with_options(
        config: Config,
        options: AppStateOptions,
    ) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .min_connections(config.database.pool_min_size)
            .max_connections(config.database.pool_max_size)
            .acquire_timeout(Duration::from_secs(config.database.pool_timeout_seconds))
            .connect(&config.database.url)
            .await
            .context("Failed to connect to database")?;

        if options.run_migrations {
            MIGRATOR
                .run(&db_pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self {
            config: Arc::new(config),
            vendors: VendorService::new(db_pool.clone()),
            applications: ApplicationService::new(db_pool.clone()),
            application_versions: ApplicationVersionService::new(db_pool.clone()),
            application_roles: ApplicationRolesService::new(db_pool.clone()),
            application_system_types: ApplicationSystemTypesService::new(db_pool.clone()),
            roles: RoleService::new(db_pool.clone()),
            system_types: SystemTypeService::new(db_pool.clone()),
            protocols: ProtocolService::new(db_pool.clone()),
            protocol_versions: ProtocolVersionService::new(db_pool.clone()),
            healthcare_providers: HealthcareProviderService::new(db_pool.clone()),
            provider_application_versions: ProviderApplicationVersionService::new(db_pool.clone()),
            provider_qualifications: ProviderQualificationService::new(db_pool.clone()),
            application_qualifications: ApplicationQualificationService::new(db_pool.clone()),
            db_pool,
        })
    }
}
