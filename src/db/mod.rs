//! Database layer - generic repository, link repositories and aggregate loading

pub mod aggregates;
pub mod entities;
pub mod links;
pub mod repository;

pub use links::{
    ApplicationQualifications, ApplicationRoleLinks, ApplicationTypeLinks,
    ProviderApplicationVersionLinks, ProviderQualifications,
};
pub use repository::{Entity, Filter, Repository, SqlValue};

/// Embedded schema migrations, applied at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
