//! Association-table repositories.
//!
//! Links are written through explicit statements against the association
//! tables rather than by mutating loaded object graphs, so the lifecycle of
//! every link (insert, delete, archive) is a single observable statement.
//! All methods run on a caller-supplied connection inside the service's
//! transaction.

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgConnection, Row};
use uuid::Uuid;

use crate::{
    models::{
        ApplicationRole, ApplicationType, ApplicationVersion, HealthcareProviderApplicationVersion,
        HealthcareProviderQualification, ProtocolApplicationQualification, ProtocolVersion,
        QualifiedApplicationVersion, QualifiedProtocolVersion, Role, SystemType,
    },
    Error, Result,
};

/// `applications_roles`: Application × Role.
pub struct ApplicationRoleLinks;

impl ApplicationRoleLinks {
    pub async fn insert(conn: &mut PgConnection, link: &ApplicationRole) -> Result<()> {
        sqlx::query(
            "INSERT INTO applications_roles (id, application_id, role_id, created_at, modified_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(link.id)
        .bind(link.application_id)
        .bind(link.role_id)
        .bind(link.created_at)
        .bind(link.modified_at)
        .execute(conn)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }

    pub async fn get(
        conn: &mut PgConnection,
        application_id: Uuid,
        role_id: Uuid,
    ) -> Result<Option<ApplicationRole>> {
        let link = sqlx::query_as::<_, ApplicationRole>(
            "SELECT * FROM applications_roles WHERE application_id = $1 AND role_id = $2",
        )
        .bind(application_id)
        .bind(role_id)
        .fetch_optional(conn)
        .await
        .map_err(Error::Database)?;

        Ok(link)
    }

    pub async fn delete(
        conn: &mut PgConnection,
        application_id: Uuid,
        role_id: Uuid,
    ) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM applications_roles WHERE application_id = $1 AND role_id = $2",
        )
        .bind(application_id)
        .bind(role_id)
        .execute(conn)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected())
    }

    pub async fn count_for_application(
        conn: &mut PgConnection,
        application_id: Uuid,
    ) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM applications_roles WHERE application_id = $1")
                .bind(application_id)
                .fetch_one(conn)
                .await
                .map_err(Error::Database)?;

        Ok(count)
    }

    /// Roles linked to an application, oldest link first.
    pub async fn roles_of(conn: &mut PgConnection, application_id: Uuid) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT r.*
             FROM roles r
             JOIN applications_roles ar ON ar.role_id = r.id
             WHERE ar.application_id = $1
             ORDER BY ar.created_at",
        )
        .bind(application_id)
        .fetch_all(conn)
        .await
        .map_err(Error::Database)?;

        Ok(roles)
    }
}

/// `applications_types`: Application × SystemType.
pub struct ApplicationTypeLinks;

impl ApplicationTypeLinks {
    pub async fn insert(conn: &mut PgConnection, link: &ApplicationType) -> Result<()> {
        sqlx::query(
            "INSERT INTO applications_types (id, application_id, system_type_id, created_at, modified_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(link.id)
        .bind(link.application_id)
        .bind(link.system_type_id)
        .bind(link.created_at)
        .bind(link.modified_at)
        .execute(conn)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }

    pub async fn get(
        conn: &mut PgConnection,
        application_id: Uuid,
        system_type_id: Uuid,
    ) -> Result<Option<ApplicationType>> {
        let link = sqlx::query_as::<_, ApplicationType>(
            "SELECT * FROM applications_types WHERE application_id = $1 AND system_type_id = $2",
        )
        .bind(application_id)
        .bind(system_type_id)
        .fetch_optional(conn)
        .await
        .map_err(Error::Database)?;

        Ok(link)
    }

    pub async fn delete(
        conn: &mut PgConnection,
        application_id: Uuid,
        system_type_id: Uuid,
    ) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM applications_types WHERE application_id = $1 AND system_type_id = $2",
        )
        .bind(application_id)
        .bind(system_type_id)
        .execute(conn)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected())
    }

    pub async fn count_for_application(
        conn: &mut PgConnection,
        application_id: Uuid,
    ) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM applications_types WHERE application_id = $1")
                .bind(application_id)
                .fetch_one(conn)
                .await
                .map_err(Error::Database)?;

        Ok(count)
    }

    pub async fn system_types_of(
        conn: &mut PgConnection,
        application_id: Uuid,
    ) -> Result<Vec<SystemType>> {
        let system_types = sqlx::query_as::<_, SystemType>(
            "SELECT st.*
             FROM system_types st
             JOIN applications_types apt ON apt.system_type_id = st.id
             WHERE apt.application_id = $1
             ORDER BY apt.created_at",
        )
        .bind(application_id)
        .fetch_all(conn)
        .await
        .map_err(Error::Database)?;

        Ok(system_types)
    }
}

/// `healthcare_providers_application_versions`: HealthcareProvider × ApplicationVersion.
pub struct ProviderApplicationVersionLinks;

impl ProviderApplicationVersionLinks {
    pub async fn insert(
        conn: &mut PgConnection,
        link: &HealthcareProviderApplicationVersion,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO healthcare_providers_application_versions
                 (id, healthcare_provider_id, application_version_id, created_at, modified_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(link.id)
        .bind(link.healthcare_provider_id)
        .bind(link.application_version_id)
        .bind(link.created_at)
        .bind(link.modified_at)
        .execute(conn)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }

    pub async fn get(
        conn: &mut PgConnection,
        healthcare_provider_id: Uuid,
        application_version_id: Uuid,
    ) -> Result<Option<HealthcareProviderApplicationVersion>> {
        let link = sqlx::query_as::<_, HealthcareProviderApplicationVersion>(
            "SELECT * FROM healthcare_providers_application_versions
             WHERE healthcare_provider_id = $1 AND application_version_id = $2",
        )
        .bind(healthcare_provider_id)
        .bind(application_version_id)
        .fetch_optional(conn)
        .await
        .map_err(Error::Database)?;

        Ok(link)
    }

    pub async fn delete(
        conn: &mut PgConnection,
        healthcare_provider_id: Uuid,
        application_version_id: Uuid,
    ) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM healthcare_providers_application_versions
             WHERE healthcare_provider_id = $1 AND application_version_id = $2",
        )
        .bind(healthcare_provider_id)
        .bind(application_version_id)
        .execute(conn)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected())
    }

    pub async fn application_versions_of(
        conn: &mut PgConnection,
        healthcare_provider_id: Uuid,
    ) -> Result<Vec<ApplicationVersion>> {
        let versions = sqlx::query_as::<_, ApplicationVersion>(
            "SELECT av.*
             FROM application_versions av
             JOIN healthcare_providers_application_versions pav
               ON pav.application_version_id = av.id
             WHERE pav.healthcare_provider_id = $1
             ORDER BY pav.created_at",
        )
        .bind(healthcare_provider_id)
        .fetch_all(conn)
        .await
        .map_err(Error::Database)?;

        Ok(versions)
    }
}

/// `healthcare_providers_qualifications`: HealthcareProvider × ProtocolVersion,
/// with qualification and archival dates.
pub struct ProviderQualifications;

impl ProviderQualifications {
    pub async fn insert(
        conn: &mut PgConnection,
        qualification: &HealthcareProviderQualification,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO healthcare_providers_qualifications
                 (id, healthcare_provider_id, protocol_version_id, qualification_date,
                  archived_date, created_at, modified_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(qualification.id)
        .bind(qualification.healthcare_provider_id)
        .bind(qualification.protocol_version_id)
        .bind(qualification.qualification_date)
        .bind(qualification.archived_date)
        .bind(qualification.created_at)
        .bind(qualification.modified_at)
        .execute(conn)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }

    pub async fn get(
        conn: &mut PgConnection,
        healthcare_provider_id: Uuid,
        protocol_version_id: Uuid,
    ) -> Result<Option<HealthcareProviderQualification>> {
        let qualification = sqlx::query_as::<_, HealthcareProviderQualification>(
            "SELECT * FROM healthcare_providers_qualifications
             WHERE healthcare_provider_id = $1 AND protocol_version_id = $2",
        )
        .bind(healthcare_provider_id)
        .bind(protocol_version_id)
        .fetch_optional(conn)
        .await
        .map_err(Error::Database)?;

        Ok(qualification)
    }

    /// Stamp the archival timestamp. The row is kept; archival is terminal.
    pub async fn archive(
        conn: &mut PgConnection,
        id: Uuid,
        archived_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE healthcare_providers_qualifications
             SET archived_date = $2, modified_at = $2
             WHERE id = $1",
        )
        .bind(id)
        .bind(archived_at)
        .execute(conn)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }

    pub async fn qualified_protocols_of(
        conn: &mut PgConnection,
        healthcare_provider_id: Uuid,
    ) -> Result<Vec<QualifiedProtocolVersion>> {
        let rows = sqlx::query(
            "SELECT q.id, q.healthcare_provider_id, q.protocol_version_id,
                    q.qualification_date, q.archived_date, q.created_at, q.modified_at,
                    pv.id AS pv_id, pv.version AS pv_version, pv.description AS pv_description,
                    pv.protocol_id AS pv_protocol_id, pv.created_at AS pv_created_at,
                    pv.modified_at AS pv_modified_at
             FROM healthcare_providers_qualifications q
             JOIN protocol_versions pv ON pv.id = q.protocol_version_id
             WHERE q.healthcare_provider_id = $1
             ORDER BY q.created_at",
        )
        .bind(healthcare_provider_id)
        .fetch_all(conn)
        .await
        .map_err(Error::Database)?;

        let qualified = rows
            .into_iter()
            .map(|row| QualifiedProtocolVersion {
                qualification: HealthcareProviderQualification {
                    id: row.get("id"),
                    healthcare_provider_id: row.get("healthcare_provider_id"),
                    protocol_version_id: row.get("protocol_version_id"),
                    qualification_date: row.get("qualification_date"),
                    archived_date: row.get("archived_date"),
                    created_at: row.get("created_at"),
                    modified_at: row.get("modified_at"),
                },
                protocol_version: ProtocolVersion {
                    id: row.get("pv_id"),
                    version: row.get("pv_version"),
                    description: row.get("pv_description"),
                    protocol_id: row.get("pv_protocol_id"),
                    created_at: row.get("pv_created_at"),
                    modified_at: row.get("pv_modified_at"),
                },
            })
            .collect();

        Ok(qualified)
    }
}

/// `protocol_application_qualifications`: ApplicationVersion × ProtocolVersion,
/// with qualification and archival dates.
pub struct ApplicationQualifications;

impl ApplicationQualifications {
    pub async fn insert(
        conn: &mut PgConnection,
        qualification: &ProtocolApplicationQualification,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO protocol_application_qualifications
                 (id, application_version_id, protocol_version_id, qualification_date,
                  archived_date, created_at, modified_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(qualification.id)
        .bind(qualification.application_version_id)
        .bind(qualification.protocol_version_id)
        .bind(qualification.qualification_date)
        .bind(qualification.archived_date)
        .bind(qualification.created_at)
        .bind(qualification.modified_at)
        .execute(conn)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }

    pub async fn get(
        conn: &mut PgConnection,
        application_version_id: Uuid,
        protocol_version_id: Uuid,
    ) -> Result<Option<ProtocolApplicationQualification>> {
        let qualification = sqlx::query_as::<_, ProtocolApplicationQualification>(
            "SELECT * FROM protocol_application_qualifications
             WHERE application_version_id = $1 AND protocol_version_id = $2",
        )
        .bind(application_version_id)
        .bind(protocol_version_id)
        .fetch_optional(conn)
        .await
        .map_err(Error::Database)?;

        Ok(qualification)
    }

    pub async fn archive(
        conn: &mut PgConnection,
        id: Uuid,
        archived_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE protocol_application_qualifications
             SET archived_date = $2, modified_at = $2
             WHERE id = $1",
        )
        .bind(id)
        .bind(archived_at)
        .execute(conn)
        .await
        .map_err(Error::Database)?;

        Ok(())
    }

    pub async fn qualified_application_versions_of(
        conn: &mut PgConnection,
        protocol_version_id: Uuid,
    ) -> Result<Vec<QualifiedApplicationVersion>> {
        let rows = sqlx::query(
            "SELECT q.id, q.application_version_id, q.protocol_version_id,
                    q.qualification_date, q.archived_date, q.created_at, q.modified_at,
                    av.id AS av_id, av.version AS av_version, av.application_id AS av_application_id,
                    av.created_at AS av_created_at, av.modified_at AS av_modified_at
             FROM protocol_application_qualifications q
             JOIN application_versions av ON av.id = q.application_version_id
             WHERE q.protocol_version_id = $1
             ORDER BY q.created_at",
        )
        .bind(protocol_version_id)
        .fetch_all(conn)
        .await
        .map_err(Error::Database)?;

        let qualified = rows
            .into_iter()
            .map(|row| QualifiedApplicationVersion {
                qualification: ProtocolApplicationQualification {
                    id: row.get("id"),
                    application_version_id: row.get("application_version_id"),
                    protocol_version_id: row.get("protocol_version_id"),
                    qualification_date: row.get("qualification_date"),
                    archived_date: row.get("archived_date"),
                    created_at: row.get("created_at"),
                    modified_at: row.get("modified_at"),
                },
                application_version: ApplicationVersion {
                    id: row.get("av_id"),
                    version: row.get("av_version"),
                    application_id: row.get("av_application_id"),
                    created_at: row.get("av_created_at"),
                    modified_at: row.get("av_modified_at"),
                },
            })
            .collect();

        Ok(qualified)
    }
}
