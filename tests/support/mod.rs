//! Shared integration test harness.
//!
//! Each test gets its own PostgreSQL schema and connection pool, so tests
//! can run in parallel against one database. Tests are skipped (not failed)
//! when no test database is configured; set `TEST_DATABASE_URL` (or
//! `QUAREG__DATABASE__URL`) to enable them.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{Method, Request, StatusCode},
    Router,
};
use quareg::{
    api::create_router,
    config::{Config, DatabaseConfig, LoggingConfig, ServerConfig},
    state::{AppState, AppStateOptions},
};
use serde_json::{json, Value};
use sqlx::Connection as _;
use tower::ServiceExt as _;
use url::Url;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    schema: String,
    admin_database_url: String,
}

fn test_database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("QUAREG__DATABASE__TEST_DATABASE_URL"))
        .or_else(|_| std::env::var("QUAREG__DATABASE__URL"))
        .ok()
}

fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::prelude::*;
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "quareg=info,sqlx=warn".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}

impl TestApp {
    /// Returns `None` when no test database is configured.
    pub async fn new() -> anyhow::Result<Option<Self>> {
        let Some(admin_database_url) = test_database_url() else {
            return Ok(None);
        };

        init_tracing();

        // Per-test schema and DB pool.
        let schema = format!("test_{}", Uuid::new_v4().simple());
        let mut admin_conn = sqlx::PgConnection::connect(&admin_database_url)
            .await
            .context("connect admin db for schema create")?;
        sqlx::query(&format!(r#"CREATE SCHEMA "{}""#, schema))
            .execute(&mut admin_conn)
            .await
            .context("create test schema")?;

        let config = Config {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: with_search_path(&admin_database_url, &schema)?,
                test_database_url: None,
                pool_min_size: 0,
                // Keep per-test pools small to avoid exhausting Postgres
                // connections when tests run in parallel.
                pool_max_size: 2,
                pool_timeout_seconds: 30,
            },
            logging: LoggingConfig::default(),
        };

        let state = AppState::new_with_options(
            config,
            AppStateOptions {
                run_migrations: true,
            },
        )
        .await
        .context("initialize AppState")?;

        let router = create_router(state.clone());

        Ok(Some(Self {
            router,
            state,
            schema,
            admin_database_url,
        }))
    }

    pub async fn cleanup(self) -> anyhow::Result<()> {
        self.state.db_pool.close().await;

        let mut admin_conn = sqlx::PgConnection::connect(&self.admin_database_url)
            .await
            .context("connect admin db for schema drop")?;
        sqlx::query(&format!(r#"DROP SCHEMA "{}" CASCADE"#, self.schema))
            .execute(&mut admin_conn)
            .await
            .context("drop test schema")?;

        Ok(())
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header("content-type", "application/json")
            .body(match body {
                Some(value) => Body::from(serde_json::to_vec(&value)?),
                None => Body::empty(),
            })
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let bytes: Bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("parse response body")?
        };

        Ok((status, value))
    }
}

fn with_search_path(database_url: &str, schema: &str) -> anyhow::Result<String> {
    let mut url = Url::parse(database_url).context("parse database URL")?;
    url.query_pairs_mut()
        .append_pair("options", &format!("-c search_path={}", schema));
    Ok(url.to_string())
}

// ---------------------------------------------------------------------------
// Fixtures

pub fn field_str(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string field {field} in {value}"))
        .to_string()
}

pub async fn create_vendor(app: &TestApp, kvk_number: &str, trade_name: &str) -> String {
    let (status, body) = app
        .request(
            Method::POST,
            "/v1/vendors",
            Some(json!({
                "kvk_number": kvk_number,
                "trade_name": trade_name,
                "statutory_name": format!("{trade_name} B.V."),
            })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED, "create vendor: {body}");
    field_str(&body, "id")
}

pub async fn create_role(app: &TestApp, name: &str) -> String {
    let (status, body) = app
        .request(
            Method::POST,
            "/v1/roles",
            Some(json!({ "name": name, "description": null })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED, "create role: {body}");
    field_str(&body, "id")
}

pub async fn create_system_type(app: &TestApp, name: &str) -> String {
    let (status, body) = app
        .request(
            Method::POST,
            "/v1/system-types",
            Some(json!({ "name": name, "description": null })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED, "create system type: {body}");
    field_str(&body, "id")
}

/// Registers an application with one version, one role and one system type;
/// returns the application response body.
pub async fn create_application(
    app: &TestApp,
    vendor_id: &str,
    name: &str,
    version: &str,
    roles: &[&str],
    system_types: &[&str],
) -> Value {
    let (status, body) = app
        .request(
            Method::POST,
            &format!("/v1/applications/vendors/{vendor_id}"),
            Some(json!({
                "name": name,
                "version": version,
                "roles": roles,
                "system_types": system_types,
            })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED, "create application: {body}");
    body
}

pub async fn create_protocol(app: &TestApp, name: &str) -> String {
    let (status, body) = app
        .request(
            Method::POST,
            "/v1/protocols",
            Some(json!({
                "protocol_type": "InformationStandard",
                "name": name,
                "description": null,
            })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED, "create protocol: {body}");
    field_str(&body, "id")
}

pub async fn create_protocol_version(app: &TestApp, protocol_id: &str, version: &str) -> String {
    let (status, body) = app
        .request(
            Method::POST,
            &format!("/v1/protocols/{protocol_id}/versions"),
            Some(json!({ "version": version, "description": null })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED, "create protocol version: {body}");
    field_str(&body, "id")
}

pub async fn create_provider(
    app: &TestApp,
    ura_code: &str,
    agb_code: &str,
    protocol_version_id: &str,
) -> String {
    let (status, body) = app
        .request(
            Method::POST,
            "/v1/healthcare-providers",
            Some(json!({
                "ura_code": ura_code,
                "agb_code": agb_code,
                "trade_name": "Testkliniek",
                "statutory_name": "Testkliniek B.V.",
                "protocol_version_id": protocol_version_id,
            })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED, "create provider: {body}");
    field_str(&body, "id")
}

/// Skip boilerplate: either an app or an early (passing) return.
#[macro_export]
macro_rules! require_test_db {
    () => {
        match support::TestApp::new().await? {
            Some(app) => app,
            None => {
                eprintln!("skipping: no test database configured (set TEST_DATABASE_URL)");
                return Ok(());
            }
        }
    };
}
