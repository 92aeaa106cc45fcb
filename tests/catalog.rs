//! Roles, system types, protocols and pagination behavior.

mod support;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn health_endpoint_responds() -> anyhow::Result<()> {
    let app = require_test_db!();

    let (status, body) = app.request(Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    app.cleanup().await
}

#[tokio::test]
async fn role_names_are_unique() -> anyhow::Result<()> {
    let app = require_test_db!();

    support::create_role(&app, "Viewer").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/v1/roles",
            Some(json!({ "name": "Viewer", "description": "again" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    app.cleanup().await
}

#[tokio::test]
async fn role_description_can_be_updated() -> anyhow::Result<()> {
    let app = require_test_db!();

    let role_id = support::create_role(&app, "Viewer").await;

    let (status, updated) = app
        .request(
            Method::PUT,
            &format!("/v1/roles/{role_id}"),
            Some(json!({ "description": "read-only access" })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "read-only access");

    let (_, fetched) = app
        .request(Method::GET, &format!("/v1/roles/{role_id}"), None)
        .await?;
    assert_eq!(fetched["description"], "read-only access");

    app.cleanup().await
}

#[tokio::test]
async fn protocol_lifecycle_with_versions() -> anyhow::Result<()> {
    let app = require_test_db!();

    let protocol_id = support::create_protocol(&app, "Medication Process").await;
    let version_id = support::create_protocol_version(&app, &protocol_id, "9.0").await;

    let (status, protocol) = app
        .request(Method::GET, &format!("/v1/protocols/{protocol_id}"), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(protocol["protocol_type"], "InformationStandard");
    assert_eq!(protocol["versions"].as_array().map(Vec::len), Some(1));

    let (status, version) = app
        .request(
            Method::GET,
            &format!("/v1/protocols/{protocol_id}/versions/{version_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(version["version"], "9.0");

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/v1/protocols/{protocol_id}/versions/{version_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(Method::DELETE, &format!("/v1/protocols/{protocol_id}"), None)
        .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(Method::GET, &format!("/v1/protocols/{protocol_id}"), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.cleanup().await
}

#[tokio::test]
async fn listing_is_paginated_with_total() -> anyhow::Result<()> {
    let app = require_test_db!();

    for i in 0..5 {
        support::create_role(&app, &format!("Role {i}")).await;
    }

    let (status, page) = app
        .request(Method::GET, "/v1/roles?limit=2&offset=0", None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(page["limit"].as_i64(), Some(2));
    assert_eq!(page["offset"].as_i64(), Some(0));
    assert_eq!(page["total"].as_i64(), Some(5));

    let (status, tail) = app
        .request(Method::GET, "/v1/roles?limit=2&offset=4", None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tail["items"].as_array().map(Vec::len), Some(1));

    // No overlap between the first page and the tail.
    let first_ids: Vec<&Value> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| &item["id"])
        .collect();
    assert!(!first_ids.contains(&&tail["items"][0]["id"]));

    app.cleanup().await
}

#[tokio::test]
async fn invalid_pagination_parameters_are_rejected() -> anyhow::Result<()> {
    let app = require_test_db!();

    let (status, _) = app.request(Method::GET, "/v1/roles?limit=0", None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .request(Method::GET, "/v1/roles?offset=-1", None)
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    app.cleanup().await
}

#[tokio::test]
async fn system_type_round_trip() -> anyhow::Result<()> {
    let app = require_test_db!();

    let system_type_id = support::create_system_type(&app, "XIS").await;

    let (status, fetched) = app
        .request(
            Method::GET,
            &format!("/v1/system-types/{system_type_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "XIS");

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/v1/system-types/{system_type_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            Method::GET,
            &format!("/v1/system-types/{system_type_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.cleanup().await
}
