//! Vendor lifecycle tests.

mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn created_vendor_can_be_fetched_with_equal_fields() -> anyhow::Result<()> {
    let app = require_test_db!();

    let (status, created) = app
        .request(
            Method::POST,
            "/v1/vendors",
            Some(json!({
                "kvk_number": "12345678",
                "trade_name": "Acme",
                "statutory_name": "Acme B.V.",
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let id = support::field_str(&created, "id");
    let (status, fetched) = app
        .request(Method::GET, &format!("/v1/vendors/{id}"), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    for field in ["id", "kvk_number", "trade_name", "statutory_name"] {
        assert_eq!(created.get(field), fetched.get(field), "field {field}");
    }

    let (status, by_kvk) = app
        .request(Method::GET, "/v1/vendors/kvk_number/12345678", None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_kvk.get("id"), created.get("id"));

    app.cleanup().await
}

#[tokio::test]
async fn duplicate_kvk_number_is_rejected_without_persisting() -> anyhow::Result<()> {
    let app = require_test_db!();

    support::create_vendor(&app, "11111111", "First").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/v1/vendors",
            Some(json!({
                "kvk_number": "11111111",
                "trade_name": "Second",
                "statutory_name": "Second B.V.",
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, page) = app.request(Method::GET, "/v1/vendors", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.get("total").and_then(|v| v.as_i64()), Some(1));

    app.cleanup().await
}

#[tokio::test]
async fn vendor_without_applications_is_deleted() -> anyhow::Result<()> {
    let app = require_test_db!();

    let id = support::create_vendor(&app, "22222222", "Deletable").await;

    let (status, _) = app
        .request(Method::DELETE, &format!("/v1/vendors/{id}"), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(Method::GET, &format!("/v1/vendors/{id}"), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.cleanup().await
}

#[tokio::test]
async fn vendor_with_applications_cannot_be_deleted() -> anyhow::Result<()> {
    let app = require_test_db!();

    let vendor_id = support::create_vendor(&app, "33333333", "Occupied").await;
    support::create_role(&app, "Viewer").await;
    support::create_system_type(&app, "XIS").await;
    support::create_application(&app, &vendor_id, "App1", "1.0.0", &["Viewer"], &["XIS"]).await;

    let (status, body) = app
        .request(Method::DELETE, &format!("/v1/vendors/{vendor_id}"), None)
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    // Vendor row remains.
    let (status, _) = app
        .request(Method::GET, &format!("/v1/vendors/{vendor_id}"), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    app.cleanup().await
}

#[tokio::test]
async fn unknown_vendor_is_not_found() -> anyhow::Result<()> {
    let app = require_test_db!();

    let (status, _) = app
        .request(
            Method::GET,
            "/v1/vendors/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.cleanup().await
}
