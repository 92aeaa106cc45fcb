//! Application registration, versions, roles and system types.

mod support;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

fn array_len(value: &Value, field: &str) -> usize {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or_else(|| panic!("missing array field {field} in {value}"))
}

#[tokio::test]
async fn registering_an_application_wires_version_roles_and_types() -> anyhow::Result<()> {
    let app = require_test_db!();

    let vendor_id = support::create_vendor(&app, "12345600", "Acme").await;
    support::create_role(&app, "R1").await;
    support::create_system_type(&app, "T1").await;

    let application =
        support::create_application(&app, &vendor_id, "App1", "1.0.0", &["R1"], &["T1"]).await;

    let versions = application["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0]["version"], "1.0.0");
    assert_eq!(application["roles"][0]["name"], "R1");
    assert_eq!(application["system_types"][0]["name"], "T1");
    assert_eq!(application["vendor"]["kvk_number"], "12345600");

    app.cleanup().await
}

#[tokio::test]
async fn unknown_role_name_fails_the_whole_registration() -> anyhow::Result<()> {
    let app = require_test_db!();

    let vendor_id = support::create_vendor(&app, "12345601", "Acme").await;
    support::create_role(&app, "Known").await;
    support::create_system_type(&app, "T1").await;

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/v1/applications/vendors/{vendor_id}"),
            Some(json!({
                "name": "App1",
                "version": "1.0.0",
                "roles": ["Known", "Unknown"],
                "system_types": ["T1"],
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

    // Nothing persisted.
    let (status, page) = app.request(Method::GET, "/v1/applications", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.get("total").and_then(Value::as_i64), Some(0));

    app.cleanup().await
}

#[tokio::test]
async fn duplicate_application_name_for_vendor_is_rejected() -> anyhow::Result<()> {
    let app = require_test_db!();

    let vendor_id = support::create_vendor(&app, "12345602", "Acme").await;
    support::create_role(&app, "R1").await;
    support::create_system_type(&app, "T1").await;
    support::create_application(&app, &vendor_id, "App1", "1.0.0", &["R1"], &["T1"]).await;

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/v1/applications/vendors/{vendor_id}"),
            Some(json!({
                "name": "App1",
                "version": "2.0.0",
                "roles": ["R1"],
                "system_types": ["T1"],
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    app.cleanup().await
}

#[tokio::test]
async fn assigning_the_same_role_twice_conflicts() -> anyhow::Result<()> {
    let app = require_test_db!();

    let vendor_id = support::create_vendor(&app, "12345603", "Acme").await;
    support::create_role(&app, "R1").await;
    let extra_role_id = support::create_role(&app, "R2").await;
    support::create_system_type(&app, "T1").await;
    let application =
        support::create_application(&app, &vendor_id, "App1", "1.0.0", &["R1"], &["T1"]).await;
    let application_id = support::field_str(&application, "id");

    let (status, first) = app
        .request(
            Method::PATCH,
            &format!("/v1/applications/{application_id}/roles/{extra_role_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(array_len(&first, "roles"), 2);

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/v1/applications/{application_id}/roles/{extra_role_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    // Role collection unchanged after the failed call.
    let (_, fetched) = app
        .request(
            Method::GET,
            &format!("/v1/applications/{application_id}"),
            None,
        )
        .await?;
    assert_eq!(array_len(&fetched, "roles"), 2);

    app.cleanup().await
}

#[tokio::test]
async fn last_role_cannot_be_unassigned_for_any_role_id() -> anyhow::Result<()> {
    let app = require_test_db!();

    let vendor_id = support::create_vendor(&app, "12345604", "Acme").await;
    let role_id = support::create_role(&app, "Only").await;
    support::create_system_type(&app, "T1").await;
    let application =
        support::create_application(&app, &vendor_id, "App1", "1.0.0", &["Only"], &["T1"]).await;
    let application_id = support::field_str(&application, "id");

    // The guard fires before the role lookup: a nonexistent role id on a
    // single-role application still reports the delete guard, not 404.
    let (status, body) = app
        .request(
            Method::DELETE,
            &format!(
                "/v1/applications/{application_id}/roles/00000000-0000-0000-0000-000000000000"
            ),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/v1/applications/{application_id}/roles/{role_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    app.cleanup().await
}

#[tokio::test]
async fn unassigning_an_unassigned_role_reports_not_found() -> anyhow::Result<()> {
    let app = require_test_db!();

    let vendor_id = support::create_vendor(&app, "12345605", "Acme").await;
    support::create_role(&app, "R1").await;
    support::create_role(&app, "R2").await;
    let loose_role_id = support::create_role(&app, "Loose").await;
    support::create_system_type(&app, "T1").await;
    let application =
        support::create_application(&app, &vendor_id, "App1", "1.0.0", &["R1", "R2"], &["T1"])
            .await;
    let application_id = support::field_str(&application, "id");

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/v1/applications/{application_id}/roles/{loose_role_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

    app.cleanup().await
}

#[tokio::test]
async fn last_application_version_cannot_be_removed() -> anyhow::Result<()> {
    let app = require_test_db!();

    let vendor_id = support::create_vendor(&app, "12345606", "Acme").await;
    support::create_role(&app, "R1").await;
    support::create_system_type(&app, "T1").await;
    let application =
        support::create_application(&app, &vendor_id, "App1", "1.0.0", &["R1"], &["T1"]).await;
    let application_id = support::field_str(&application, "id");
    let version_id = support::field_str(&application["versions"][0], "id");

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/v1/applications/{application_id}/versions/{version_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    // A second version unblocks removal of the first.
    let (status, versions) = app
        .request(
            Method::POST,
            &format!("/v1/applications/{application_id}/versions"),
            Some(json!({ "version": "2.0.0" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(versions.as_array().map(Vec::len), Some(2));

    let (status, remaining) = app
        .request(
            Method::DELETE,
            &format!("/v1/applications/{application_id}/versions/{version_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(remaining.as_array().map(Vec::len), Some(1));
    assert_eq!(remaining[0]["version"], "2.0.0");

    app.cleanup().await
}

#[tokio::test]
async fn deleting_an_application_cascades_to_children() -> anyhow::Result<()> {
    let app = require_test_db!();

    let vendor_id = support::create_vendor(&app, "12345607", "Acme").await;
    support::create_role(&app, "R1").await;
    support::create_system_type(&app, "T1").await;
    let application =
        support::create_application(&app, &vendor_id, "App1", "1.0.0", &["R1"], &["T1"]).await;
    let application_id = support::field_str(&application, "id");

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/v1/applications/{application_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            Method::GET,
            &format!("/v1/applications/{application_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The vendor is free again.
    let (status, _) = app
        .request(Method::DELETE, &format!("/v1/vendors/{vendor_id}"), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    app.cleanup().await
}
