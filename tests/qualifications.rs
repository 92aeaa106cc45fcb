//! Qualification state machine: unqualified → qualified → archived.

mod support;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn provider_qualification_lifecycle() -> anyhow::Result<()> {
    let app = require_test_db!();

    let protocol_id = support::create_protocol(&app, "MedMij").await;
    let protocol_version_id = support::create_protocol_version(&app, &protocol_id, "1.0").await;
    let provider_id = support::create_provider(&app, "ura-1", "agb-1", &protocol_version_id).await;

    // Qualify.
    let (status, provider) = app
        .request(
            Method::POST,
            &format!("/v1/qualifications/{provider_id}/protocol-versions/{protocol_version_id}"),
            Some(json!({ "qualification_date": "2024-03-01" })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK, "{provider}");
    let qualified = provider["qualified_protocols"].as_array().unwrap();
    assert_eq!(qualified.len(), 1);
    assert_eq!(qualified[0]["qualification_date"], "2024-03-01");
    assert!(qualified[0]["archived_date"].is_null());

    // Qualifying the same pair again conflicts.
    let (status, body) = app
        .request(
            Method::POST,
            &format!("/v1/qualifications/{provider_id}/protocol-versions/{protocol_version_id}"),
            Some(json!({ "qualification_date": "2024-03-02" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    // Archive sets a non-null timestamp.
    let (status, provider) = app
        .request(
            Method::DELETE,
            &format!("/v1/qualifications/{provider_id}/protocol-versions/{protocol_version_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    let qualified = provider["qualified_protocols"].as_array().unwrap();
    assert_eq!(qualified.len(), 1);
    assert!(!qualified[0]["archived_date"].is_null());

    // Archival is terminal: a second archive conflicts...
    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/v1/qualifications/{provider_id}/protocol-versions/{protocol_version_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    // ...and so does re-qualifying the archived pair.
    let (status, body) = app
        .request(
            Method::POST,
            &format!("/v1/qualifications/{provider_id}/protocol-versions/{protocol_version_id}"),
            Some(json!({ "qualification_date": "2024-04-01" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    app.cleanup().await
}

#[tokio::test]
async fn archiving_a_never_qualified_pair_is_not_found() -> anyhow::Result<()> {
    let app = require_test_db!();

    let protocol_id = support::create_protocol(&app, "MedMij").await;
    let registered_version = support::create_protocol_version(&app, &protocol_id, "1.0").await;
    let other_version = support::create_protocol_version(&app, &protocol_id, "2.0").await;
    let provider_id = support::create_provider(&app, "ura-2", "agb-2", &registered_version).await;

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/v1/qualifications/{provider_id}/protocol-versions/{other_version}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

    app.cleanup().await
}

#[tokio::test]
async fn application_version_qualification_lifecycle() -> anyhow::Result<()> {
    let app = require_test_db!();

    let vendor_id = support::create_vendor(&app, "55555555", "Acme").await;
    support::create_role(&app, "R1").await;
    support::create_system_type(&app, "T1").await;
    let application =
        support::create_application(&app, &vendor_id, "App1", "1.0.0", &["R1"], &["T1"]).await;
    let application_version_id = support::field_str(&application["versions"][0], "id");

    let protocol_id = support::create_protocol(&app, "MedMij").await;
    let protocol_version_id = support::create_protocol_version(&app, &protocol_id, "1.0").await;

    // Qualify the application version against the protocol version.
    let (status, protocol_version) = app
        .request(
            Method::POST,
            &format!(
                "/v1/qualifications/{protocol_version_id}/application-versions/{application_version_id}"
            ),
            Some(json!({ "qualification_date": "2024-05-01" })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK, "{protocol_version}");
    let qualified = protocol_version["application_versions"].as_array().unwrap();
    assert_eq!(qualified.len(), 1);
    assert_eq!(qualified[0]["version"], "1.0.0");
    assert!(qualified[0]["archived_date"].is_null());

    // Duplicate qualification conflicts.
    let (status, body) = app
        .request(
            Method::POST,
            &format!(
                "/v1/qualifications/{protocol_version_id}/application-versions/{application_version_id}"
            ),
            Some(json!({ "qualification_date": "2024-05-02" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    // Archive, then verify terminal state.
    let (status, protocol_version) = app
        .request(
            Method::DELETE,
            &format!(
                "/v1/qualifications/{protocol_version_id}/application-versions/{application_version_id}"
            ),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    let qualified = protocol_version["application_versions"].as_array().unwrap();
    assert!(!qualified[0]["archived_date"].is_null());

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!(
                "/v1/qualifications/{protocol_version_id}/application-versions/{application_version_id}"
            ),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    app.cleanup().await
}

#[tokio::test]
async fn qualification_against_unknown_endpoints_is_not_found() -> anyhow::Result<()> {
    let app = require_test_db!();

    let protocol_id = support::create_protocol(&app, "MedMij").await;
    let protocol_version_id = support::create_protocol_version(&app, &protocol_id, "1.0").await;

    let missing = "00000000-0000-0000-0000-000000000000";
    let (status, body) = app
        .request(
            Method::POST,
            &format!("/v1/qualifications/{missing}/protocol-versions/{protocol_version_id}"),
            Some(json!({ "qualification_date": "2024-05-01" })),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/v1/qualifications/{protocol_version_id}/application-versions/{missing}"),
            Some(json!({ "qualification_date": "2024-05-01" })),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

    app.cleanup().await
}

#[tokio::test]
async fn qualifications_survive_listing_round_trips() -> anyhow::Result<()> {
    let app = require_test_db!();

    let protocol_id = support::create_protocol(&app, "MedMij").await;
    let protocol_version_id = support::create_protocol_version(&app, &protocol_id, "1.0").await;
    let provider_id = support::create_provider(&app, "ura-3", "agb-3", &protocol_version_id).await;

    let (_, _) = app
        .request(
            Method::POST,
            &format!("/v1/qualifications/{provider_id}/protocol-versions/{protocol_version_id}"),
            Some(json!({ "qualification_date": "2024-06-01" })),
        )
        .await?;

    let (status, fetched) = app
        .request(
            Method::GET,
            &format!("/v1/healthcare-providers/{provider_id}"),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    let qualified = fetched["qualified_protocols"].as_array().unwrap();
    assert_eq!(qualified.len(), 1);
    assert_eq!(
        qualified[0]["version_id"],
        Value::String(protocol_version_id.clone())
    );

    app.cleanup().await
}
