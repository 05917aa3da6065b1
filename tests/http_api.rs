//! HTTP resources and admin endpoints, driven over a real socket.

use annotation_server::lifecycle::{LifecycleState, StartupMode};
use reqwest::StatusCode;
use serde_json::Value;

mod common;

const TEXT: &str = "Berlin is the capital of Germany";

async fn start_service(admin: bool) -> (tempfile::TempDir, common::RunningService) {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_service(dir.path(), &["Default", "CoOccurrenceBased"], admin);
    let service = common::start(StartupMode::ConfigFile { path }).await;
    (dir, service)
}

fn uris(body: &Value) -> Vec<&str> {
    body["resources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["uri"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_annotate_returns_prefixed_uris() {
    let (_dir, service) = start_service(false).await;
    let client = reqwest::Client::new();

    let res = client
        .get(service.url("/rest/annotate"))
        .query(&[("text", TEXT)])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let body: Value = res.json().await.unwrap();
    assert_eq!(
        uris(&body),
        vec![
            "http://dbpedia.org/resource/Berlin",
            "http://dbpedia.org/resource/Capital_city",
            "http://dbpedia.org/resource/Germany",
        ]
    );
    assert_eq!(body["resources"][2]["surfaceForm"], "Germany");
    assert_eq!(body["resources"][2]["offset"], 25);

    service.lifecycle.shutdown().trigger();
    service.join().await.unwrap();
}

#[tokio::test]
async fn test_annotate_form_applies_thresholds() {
    let (_dir, service) = start_service(false).await;
    let client = reqwest::Client::new();

    let res = client
        .post(service.url("/rest/annotate"))
        .form(&[("text", TEXT), ("support", "100"), ("disambiguator", "Occurrences")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(
        uris(&body),
        vec!["http://dbpedia.org/resource/Berlin", "http://dbpedia.org/resource/Germany"]
    );
    assert_eq!(body["disambiguator"], "Occurrences");

    service.lifecycle.shutdown().trigger();
    service.join().await.unwrap();
}

#[tokio::test]
async fn test_input_errors_are_bad_requests() {
    let (_dir, service) = start_service(false).await;
    let client = reqwest::Client::new();

    let res = client
        .get(service.url("/rest/annotate"))
        .query(&[("text", TEXT), ("spotter", "NESpotter")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Specified spotter=NESpotter has not been loaded. Use one of [Default, CoOccurrenceBased]."
    );

    let res = client
        .get(service.url("/rest/annotate"))
        .query(&[("text", TEXT), ("support", "-5")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(service.url("/rest/spot"))
        .query(&[("text", TEXT), ("spotter", "default")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Specified parameter spotter=default is invalid."));

    service.lifecycle.shutdown().trigger();
    service.join().await.unwrap();
}

#[tokio::test]
async fn test_spot_and_request_id_echo() {
    let (_dir, service) = start_service(false).await;
    let client = reqwest::Client::new();

    let res = client
        .get(service.url("/rest/spot"))
        .query(&[("text", "Angela Merkel visited Berlin")])
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-request-id"], "trace-me");

    let body: Value = res.json().await.unwrap();
    let forms: Vec<_> = body["surfaceForms"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["surfaceForm"].as_str().unwrap())
        .collect();
    assert_eq!(forms, vec!["Angela Merkel", "Berlin"]);

    service.lifecycle.shutdown().trigger();
    service.join().await.unwrap();
}

#[tokio::test]
async fn test_admin_disabled_by_default() {
    let (_dir, service) = start_service(false).await;

    let res = reqwest::get(service.url("/admin/status")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    service.lifecycle.shutdown().trigger();
    service.join().await.unwrap();
}

#[tokio::test]
async fn test_admin_endpoints() {
    let (_dir, service) = start_service(true).await;
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", common::ADMIN_KEY);

    let res = client.get(service.url("/admin/status")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(service.url("/admin/status"))
        .header("Authorization", "Bearer wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let status: Value = client
        .get(service.url("/admin/status"))
        .header("Authorization", &bearer)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["state"], "Serving");
    assert_eq!(status["spotters"], 2);
    assert_eq!(status["disambiguators"], 2);

    let policies: Value = client
        .get(service.url("/admin/policies"))
        .header("Authorization", &bearer)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(policies["spotters"], serde_json::json!(["Default", "CoOccurrenceBased"]));
    assert_eq!(policies["disambiguators"], serde_json::json!(["Default", "Occurrences"]));

    // Unauthorized shutdown leaves the service running.
    let res = client.post(service.url("/admin/shutdown")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(service.lifecycle.state(), LifecycleState::Serving);

    let res = client
        .post(service.url("/admin/shutdown"))
        .header("Authorization", &bearer)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    let ack: Value = res.json().await.unwrap();
    assert_eq!(ack["triggered"], true);

    let lifecycle = service.lifecycle.clone();
    service.join().await.unwrap();
    assert_eq!(lifecycle.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn test_model_folder_service() {
    let dir = tempfile::tempdir().unwrap();
    common::write_model(dir.path(), Some("http://example.org/id/"), &["Default"]);

    let service = common::start(StartupMode::ModelFolder {
        folder: dir.path().to_path_buf(),
        listener_uri: "http://127.0.0.1:0/api/".to_string(),
    })
    .await;

    let body: Value = reqwest::Client::new()
        .get(service.url("/api/annotate"))
        .query(&[("text", "Germany")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(uris(&body), vec!["http://example.org/id/Germany"]);

    let res = reqwest::get(service.url("/rest/annotate?text=Germany")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    service.lifecycle.shutdown().trigger();
    service.join().await.unwrap();
}
