//! HTTP-level integration tests for the `/api/projects` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use std::collections::HashSet;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use common::{body_json, get, patch_json, post_json, send_raw, TestApp};
use serde_json::json;

fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_defaults() {
    let app = TestApp::new();
    let response = post_json(
        app.router(),
        "/api/projects",
        json!({"name": "Website redesign", "client": "Acme Corp"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Website redesign");
    assert_eq!(json["client"], "Acme Corp");
    assert_eq!(json["status"], "PLANNED");
    assert!(json["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(json["createdAt"], json["updatedAt"]);
    assert!(json.get("description").is_none());
}

#[tokio::test]
async fn create_trims_fields() {
    let app = TestApp::new();
    let json = app
        .create(json!({
            "name": "  Mobile app ",
            "client": " Globex ",
            "status": "IN_PROGRESS",
            "description": "  iOS first  ",
        }))
        .await;

    assert_eq!(json["name"], "Mobile app");
    assert_eq!(json["client"], "Globex");
    assert_eq!(json["status"], "IN_PROGRESS");
    assert_eq!(json["description"], "iOS first");
}

#[tokio::test]
async fn create_one_char_name_is_rejected() {
    let app = TestApp::new();
    let response = post_json(
        app.router(),
        "/api/projects",
        json!({"name": "A", "client": "Acme Corp"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn create_two_char_name_is_accepted() {
    let app = TestApp::new();
    let json = app.create(json!({"name": "AB", "client": "Acme Corp"})).await;
    assert_eq!(json["name"], "AB");
}

#[tokio::test]
async fn create_missing_client_names_client() {
    let app = TestApp::new();
    let response = post_json(app.router(), "/api/projects", json!({"name": "Site"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("client"));
}

#[tokio::test]
async fn create_invalid_status_is_rejected() {
    let app = TestApp::new();
    let response = post_json(
        app.router(),
        "/api/projects",
        json!({"name": "Site", "client": "Acme", "status": "ARCHIVED"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("status"));

    // Nothing was stored.
    let list = body_json(get(app.router(), "/api/projects").await).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn create_malformed_json_returns_400() {
    let app = TestApp::new();
    let response = send_raw(
        app.router(),
        Method::POST,
        "/api/projects",
        "{ name: ".to_string(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn created_ids_are_unique() {
    let app = TestApp::new();
    let mut ids = HashSet::new();
    for i in 0..5 {
        let json = app
            .create(json!({"name": format!("Project {i}"), "client": "Acme"}))
            .await;
        ids.insert(json["id"].as_str().unwrap().to_string());
    }
    assert_eq!(ids.len(), 5);
}

// ---------------------------------------------------------------------------
// List / get
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_is_empty_without_data_file() {
    let app = TestApp::new();
    let response = get(app.router(), "/api/projects").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn list_returns_insertion_order() {
    let app = TestApp::new();
    let first = app.create(json!({"name": "P1", "client": "Acme"})).await;
    let second = app.create(json!({"name": "P2", "client": "Acme"})).await;

    let json = body_json(get(app.router(), "/api/projects").await).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], first);
    assert_eq!(list[1], second);
}

#[tokio::test]
async fn get_returns_record_equal_to_create_response() {
    let app = TestApp::new();
    let created = app
        .create(json!({"name": "Get Me", "client": "Acme", "description": "notes"}))
        .await;
    let id = created["id"].as_str().unwrap();

    let response = get(app.router(), &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn get_nonexistent_project_returns_404() {
    let app = TestApp::new();
    let response = get(app.router(), "/api/projects/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Project not found");
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn corrupt_data_file_returns_generic_500() {
    let app = TestApp::new();
    app.write_data_file("[{ broken");

    let response = get(app.router(), "/api/projects").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    let data_file = app.data_file();
    assert!(!json.to_string().contains(data_file.to_str().unwrap()));
}

// ---------------------------------------------------------------------------
// Partial update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mark_done_scenario() {
    let app = TestApp::new();
    let created = app
        .create(json!({"name": "Website redesign", "client": "Acme Corp"}))
        .await;
    assert_eq!(created["status"], "PLANNED");
    let id = created["id"].as_str().unwrap();

    let response = patch_json(
        app.router(),
        &format!("/api/projects/{id}"),
        json!({"status": "DONE"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["status"], "DONE");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(timestamp(&updated["updatedAt"]) >= timestamp(&created["updatedAt"]));
    assert_eq!(updated["name"], "Website redesign");
}

#[tokio::test]
async fn patch_invalid_status_is_ignored() {
    let app = TestApp::new();
    let created = app
        .create(json!({"name": "Site", "client": "Acme", "status": "IN_PROGRESS"}))
        .await;
    let id = created["id"].as_str().unwrap();

    let response = patch_json(
        app.router(),
        &format!("/api/projects/{id}"),
        json!({"status": "ARCHIVED"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "IN_PROGRESS");
}

#[tokio::test]
async fn patch_drops_short_name_and_client() {
    let app = TestApp::new();
    let created = app.create(json!({"name": "Site", "client": "Acme"})).await;
    let id = created["id"].as_str().unwrap();

    let updated = body_json(
        patch_json(
            app.router(),
            &format!("/api/projects/{id}"),
            json!({"name": " X ", "client": "", "status": "DONE"}),
        )
        .await,
    )
    .await;

    assert_eq!(updated["name"], "Site");
    assert_eq!(updated["client"], "Acme");
    assert_eq!(updated["status"], "DONE");
}

#[tokio::test]
async fn patch_ignores_caller_supplied_identity() {
    let app = TestApp::new();
    let created = app.create(json!({"name": "Site", "client": "Acme"})).await;
    let id = created["id"].as_str().unwrap();

    let updated = body_json(
        patch_json(
            app.router(),
            &format!("/api/projects/{id}"),
            json!({
                "id": "hijacked",
                "createdAt": "1999-01-01T00:00:00Z",
                "updatedAt": "1999-01-01T00:00:00Z",
                "name": "Renamed",
            }),
        )
        .await,
    )
    .await;

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(timestamp(&updated["updatedAt"]) >= timestamp(&created["updatedAt"]));
    assert_eq!(updated["name"], "Renamed");

    let response = get(app.router(), "/api/projects/hijacked").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_is_idempotent_apart_from_updated_at() {
    let app = TestApp::new();
    let created = app.create(json!({"name": "Site", "client": "Acme"})).await;
    let uri = format!("/api/projects/{}", created["id"].as_str().unwrap());
    let patch = json!({"status": "IN_PROGRESS", "client": "Globex", "description": " v2 "});

    let first = body_json(patch_json(app.router(), &uri, patch.clone()).await).await;
    let second = body_json(patch_json(app.router(), &uri, patch).await).await;

    for field in ["id", "name", "client", "status", "description", "createdAt"] {
        assert_eq!(first[field], second[field], "field {field} changed");
    }
    assert_eq!(second["description"], "v2");
    assert!(timestamp(&second["updatedAt"]) >= timestamp(&first["updatedAt"]));
}

#[tokio::test]
async fn patch_null_description_clears_it() {
    let app = TestApp::new();
    let created = app
        .create(json!({"name": "Site", "client": "Acme", "description": "old"}))
        .await;
    let id = created["id"].as_str().unwrap();

    let updated = body_json(
        patch_json(
            app.router(),
            &format!("/api/projects/{id}"),
            json!({"description": null}),
        )
        .await,
    )
    .await;

    assert!(updated.get("description").is_none());
}

#[tokio::test]
async fn patch_nonexistent_project_returns_404() {
    let app = TestApp::new();
    let response = patch_json(
        app.router(),
        "/api/projects/does-not-exist",
        json!({"status": "DONE"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Project not found");
}

#[tokio::test]
async fn delete_is_not_routed() {
    let app = TestApp::new();
    let created = app.create(json!({"name": "Site", "client": "Acme"})).await;
    let id = created["id"].as_str().unwrap();

    let response = send_raw(
        app.router(),
        Method::DELETE,
        &format!("/api/projects/{id}"),
        String::new(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
