#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use projboard_api::config::ServerConfig;
use projboard_api::router::build_app_router;
use projboard_api::state::AppState;
use projboard_store::ProjectStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(data_file: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_file,
    }
}

/// A router over a store in a private temp directory.
///
/// Every [`TestApp::router`] call shares the same [`ProjectStore`], like the
/// production binary does across requests.
pub struct TestApp {
    /// Keeps the temp directory alive for the lifetime of the app.
    _dir: TempDir,
    state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::open(dir.path().join(".data").join("projects.json"));
        Self {
            _dir: dir,
            state: AppState {
                store: Arc::new(store),
            },
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.state.store.path().to_path_buf()
    }

    pub fn router(&self) -> Router {
        build_app_router(self.state.clone(), &test_config(self.data_file()))
    }

    /// Overwrite the data file with arbitrary contents.
    pub fn write_data_file(&self, contents: &str) {
        let path = self.data_file();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    /// Create a project through the API and return its JSON.
    pub async fn create(&self, body: serde_json::Value) -> serde_json::Value {
        let response = post_json(self.router(), "/api/projects", body).await;
        assert_eq!(response.status(), axum::http::StatusCode::CREATED);
        body_json(response).await
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_raw(app, Method::POST, uri, body.to_string()).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_raw(app, Method::PATCH, uri, body.to_string()).await
}

pub async fn send_raw(app: Router, method: Method, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
