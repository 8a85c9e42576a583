//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use bytes::Bytes;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use filegate_api::AppState;
use filegate_core::config::{AppConfig, AuthConfig, StorageConfig};

pub const CLIENT_ID: &str = "integration-client";
pub const CLIENT_SECRET: &str = "integration-secret";
pub const JWT_SECRET: &str = "integration-signing-key-0123456789abcdef";

const BOUNDARY: &str = "filegate-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Temporary storage root, removed on drop
    pub root: TempDir,
}

impl TestApp {
    /// Create a new test application with a 1 MB upload limit
    pub async fn new() -> Self {
        Self::with_max_file_size_mb(1).await
    }

    /// Create a new test application with the given upload limit
    pub async fn with_max_file_size_mb(max_file_size_mb: u64) -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp root");

        let config = AppConfig {
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
                token_ttl_minutes: 5,
                client_id: CLIENT_ID.to_string(),
                client_secret: CLIENT_SECRET.to_string(),
            },
            storage: StorageConfig {
                root_path: root.path().to_string_lossy().into_owned(),
                max_file_size_mb,
                create_missing_folders: true,
            },
            ..AppConfig::default()
        };
        config.validate().expect("Test config should be valid");

        let state = AppState::from_config(config.clone())
            .await
            .expect("Failed to build app state");
        let router = filegate_api::build_app(state);

        Self {
            router,
            config,
            root,
        }
    }

    /// Exchange the test credentials for an access token
    pub async fn login(&self) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/token",
                Some(serde_json::json!({
                    "client_id": CLIENT_ID,
                    "secret": CLIENT_SECRET,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Token exchange failed: {:?}",
            response.body
        );

        response
            .body
            .get("access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in token response")
            .to_string()
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await.into()
    }

    /// Upload `data` as a multipart form
    pub async fn upload(
        &self,
        folder_path: &str,
        file_name: &str,
        data: &[u8],
        overwrite: bool,
        token: &str,
    ) -> TestResponse {
        let form = MultipartForm::new()
            .text("FileName", file_name)
            .text("FolderPath", folder_path)
            .file("File", file_name, data);
        self.upload_form(form, overwrite, Some(token)).await
    }

    /// Send a prepared multipart form to the upload endpoint
    pub async fn upload_form(
        &self,
        form: MultipartForm,
        overwrite: bool,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri(format!("/api/files/upload?overwrite={overwrite}"))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(form.finish()))
            .expect("Failed to build request");

        self.send(req).await.into()
    }

    /// Make a GET request and return the raw response
    pub async fn get_raw(&self, path: &str, token: Option<&str>) -> RawResponse {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = req.body(Body::empty()).expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> RawResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        RawResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request, body parsed as JSON
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl From<RawResponse> for TestResponse {
    fn from(raw: RawResponse) -> Self {
        Self {
            status: raw.status,
            body: serde_json::from_slice(&raw.body).unwrap_or(Value::Null),
        }
    }
}

/// Response from a test request with the body left as bytes
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body bytes
    pub body: Bytes,
}

/// Minimal multipart/form-data body builder
#[derive(Debug, Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    /// Add a file field
    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}
