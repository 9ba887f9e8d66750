//! Shared utilities for router and live-server tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use student_api::config::ServiceConfig;
use student_api::http::{build_router, AppState, HttpServer};
use student_api::model::{NewStudent, Student, StudentUpdate};
use student_api::storage::{StorageError, StorageResult, StudentStorage};
use student_api::Shutdown;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Router over the given storage with default settings.
#[allow(dead_code)]
pub fn router(storage: Arc<dyn StudentStorage>) -> Router {
    let config = ServiceConfig::new(":memory:", "127.0.0.1:0");
    router_with_config(&config, storage)
}

#[allow(dead_code)]
pub fn router_with_config(config: &ServiceConfig, storage: Arc<dyn StudentStorage>) -> Router {
    build_router(config, AppState::new(storage))
}

/// Storage whose every operation fails as a backend error.
#[allow(dead_code)]
pub struct FailingStorage;

#[allow(dead_code)]
impl FailingStorage {
    fn fail<T>(operation: &'static str) -> StorageResult<T> {
        Err(StorageError::backend(operation, "disk I/O error"))
    }
}

impl StudentStorage for FailingStorage {
    fn create_student(&self, _student: &NewStudent) -> StorageResult<i64> {
        Self::fail("create student")
    }

    fn get_student_by_id(&self, _id: i64) -> StorageResult<Student> {
        Self::fail("get student")
    }

    fn list_students(&self) -> StorageResult<Vec<Student>> {
        Self::fail("list students")
    }

    fn delete_by_id(&self, _id: i64) -> StorageResult<()> {
        Self::fail("delete student")
    }

    fn update_student(&self, _student: &StudentUpdate) -> StorageResult<()> {
        Self::fail("update student")
    }
}

/// Send one request through the router and decode the JSON reply.
#[allow(dead_code)]
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Start a live server on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_server(
    config: ServiceConfig,
    storage: Arc<dyn StudentStorage>,
) -> (SocketAddr, Shutdown, JoinHandle<std::io::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, storage);
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown, handle)
}
