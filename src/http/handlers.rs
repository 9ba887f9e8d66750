//! Student route handlers.
//!
//! Each handler decodes its input, validates it, calls the storage port on
//! the blocking pool and writes either the raw payload or an error envelope.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::model::{Student, StudentPayload};
use crate::storage::{StorageError, StorageResult, StudentStorage};

/// Body returned after a successful create.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

/// Run a storage call on the blocking pool.
async fn with_storage<T, F>(storage: &Arc<dyn StudentStorage>, f: F) -> Result<StorageResult<T>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn StudentStorage) -> StorageResult<T> + Send + 'static,
{
    let storage = Arc::clone(storage);
    tokio::task::spawn_blocking(move || f(storage.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("storage task failed: {e}")))
}

fn decode_payload(body: &Bytes) -> Result<StudentPayload, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::EmptyBody);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|e| ApiError::InvalidId {
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// `POST /api/students`
pub async fn create_student(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let student = decode_payload(&body)?.validate()?;

    tracing::info!("Creating student");
    let id = with_storage(&state.storage, move |s| s.create_student(&student)).await??;

    tracing::info!(id, "Student created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// `GET /api/students/{id}`
pub async fn get_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&raw_id)?;
    tracing::info!(id, "Getting student");

    let student = with_storage(&state.storage, move |s| s.get_student_by_id(id)).await??;
    Ok(Json(student))
}

/// `GET /api/students`
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    let students = with_storage(&state.storage, |s| s.list_students()).await??;

    tracing::info!(count = students.len(), "Listed students");
    Ok(Json(students))
}

/// `DELETE /api/students/{id}`
pub async fn delete_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    let id = parse_id(&raw_id)?;
    tracing::info!(id, "Deleting student");

    with_storage(&state.storage, move |s| s.delete_by_id(id)).await??;

    tracing::info!(id, "Student deleted");
    Ok(Json("user deleted"))
}

/// `PUT /api/students`
pub async fn update_student(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<&'static str>, ApiError> {
    let payload = decode_payload(&body)?;
    let id = payload.id.filter(|id| *id != 0).ok_or(ApiError::ZeroId)?;
    let update = payload.validate()?.with_id(id);

    tracing::info!(id, "Updating student");
    with_storage(&state.storage, move |s| s.update_student(&update))
        .await?
        .map_err(|err| match err {
            StorageError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Rejected(other.to_string()),
        })?;

    tracing::info!(id, "Student updated");
    Ok(Json("Student updated successfully"))
}

/// `GET /api/students/health`
pub async fn health() -> Json<&'static str> {
    tracing::debug!("Health check");
    Json("Api is working")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_body_is_empty() {
        assert!(matches!(
            decode_payload(&Bytes::from_static(b"  \n")),
            Err(ApiError::EmptyBody)
        ));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            decode_payload(&Bytes::from_static(b"{\"name\": ")),
            Err(ApiError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId { .. })));
    }
}
