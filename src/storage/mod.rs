//! Storage subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → StudentStorage (port, shared as Arc<dyn StudentStorage>)
//!     → sqlite.rs (parameterized SQL against the `students` table)
//!     → StorageError::NotFound | StorageError::Backend on failure
//! ```
//!
//! # Design Decisions
//! - Each operation maps to exactly one SQL statement
//! - "No rows" is reported as `NotFound`, never folded into backend errors
//! - Calls are blocking; async callers run them on the blocking pool

pub mod memory;
pub mod sqlite;

use crate::model::{NewStudent, Student, StudentUpdate};

pub use memory::InMemoryStorage;
pub use sqlite::SqliteStorage;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type StorageResult<T> = Result<T, StorageError>;

/// Error returned by every storage operation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no student found with id {0}")]
    NotFound(i64),

    #[error("{operation}: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl StorageError {
    pub fn backend(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Backend {
            operation,
            source: source.into(),
        }
    }
}

/// Persistence contract for students.
///
/// Implementations must be safe to call from many requests at once.
pub trait StudentStorage: Send + Sync + 'static {
    /// Insert a student and return the id assigned by the backend.
    fn create_student(&self, student: &NewStudent) -> StorageResult<i64>;

    fn get_student_by_id(&self, id: i64) -> StorageResult<Student>;

    /// Every stored student, ordered by id.
    fn list_students(&self) -> StorageResult<Vec<Student>>;

    fn delete_by_id(&self, id: i64) -> StorageResult<()>;

    /// Overwrite name, email and age of an existing student.
    fn update_student(&self, student: &StudentUpdate) -> StorageResult<()>;
}
