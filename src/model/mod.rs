//! Domain model subsystem.
//!
//! # Data Flow
//! ```text
//! JSON request body
//!     → StudentPayload (lenient decode, every field optional)
//!     → validate() (required / format checks, all failures collected)
//!     → NewStudent / StudentUpdate (validated, ready for storage)
//!
//! storage row
//!     → Student (serialized back to clients)
//! ```

pub mod student;

pub use student::{FieldError, FieldErrorKind, NewStudent, Student, StudentPayload, StudentUpdate};
