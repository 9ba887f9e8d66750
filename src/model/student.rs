//! The student entity and its field-level validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Incoming request body for create and update.
///
/// Every field is optional so that absence can be told apart from a zero
/// value. Keys are accepted in lower-case or PascalCase.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPayload {
    #[serde(default, alias = "Id")]
    pub id: Option<i64>,
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
    #[serde(default, alias = "Age")]
    pub age: Option<i64>,
}

/// Validated fields for a student that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl NewStudent {
    /// Target an existing row with these fields.
    pub fn with_id(self, id: i64) -> StudentUpdate {
        StudentUpdate {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// Validated fields overwriting an existing student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentUpdate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Which constraint a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    Invalid,
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl FieldError {
    fn required(field: &'static str) -> Self {
        Self { field, kind: FieldErrorKind::Required }
    }

    fn invalid(field: &'static str) -> Self {
        Self { field, kind: FieldErrorKind::Invalid }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            FieldErrorKind::Required => write!(f, "field {} is required field", self.field),
            FieldErrorKind::Invalid => write!(f, "field {} is invalid", self.field),
        }
    }
}

impl StudentPayload {
    /// Check the name, email and age constraints.
    ///
    /// Returns every failing field in declaration order, not just the first.
    pub fn validate(&self) -> Result<NewStudent, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = match self.name.as_deref() {
            Some(name) if !name.is_empty() => Some(name),
            _ => {
                errors.push(FieldError::required("Name"));
                None
            }
        };

        let email = match self.email.as_deref() {
            Some(email) if !email.is_empty() => {
                if EMAIL_RE.is_match(email) {
                    Some(email)
                } else {
                    errors.push(FieldError::invalid("Email"));
                    None
                }
            }
            _ => {
                errors.push(FieldError::required("Email"));
                None
            }
        };

        let age = match self.age {
            Some(age) if age >= 0 => Some(age),
            Some(_) => {
                errors.push(FieldError::invalid("Age"));
                None
            }
            None => {
                errors.push(FieldError::required("Age"));
                None
            }
        };

        match (name, email, age) {
            (Some(name), Some(email), Some(age)) if errors.is_empty() => Ok(NewStudent {
                name: name.to_string(),
                email: email.to_string(),
                age,
            }),
            _ => Err(errors),
        }
    }
}
