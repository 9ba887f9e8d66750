//! In-memory implementation of the storage port.
//!
//! Used to exercise handlers without a database file.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::model::{NewStudent, Student, StudentUpdate};
use crate::storage::{StorageError, StorageResult, StudentStorage};

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Student>,
}

/// Student storage held in a process-local map.
#[derive(Default)]
pub struct InMemoryStorage {
    inner: Mutex<Inner>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inner<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Inner) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| StorageError::backend(operation, "storage mutex poisoned"))?;
        f(&mut inner)
    }
}

impl StudentStorage for InMemoryStorage {
    fn create_student(&self, student: &NewStudent) -> StorageResult<i64> {
        self.with_inner("create student", |inner| {
            inner.last_id += 1;
            let id = inner.last_id;
            inner.rows.insert(
                id,
                Student {
                    id,
                    name: student.name.clone(),
                    email: student.email.clone(),
                    age: student.age,
                },
            );
            Ok(id)
        })
    }

    fn get_student_by_id(&self, id: i64) -> StorageResult<Student> {
        self.with_inner("get student", |inner| {
            inner.rows.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn list_students(&self) -> StorageResult<Vec<Student>> {
        self.with_inner("list students", |inner| Ok(inner.rows.values().cloned().collect()))
    }

    fn delete_by_id(&self, id: i64) -> StorageResult<()> {
        self.with_inner("delete student", |inner| {
            inner.rows.remove(&id).map(|_| ()).ok_or(StorageError::NotFound(id))
        })
    }

    fn update_student(&self, student: &StudentUpdate) -> StorageResult<()> {
        self.with_inner("update student", |inner| {
            let row = inner
                .rows
                .get_mut(&student.id)
                .ok_or(StorageError::NotFound(student.id))?;
            row.name = student.name.clone();
            row.email = student.email.clone();
            row.age = student.age;
            Ok(())
        })
    }
}
