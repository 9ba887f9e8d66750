//! SQLite implementation of the storage port.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::model::{NewStudent, Student, StudentUpdate};
use crate::storage::{StorageError, StorageResult, StudentStorage};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    email TEXT,
    age INTEGER
)";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Student storage backed by a single SQLite connection.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (or create) the database file at `path` and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::backend("open database", e))?;
        }

        let conn = Connection::open(path).map_err(|e| StorageError::backend("open database", e))?;
        let storage = Self::bootstrap(conn)?;

        tracing::info!(
            mode = "file",
            path = %path.display(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Storage opened"
        );
        Ok(storage)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        let started_at = Instant::now();
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::backend("open database", e))?;
        let storage = Self::bootstrap(conn)?;

        tracing::info!(
            mode = "memory",
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Storage opened"
        );
        Ok(storage)
    }

    fn bootstrap(conn: Connection) -> StorageResult<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| StorageError::backend("configure database", e))?;
        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| StorageError::backend("create schema", e))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self, operation: &'static str) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::backend(operation, "connection mutex poisoned"))
    }
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
    })
}

impl StudentStorage for SqliteStorage {
    fn create_student(&self, student: &NewStudent) -> StorageResult<i64> {
        const OP: &str = "create student";
        let conn = self.conn(OP)?;

        conn.execute(
            "INSERT INTO students (name, email, age) VALUES (?1, ?2, ?3)",
            params![student.name, student.email, student.age],
        )
        .map_err(|e| StorageError::backend(OP, e))?;

        Ok(conn.last_insert_rowid())
    }

    fn get_student_by_id(&self, id: i64) -> StorageResult<Student> {
        const OP: &str = "get student";
        let conn = self.conn(OP)?;

        conn.query_row(
            "SELECT id, name, email, age FROM students WHERE id = ?1 LIMIT 1",
            params![id],
            student_from_row,
        )
        .optional()
        .map_err(|e| StorageError::backend(OP, e))?
        .ok_or(StorageError::NotFound(id))
    }

    fn list_students(&self) -> StorageResult<Vec<Student>> {
        const OP: &str = "list students";
        let conn = self.conn(OP)?;

        let mut stmt = conn
            .prepare("SELECT id, name, email, age FROM students ORDER BY id")
            .map_err(|e| StorageError::backend(OP, e))?;
        let rows = stmt
            .query_map([], student_from_row)
            .map_err(|e| StorageError::backend(OP, e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StorageError::backend(OP, e))
    }

    fn delete_by_id(&self, id: i64) -> StorageResult<()> {
        const OP: &str = "delete student";
        let conn = self.conn(OP)?;

        let changed = conn
            .execute("DELETE FROM students WHERE id = ?1", params![id])
            .map_err(|e| StorageError::backend(OP, e))?;

        if changed == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }

    fn update_student(&self, student: &StudentUpdate) -> StorageResult<()> {
        const OP: &str = "update student";
        let conn = self.conn(OP)?;

        let changed = conn
            .execute(
                "UPDATE students SET name = ?1, email = ?2, age = ?3 WHERE id = ?4",
                params![student.name, student.email, student.age, student.id],
            )
            .map_err(|e| StorageError::backend(OP, e))?;

        if changed == 0 {
            return Err(StorageError::NotFound(student.id));
        }
        Ok(())
    }
}
