use crate::domain::reference::Faculty;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// FacultyRepository - 教师只读仓储
// ==========================================
pub struct FacultyRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FacultyRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 faculty_id 查询教师（含关联账号状态）
    pub fn find_by_id(&self, faculty_id: &str) -> RepositoryResult<Option<Faculty>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT faculty_id, faculty_name, department, account_status
            FROM faculty
            WHERE faculty_id = ?1
            "#,
        )?;

        match stmt.query_row(params![faculty_id], |row| {
            Ok(Faculty {
                faculty_id: row.get(0)?,
                faculty_name: row.get(1)?,
                department: row.get(2)?,
                account_status: row.get(3)?,
            })
        }) {
            Ok(faculty) => Ok(Some(faculty)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
