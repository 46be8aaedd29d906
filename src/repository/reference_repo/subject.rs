use crate::domain::reference::Subject;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// SubjectRepository - 课程只读仓储
// ==========================================
pub struct SubjectRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SubjectRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 subject_id 查询课程
    pub fn find_by_id(&self, subject_id: &str) -> RepositoryResult<Option<Subject>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT subject_id, subject_code, subject_name, department, is_active
            FROM subject
            WHERE subject_id = ?1
            "#,
        )?;

        match stmt.query_row(params![subject_id], |row| {
            Ok(Subject {
                subject_id: row.get(0)?,
                subject_code: row.get(1)?,
                subject_name: row.get(2)?,
                department: row.get(3)?,
                is_active: row.get(4)?,
            })
        }) {
            Ok(subject) => Ok(Some(subject)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
