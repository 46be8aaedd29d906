use crate::domain::reference::FacultySubjectAssignment;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// AssignmentRepository - 授课分配只读仓储
// ==========================================
// 授权数据源: 教师只能讲授存在激活分配的课程
pub struct AssignmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AssignmentRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询 (教师, 课程) 的激活授课分配
    pub fn find_active(
        &self,
        faculty_id: &str,
        subject_id: &str,
    ) -> RepositoryResult<Option<FacultySubjectAssignment>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT assignment_id, faculty_id, subject_id, is_active
            FROM faculty_subject_assignment
            WHERE faculty_id = ?1 AND subject_id = ?2 AND is_active = 1
            LIMIT 1
            "#,
        )?;

        match stmt.query_row(params![faculty_id, subject_id], |row| {
            Ok(FacultySubjectAssignment {
                assignment_id: row.get(0)?,
                faculty_id: row.get(1)?,
                subject_id: row.get(2)?,
                is_active: row.get(3)?,
            })
        }) {
            Ok(assignment) => Ok(Some(assignment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
