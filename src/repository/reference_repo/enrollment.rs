use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// EnrollmentRepository - 选课只读仓储
// ==========================================
// 只用于容量建议: 统计 (课程, 班级, 学期, 学年) 的在册人数
pub struct EnrollmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EnrollmentRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 统计在册选课人数（只计 ENROLLED 状态）
    pub fn count_enrolled(
        &self,
        subject_id: &str,
        section: &str,
        semester: i32,
        academic_year: &str,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        let count: i64 = conn.query_row(
            r#"
            SELECT COUNT(*) FROM enrollment
            WHERE subject_id = ?1 AND section = ?2
              AND semester = ?3 AND academic_year = ?4
              AND status = 'ENROLLED'
            "#,
            params![subject_id, section, semester, academic_year],
            |row| row.get(0),
        )?;

        Ok(count)
    }
}
