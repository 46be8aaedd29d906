use crate::domain::reference::Classroom;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::domain::types::ClassroomStatus;

// ==========================================
// ClassroomRepository - 教室只读仓储
// ==========================================
pub struct ClassroomRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ClassroomRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 classroom_id 查询教室
    pub fn find_by_id(&self, classroom_id: &str) -> RepositoryResult<Option<Classroom>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT classroom_id, room_no, building, capacity, status, is_active
            FROM classroom
            WHERE classroom_id = ?1
            "#,
        )?;

        let row = match stmt.query_row(params![classroom_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, i32>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, bool>(5)?,
            ))
        }) {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let status = ClassroomStatus::from_str(&row.4).map_err(|message| {
            RepositoryError::FieldValueError {
                field: "classroom.status".to_string(),
                message,
            }
        })?;

        Ok(Some(Classroom {
            classroom_id: row.0,
            room_no: row.1,
            building: row.2,
            capacity: row.3,
            status,
            is_active: row.5,
        }))
    }
}
