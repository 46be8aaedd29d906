use crate::domain::reference::TimeSlot;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// TimeSlotRepository - 时间段只读仓储
// ==========================================
pub struct TimeSlotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TimeSlotRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按 slot_id 查询时间段
    pub fn find_by_id(&self, slot_id: &str) -> RepositoryResult<Option<TimeSlot>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT slot_id, day_of_week, start_time, end_time, is_active
            FROM time_slot
            WHERE slot_id = ?1
            "#,
        )?;

        let row = match stmt.query_row(params![slot_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, bool>(4)?,
            ))
        }) {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(TimeSlot {
            slot_id: row.0,
            day_of_week: row.1,
            start_time: parse_time("time_slot.start_time", &row.2)?,
            end_time: parse_time("time_slot.end_time", &row.3)?,
            is_active: row.4,
        }))
    }
}

/// 解析时间列，兼容 "HH:MM" 和 "HH:MM:SS" 两种存储形式
fn parse_time(field: &str, raw: &str) -> RepositoryResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|e| RepositoryError::FieldValueError {
            field: field.to_string(),
            message: format!("时间格式无效 '{}': {}", raw, e),
        })
}
