use crate::db::open_sqlite_connection;
use crate::domain::entry::TimetableEntry;
use crate::domain::types::EntryStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// 时间戳存储格式（与 audit_log 一致）
pub(super) const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// TimetableEntryRepository - 排课记录仓储
// ==========================================
// 状态机: Active(is_active=1) ↔ Inactive(is_active=0)
// 存储层兜底: uq_entry_faculty_slot / uq_entry_classroom_slot
// 两个部分唯一索引在写入时拒绝激活行的双重占用，
// 唯一约束违反是排课冲突的权威信号
pub struct TimetableEntryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TimetableEntryRepository {
    /// 创建新的排课记录仓储
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    pub(super) fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入排课记录
    ///
    /// # 返回
    /// - Ok(entry_id): 成功插入
    /// - Err(UniqueConstraintViolation): 教师或教室在该学期该时间段已被激活记录占用
    pub fn insert(&self, entry: &TimetableEntry) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO timetable_entry (
                entry_id, subject_id, faculty_id, classroom_id, slot_id,
                section, semester, academic_year, max_students, notes,
                is_active, created_by, updated_by, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            params![
                entry.entry_id,
                entry.subject_id,
                entry.faculty_id,
                entry.classroom_id,
                entry.slot_id,
                entry.section,
                entry.semester,
                entry.academic_year,
                entry.max_students,
                entry.notes,
                entry.status.is_active(),
                entry.created_by,
                entry.updated_by,
                entry.created_at.format(TS_FORMAT).to_string(),
                entry.updated_at.format(TS_FORMAT).to_string(),
            ],
        )?;

        Ok(entry.entry_id.clone())
    }

    /// 整行更新排课记录（更新路径，不改变激活状态之外由调用方保证）
    ///
    /// # 返回
    /// - Ok(()): 成功更新
    /// - Err(NotFound): 记录不存在
    /// - Err(UniqueConstraintViolation): 更新后的槽位已被其他激活记录占用
    pub fn update(&self, entry: &TimetableEntry) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let rows = conn.execute(
            r#"
            UPDATE timetable_entry SET
                subject_id = ?2, faculty_id = ?3, classroom_id = ?4, slot_id = ?5,
                section = ?6, semester = ?7, academic_year = ?8,
                max_students = ?9, notes = ?10, is_active = ?11,
                updated_by = ?12, updated_at = ?13
            WHERE entry_id = ?1
            "#,
            params![
                entry.entry_id,
                entry.subject_id,
                entry.faculty_id,
                entry.classroom_id,
                entry.slot_id,
                entry.section,
                entry.semester,
                entry.academic_year,
                entry.max_students,
                entry.notes,
                entry.status.is_active(),
                entry.updated_by,
                entry.updated_at.format(TS_FORMAT).to_string(),
            ],
        )?;

        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "TimetableEntry".to_string(),
                id: entry.entry_id.clone(),
            });
        }

        Ok(())
    }

    /// 切换激活状态（activate / deactivate / delete 共用，不做业务校验）
    ///
    /// # 返回
    /// - Ok(()): 切换完成
    /// - Err(NotFound): 记录不存在
    /// - Err(UniqueConstraintViolation): 重新激活会违反双唯一索引
    ///   （停用期间出现了占用同一槽位的激活记录）
    pub fn set_status(
        &self,
        entry_id: &str,
        status: EntryStatus,
        updated_by: &str,
        now: NaiveDateTime,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let rows = conn.execute(
            r#"
            UPDATE timetable_entry
            SET is_active = ?2, updated_by = ?3, updated_at = ?4
            WHERE entry_id = ?1
            "#,
            params![
                entry_id,
                status.is_active(),
                updated_by,
                now.format(TS_FORMAT).to_string(),
            ],
        )?;

        if rows == 0 {
            return Err(RepositoryError::NotFound {
                entity: "TimetableEntry".to_string(),
                id: entry_id.to_string(),
            });
        }

        Ok(())
    }
}
