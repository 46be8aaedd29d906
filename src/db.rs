// ==========================================
// 高校排课管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 统一建表脚本，排课双唯一索引在此处定义
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })?;
    Ok(v)
}

/// 初始化数据库 schema（幂等，可重复执行）
///
/// 约束设计：
/// - timetable_entry 上的两个部分唯一索引只约束 is_active=1 的行，
///   是"教师不重排 / 教室不重排"两条不变量的存储层兜底。
///   冲突检测引擎的前置查询只是用户友好的快速路径，
///   写入时的唯一约束违反才是权威的冲突信号。
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ===== 参照数据（协作方拥有，本核心只读） =====

        CREATE TABLE IF NOT EXISTS subject (
            subject_id TEXT PRIMARY KEY,
            subject_code TEXT NOT NULL UNIQUE,
            subject_name TEXT NOT NULL,
            department TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS faculty (
            faculty_id TEXT PRIMARY KEY,
            faculty_name TEXT NOT NULL,
            department TEXT NOT NULL,
            account_status TEXT NOT NULL DEFAULT 'ACTIVE'
        );

        CREATE TABLE IF NOT EXISTS classroom (
            classroom_id TEXT PRIMARY KEY,
            room_no TEXT NOT NULL,
            building TEXT,
            capacity INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'AVAILABLE',
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS time_slot (
            slot_id TEXT PRIMARY KEY,
            day_of_week TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS faculty_subject_assignment (
            assignment_id TEXT PRIMARY KEY,
            faculty_id TEXT NOT NULL REFERENCES faculty(faculty_id),
            subject_id TEXT NOT NULL REFERENCES subject(subject_id),
            is_active INTEGER NOT NULL DEFAULT 1,
            UNIQUE(faculty_id, subject_id)
        );

        CREATE TABLE IF NOT EXISTS enrollment (
            enrollment_id TEXT PRIMARY KEY,
            subject_id TEXT NOT NULL,
            section TEXT NOT NULL,
            semester INTEGER NOT NULL,
            academic_year TEXT NOT NULL,
            student_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'ENROLLED'
        );

        CREATE INDEX IF NOT EXISTS idx_enrollment_section
            ON enrollment(subject_id, section, semester, academic_year);

        -- ===== 排课主表 =====

        CREATE TABLE IF NOT EXISTS timetable_entry (
            entry_id TEXT PRIMARY KEY,
            subject_id TEXT NOT NULL REFERENCES subject(subject_id),
            faculty_id TEXT NOT NULL REFERENCES faculty(faculty_id),
            classroom_id TEXT NOT NULL REFERENCES classroom(classroom_id),
            slot_id TEXT NOT NULL REFERENCES time_slot(slot_id),
            section TEXT NOT NULL DEFAULT 'A',
            semester INTEGER NOT NULL,
            academic_year TEXT NOT NULL,
            max_students INTEGER,
            notes TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_by TEXT NOT NULL,
            updated_by TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- 存储层兜底: 同一学期/学年/时间段内，教师与教室各自只能出现一次（仅约束激活行）
        CREATE UNIQUE INDEX IF NOT EXISTS uq_entry_faculty_slot
            ON timetable_entry(faculty_id, slot_id, semester, academic_year)
            WHERE is_active = 1;

        CREATE UNIQUE INDEX IF NOT EXISTS uq_entry_classroom_slot
            ON timetable_entry(classroom_id, slot_id, semester, academic_year)
            WHERE is_active = 1;

        CREATE INDEX IF NOT EXISTS idx_entry_term
            ON timetable_entry(academic_year, semester);

        -- ===== 审计日志（只追加） =====

        CREATE TABLE IF NOT EXISTS audit_log (
            audit_id TEXT PRIMARY KEY,
            actor TEXT NOT NULL,
            action TEXT NOT NULL,
            entry_id TEXT NOT NULL,
            old_value_json TEXT,
            new_value_json TEXT,
            description TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_audit_entry ON audit_log(entry_id);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();

        init_schema(&conn).unwrap();
        // 重复执行不报错
        init_schema(&conn).unwrap();

        assert_eq!(
            read_schema_version(&conn).unwrap(),
            Some(CURRENT_SCHEMA_VERSION)
        );
    }

    #[test]
    fn test_schema_version_none_without_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), None);
    }
}
