// ==========================================
// 高校排课管理系统 - 审计日志数据仓储
// ==========================================
// 红线: 所有排课写入必须记录
// 约束: 只追加，不提供更新/删除接口
// ==========================================

use crate::domain::audit::AuditLog;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::domain::types::AuditAction;

/// 时间戳存储格式
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// AuditLogRepository - 审计日志仓储
// ==========================================
pub struct AuditLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AuditLogRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入审计日志
    ///
    /// # 返回
    /// - Ok(audit_id): 成功插入
    pub fn insert(&self, log: &AuditLog) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO audit_log (
                audit_id, actor, action, entry_id,
                old_value_json, new_value_json, description, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                log.audit_id,
                log.actor,
                log.action.to_string(),
                log.entry_id,
                log.old_value_json.as_ref().map(|v| v.to_string()),
                log.new_value_json.as_ref().map(|v| v.to_string()),
                log.description,
                log.created_at.format(TS_FORMAT).to_string(),
            ],
        )?;

        Ok(log.audit_id.clone())
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 查询指定排课记录的全部审计日志（时间正序）
    pub fn find_by_entry(&self, entry_id: &str) -> RepositoryResult<Vec<AuditLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT audit_id, actor, action, entry_id,
                   old_value_json, new_value_json, description, created_at
            FROM audit_log
            WHERE entry_id = ?1
            ORDER BY created_at ASC, rowid ASC
            "#,
        )?;

        let rows = stmt.query_map(params![entry_id], map_row)?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row?);
        }
        Ok(logs)
    }

    /// 查询最近的审计日志（时间倒序）
    pub fn list_recent(&self, limit: i64) -> RepositoryResult<Vec<AuditLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT audit_id, actor, action, entry_id,
                   old_value_json, new_value_json, description, created_at
            FROM audit_log
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map(params![limit], map_row)?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(row?);
        }
        Ok(logs)
    }
}

// ==========================================
// 行映射
// ==========================================

fn map_row(row: &Row<'_>) -> rusqlite::Result<AuditLog> {
    let action_raw: String = row.get(2)?;
    let action = AuditAction::from_str(&action_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            e.into(),
        )
    })?;

    let created_raw: String = row.get(7)?;
    let created_at = NaiveDateTime::parse_from_str(&created_raw, TS_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(AuditLog {
        audit_id: row.get(0)?,
        actor: row.get(1)?,
        action,
        entry_id: row.get(3)?,
        old_value_json: parse_json(row, 4)?,
        new_value_json: parse_json(row, 5)?,
        description: row.get(6)?,
        created_at,
    })
}

fn parse_json(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<serde_json::Value>> {
    let raw: Option<String> = row.get(idx)?;
    match raw {
        Some(s) => serde_json::from_str(&s).map(Some).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        }),
        None => Ok(None),
    }
}
