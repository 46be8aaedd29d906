// ==========================================
// 高校排课管理系统 - 审计日志领域模型
// ==========================================
// 红线: 所有排课写入必须记录
// 用途: 审计追踪，只追加，不更新不删除
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::domain::types::AuditAction;

// ==========================================
// AuditLog - 审计日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub audit_id: String,              // 日志ID
    pub actor: String,                 // 操作人（显式传入，不读会话态）
    pub action: AuditAction,           // 操作类型
    pub entry_id: String,              // 受影响的排课记录
    pub old_value_json: Option<JsonValue>, // 变更前快照
    pub new_value_json: Option<JsonValue>, // 变更后快照
    pub description: String,           // 人读描述
    pub created_at: NaiveDateTime,     // 记录时间
}

impl AuditLog {
    /// 构造一条新审计日志
    pub fn new(
        actor: &str,
        action: AuditAction,
        entry_id: &str,
        old_value_json: Option<JsonValue>,
        new_value_json: Option<JsonValue>,
        description: String,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            audit_id: Uuid::new_v4().to_string(),
            actor: actor.to_string(),
            action,
            entry_id: entry_id.to_string(),
            old_value_json,
            new_value_json,
            description,
            created_at: now,
        }
    }
}
