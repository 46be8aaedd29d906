// ==========================================
// 高校排课管理系统 - 排课提示领域模型
// ==========================================
// 提示是非阻断信号（容量、跨院系），
// 随成功结果返回，从不作为错误
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::{WarningKind, WarningLevel};

// ==========================================
// ScheduleWarning - 排课提示
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleWarning {
    pub kind: WarningKind,   // 类别
    pub level: WarningLevel, // 等级
    pub message: String,     // 人读消息
}

impl ScheduleWarning {
    pub fn new(kind: WarningKind, level: WarningLevel, message: String) -> Self {
        Self {
            kind,
            level,
            message,
        }
    }

    /// 信息级提示
    pub fn info(kind: WarningKind, message: String) -> Self {
        Self::new(kind, WarningLevel::Info, message)
    }

    /// 警告级提示
    pub fn warning(kind: WarningKind, message: String) -> Self {
        Self::new(kind, WarningLevel::Warning, message)
    }
}
