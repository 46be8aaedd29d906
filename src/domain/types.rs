// ==========================================
// 高校排课管理系统 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 排课记录状态 (Entry Status)
// ==========================================
// 软删除建模为显式双状态枚举，而不是裸布尔标志：
// 状态处理在编译期穷尽匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    Active,   // 激活（默认查询可见）
    Inactive, // 停用（软删除终态，管理视图仍可查）
}

impl EntryStatus {
    /// 是否为激活状态
    pub fn is_active(self) -> bool {
        self == EntryStatus::Active
    }

    /// 从数据库 is_active 标志转换
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            EntryStatus::Active
        } else {
            EntryStatus::Inactive
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Active => write!(f, "ACTIVE"),
            EntryStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

// ==========================================
// 审计操作类型 (Audit Action)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,     // 创建排课
    Update,     // 更新排课
    Delete,     // 删除（公开路径，要求当前激活）
    Activate,   // 重新激活
    Deactivate, // 停用（管理路径）
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditAction::Create => write!(f, "CREATE"),
            AuditAction::Update => write!(f, "UPDATE"),
            AuditAction::Delete => write!(f, "DELETE"),
            AuditAction::Activate => write!(f, "ACTIVATE"),
            AuditAction::Deactivate => write!(f, "DEACTIVATE"),
        }
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(AuditAction::Create),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            "ACTIVATE" => Ok(AuditAction::Activate),
            "DEACTIVATE" => Ok(AuditAction::Deactivate),
            other => Err(format!("未知的审计操作类型: {}", other)),
        }
    }
}

// ==========================================
// 教室可用状态 (Classroom Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassroomStatus {
    Available,   // 可用
    Maintenance, // 维修中
    Reserved,    // 专用保留
}

impl fmt::Display for ClassroomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassroomStatus::Available => write!(f, "AVAILABLE"),
            ClassroomStatus::Maintenance => write!(f, "MAINTENANCE"),
            ClassroomStatus::Reserved => write!(f, "RESERVED"),
        }
    }
}

impl FromStr for ClassroomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(ClassroomStatus::Available),
            "MAINTENANCE" => Ok(ClassroomStatus::Maintenance),
            "RESERVED" => Ok(ClassroomStatus::Reserved),
            other => Err(format!("未知的教室状态: {}", other)),
        }
    }
}

// ==========================================
// 提示等级 (Warning Level)
// ==========================================
// 提示从不阻断操作，只随成功结果返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningLevel {
    Info,    // 信息提示
    Warning, // 警告
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningLevel::Info => write!(f, "INFO"),
            WarningLevel::Warning => write!(f, "WARNING"),
        }
    }
}

// ==========================================
// 提示类别 (Warning Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    CapacityExceeded, // 选课人数超过教室容量
    NearCapacity,     // 接近容量（>90%）
    HighOccupancy,    // 高占用（>80%，信息级）
    CrossDepartment,  // 跨院系授课
    Unverified,       // 参照数据查询失败，无法核查
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::CapacityExceeded => write!(f, "CAPACITY_EXCEEDED"),
            WarningKind::NearCapacity => write!(f, "NEAR_CAPACITY"),
            WarningKind::HighOccupancy => write!(f, "HIGH_OCCUPANCY"),
            WarningKind::CrossDepartment => write!(f, "CROSS_DEPARTMENT"),
            WarningKind::Unverified => write!(f, "UNVERIFIED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_status_flag_roundtrip() {
        assert!(EntryStatus::from_flag(true).is_active());
        assert!(!EntryStatus::from_flag(false).is_active());
        assert_eq!(EntryStatus::Active.to_string(), "ACTIVE");
        assert_eq!(EntryStatus::Inactive.to_string(), "INACTIVE");
    }

    #[test]
    fn test_audit_action_parse() {
        assert_eq!("CREATE".parse::<AuditAction>().unwrap(), AuditAction::Create);
        assert_eq!(
            "DEACTIVATE".parse::<AuditAction>().unwrap(),
            AuditAction::Deactivate
        );
        assert!("DROP".parse::<AuditAction>().is_err());
    }

    #[test]
    fn test_classroom_status_parse() {
        assert_eq!(
            "AVAILABLE".parse::<ClassroomStatus>().unwrap(),
            ClassroomStatus::Available
        );
        assert!("CLOSED".parse::<ClassroomStatus>().is_err());
    }
}
