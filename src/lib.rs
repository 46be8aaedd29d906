// ==========================================
// 高校排课管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 排课校验与冲突检测核心 (不做自动排课求解)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 校验规则
pub mod engine;

// 配置层 - 数据库路径等
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组合根
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AuditAction, ClassroomStatus, EntryStatus, WarningKind, WarningLevel,
};

// 领域实体
pub use domain::{
    AuditLog, Classroom, EntryDraft, Faculty, FacultySubjectAssignment, RawEntryDraft,
    ScheduleWarning, Subject, TimeSlot, TimetableEntry,
};

// 引擎
pub use engine::{
    AdvisoryEngine, AuthorizationChecker, AvailabilityChecker, ConflictDetector,
};

// API
pub use api::{ApiError, ApiResult, TimetableApi};

// 应用状态
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "高校排课管理系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
