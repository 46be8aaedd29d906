// ==========================================
// 高校排课管理系统 - 引擎层
// ==========================================
// 职责: 排课校验规则（清洗/授权/可用性/冲突/建议）
// 约束: 引擎只读参照数据与排课记录，写入由 API 层编排
// ==========================================

pub mod academic_year;
pub mod advisory;
pub mod authorization;
pub mod availability;
pub mod conflict;
pub mod sanitizer;

// 重导出核心引擎
pub use advisory::AdvisoryEngine;
pub use authorization::AuthorizationChecker;
pub use availability::AvailabilityChecker;
pub use conflict::ConflictDetector;
