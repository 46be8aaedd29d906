// ==========================================
// 高校排课管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod audit;
pub mod entry;
pub mod reference;
pub mod types;
pub mod warning;

// 重导出核心类型
pub use audit::AuditLog;
pub use entry::{EntryDraft, RawEntryDraft, TimetableEntry, DEFAULT_SECTION};
pub use reference::{Classroom, Faculty, FacultySubjectAssignment, Subject, TimeSlot};
pub use types::{
    AuditAction, ClassroomStatus, EntryStatus, WarningKind, WarningLevel,
};
pub use warning::ScheduleWarning;
