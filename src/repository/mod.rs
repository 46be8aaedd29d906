// ==========================================
// 高校排课管理系统 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod audit_repo;
pub mod entry_repo;
pub mod error;
pub mod reference_repo;

// 重导出核心仓储
pub use audit_repo::AuditLogRepository;
pub use entry_repo::{EntryFilter, TimetableEntryRepository};
pub use error::{RepositoryError, RepositoryResult};
pub use reference_repo::{
    AssignmentRepository, ClassroomRepository, EnrollmentRepository, FacultyRepository,
    SubjectRepository, TimeSlotRepository,
};
