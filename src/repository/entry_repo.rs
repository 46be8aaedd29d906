// ==========================================
// 高校排课管理系统 - 排课记录数据仓储
// ==========================================
// 红线: 所有查询参数化，禁止拼接调用方提供的值
// 红线: Repository 不做业务逻辑,只做数据映射
// ==========================================

mod core;
mod queries;


pub use self::core::TimetableEntryRepository;
pub use self::queries::EntryFilter;
