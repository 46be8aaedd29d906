// ==========================================
// 高校排课管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供上层请求处理器调用
// ==========================================

pub mod error;
pub mod timetable_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use timetable_api::{
    BulkDeleteResponse, BulkFailure, ConflictCheckResponse, EntryListResponse,
    EntryMutationResponse, OperationResponse, Pagination, TimetableApi,
};
