// ==========================================
// 高校排课管理系统 - 应用装配
// ==========================================

pub mod state;

pub use state::AppState;
