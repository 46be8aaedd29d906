use super::*;

use serde::{Deserialize, Serialize};

use crate::domain::audit::AuditLog;
use crate::repository::entry_repo::EntryFilter;

/// 每页记录数默认值
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// 每页记录数上限
pub const MAX_PAGE_SIZE: i64 = 200;

// ==========================================
// 响应类型
// ==========================================

/// 分页信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// 列表查询响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryListResponse {
    pub success: bool,
    pub entries: Vec<TimetableEntry>,
    pub pagination: Pagination,
    pub message: Option<String>,
}

impl TimetableApi {
    // ==========================================
    // 冲突预检
    // ==========================================

    /// 独立冲突预检（供前端在提交前试探一个提议的变更）
    ///
    /// 只做冲突查询，不校验授权/可用性；结论非权威，
    /// 写入时仍由存储层约束兜底
    pub fn check_conflicts(
        &self,
        faculty_id: &str,
        classroom_id: &str,
        slot_id: &str,
        semester: i32,
        academic_year: &str,
        exclude_entry_id: Option<&str>,
    ) -> ConflictCheckResponse {
        // 无法核查的输入与查询失败同策略: 按有冲突处理，
        // 调用方只看 has_conflict 也不会把非法输入当成"时段可用"
        for (value, label) in [
            (faculty_id, "教师ID"),
            (classroom_id, "教室ID"),
            (slot_id, "时间段ID"),
            (academic_year, "学年"),
        ] {
            if value.trim().is_empty() {
                return ConflictCheckResponse {
                    has_conflict: true,
                    message: format!("{}不能为空", label),
                };
            }
        }

        match self.conflict.check(
            faculty_id,
            classroom_id,
            slot_id,
            semester,
            academic_year,
            exclude_entry_id,
        ) {
            Ok(None) => ConflictCheckResponse {
                has_conflict: false,
                message: "该时间段可用".to_string(),
            },
            Ok(Some(message)) => ConflictCheckResponse {
                has_conflict: true,
                message,
            },
            // 预检失败按有冲突处理（保守），写入路径才是权威判定
            Err(e) => {
                warn!(error = %e, "冲突预检未完成");
                ConflictCheckResponse {
                    has_conflict: true,
                    message: format!("冲突检查未完成: {}", e.user_message()),
                }
            }
        }
    }

    // ==========================================
    // 列表查询
    // ==========================================

    /// 分页查询排课记录（读路径，不做校验）
    ///
    /// - page 从1起，越界值规范到1
    /// - page_size 规范到 [1, 200]，非正值取默认20
    pub fn list_entries(
        &self,
        filter: &EntryFilter,
        page: i64,
        page_size: i64,
    ) -> EntryListResponse {
        let page = page.max(1);
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };

        match self.entry_repo.list(filter, page, page_size) {
            Ok((entries, total)) => {
                let total_pages = if total == 0 {
                    0
                } else {
                    (total + page_size - 1) / page_size
                };
                EntryListResponse {
                    success: true,
                    entries,
                    pagination: Pagination {
                        page,
                        page_size,
                        total,
                        total_pages,
                    },
                    message: None,
                }
            }
            Err(e) => {
                let api_err = ApiError::from(e);
                warn!(error = %api_err, "排课列表查询失败");
                EntryListResponse {
                    success: false,
                    entries: Vec::new(),
                    pagination: Pagination {
                        page,
                        page_size,
                        total: 0,
                        total_pages: 0,
                    },
                    message: Some(api_err.user_message()),
                }
            }
        }
    }

    // ==========================================
    // 单条查询与审计追溯（管理视图）
    // ==========================================

    /// 查询单条记录详情（不论激活状态）
    pub fn get_entry(&self, entry_id: &str) -> ApiResult<Option<TimetableEntry>> {
        if entry_id.trim().is_empty() {
            return Err(ApiError::ValidationError("记录ID不能为空".to_string()));
        }
        self.entry_repo.find_by_id(entry_id).map_err(ApiError::from)
    }

    /// 查询记录的审计轨迹（时间正序）
    pub fn entry_audit_trail(&self, entry_id: &str) -> ApiResult<Vec<AuditLog>> {
        if entry_id.trim().is_empty() {
            return Err(ApiError::ValidationError("记录ID不能为空".to_string()));
        }
        self.audit_repo.find_by_entry(entry_id).map_err(ApiError::from)
    }

    /// 查询全局最近操作（时间倒序，limit 规范到 [1, 200]）
    pub fn recent_audit_logs(&self, limit: i64) -> ApiResult<Vec<AuditLog>> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        self.audit_repo.list_recent(limit).map_err(ApiError::from)
    }
}
