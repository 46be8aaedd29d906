// ==========================================
// 高校排课管理系统 - 排课 API
// ==========================================
// 职责: 编排校验流水线并提交排课变更
// 流水线: 清洗 → 学年格式 → 授权 → 可用性 → 冲突 → 建议 → 写入 → 审计
// 约束: 操作人显式传入，本层不读任何会话态
// 约束: 业务失败转为结构化结果返回，不向调用方抛出驱动层错误
// ==========================================

mod mutations;
mod queries;

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::audit::AuditLog;
use crate::domain::entry::TimetableEntry;
use crate::domain::types::AuditAction;
use crate::domain::warning::ScheduleWarning;
use crate::engine::{
    AdvisoryEngine, AuthorizationChecker, AvailabilityChecker, ConflictDetector,
};
use crate::engine::{academic_year, sanitizer};
use crate::repository::audit_repo::AuditLogRepository;
use crate::repository::entry_repo::TimetableEntryRepository;
use crate::repository::reference_repo::{
    ClassroomRepository, FacultyRepository, SubjectRepository, TimeSlotRepository,
};

pub use self::queries::{EntryListResponse, Pagination};

// ==========================================
// 响应类型
// ==========================================

/// 创建/更新排课的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMutationResponse {
    pub success: bool,
    pub entry_id: Option<String>,
    pub warnings: Vec<ScheduleWarning>,
    pub message: Option<String>,
}

impl EntryMutationResponse {
    fn succeeded(entry_id: String, warnings: Vec<ScheduleWarning>) -> Self {
        Self {
            success: true,
            entry_id: Some(entry_id),
            warnings,
            message: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            entry_id: None,
            warnings: Vec::new(),
            message: Some(message),
        }
    }
}

/// 状态切换类操作（删除/激活/停用）的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    pub success: bool,
    pub message: Option<String>,
}

impl OperationResponse {
    fn succeeded() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
        }
    }
}

/// 独立冲突预检的响应（供前端在提交前试探）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub has_conflict: bool,
    pub message: String,
}

/// 批量删除的响应: 部分成功是正常结果，不是错误
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub success: bool,
    pub deactivated: Vec<String>,
    pub failed: Vec<BulkFailure>,
    pub message: String,
}

/// 批量操作中单条失败的明细
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkFailure {
    pub entry_id: String,
    pub message: String,
}

// ==========================================
// TimetableApi - 排课 API
// ==========================================

/// 排课API
///
/// 职责：
/// 1. 排课记录的创建/更新（全量校验流水线）
/// 2. 删除/停用/激活（状态切换，不重校验）
/// 3. 独立冲突预检
/// 4. 列表查询与审计追溯
pub struct TimetableApi {
    entry_repo: Arc<TimetableEntryRepository>,
    audit_repo: Arc<AuditLogRepository>,
    subject_repo: Arc<SubjectRepository>,
    faculty_repo: Arc<FacultyRepository>,
    classroom_repo: Arc<ClassroomRepository>,
    slot_repo: Arc<TimeSlotRepository>,
    authorization: Arc<AuthorizationChecker>,
    availability: Arc<AvailabilityChecker>,
    conflict: Arc<ConflictDetector>,
    advisory: Arc<AdvisoryEngine>,
}

impl TimetableApi {
    /// 创建新的TimetableApi实例
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        entry_repo: Arc<TimetableEntryRepository>,
        audit_repo: Arc<AuditLogRepository>,
        subject_repo: Arc<SubjectRepository>,
        faculty_repo: Arc<FacultyRepository>,
        classroom_repo: Arc<ClassroomRepository>,
        slot_repo: Arc<TimeSlotRepository>,
        authorization: Arc<AuthorizationChecker>,
        availability: Arc<AvailabilityChecker>,
        conflict: Arc<ConflictDetector>,
        advisory: Arc<AdvisoryEngine>,
    ) -> Self {
        Self {
            entry_repo,
            audit_repo,
            subject_repo,
            faculty_repo,
            classroom_repo,
            slot_repo,
            authorization,
            availability,
            conflict,
            advisory,
        }
    }

    // ==========================================
    // 流水线共用
    // ==========================================

    /// 对已定型草稿执行剩余校验流水线，返回建议提示
    ///
    /// # 参数
    /// - exclude_entry_id: 更新路径传入自身ID，冲突检查排除自己
    fn validate_draft(
        &self,
        draft: &crate::domain::entry::EntryDraft,
        exclude_entry_id: Option<&str>,
    ) -> ApiResult<Vec<ScheduleWarning>> {
        academic_year::validate(&draft.academic_year, Local::now().date_naive())?;
        self.authorization
            .ensure_assigned(&draft.faculty_id, &draft.subject_id)?;
        self.availability.ensure_available(draft)?;
        self.conflict.ensure_no_conflict(
            &draft.faculty_id,
            &draft.classroom_id,
            &draft.slot_id,
            draft.semester,
            &draft.academic_year,
            exclude_entry_id,
        )?;
        // 建议提示从不阻断
        Ok(self.advisory.advise(draft))
    }

    /// 按ID加载记录，不存在转为 NotFound
    fn load_entry(&self, entry_id: &str) -> ApiResult<TimetableEntry> {
        if entry_id.trim().is_empty() {
            return Err(ApiError::ValidationError("记录ID不能为空".to_string()));
        }
        self.entry_repo
            .find_by_id(entry_id)
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::NotFound(format!("排课记录(id={})不存在", entry_id)))
    }

    // ==========================================
    // 审计
    // ==========================================

    /// 写一条审计日志（尽力而为: 失败记入本地日志后吞掉，从不回滚主操作）
    fn record_audit(
        &self,
        actor: &str,
        action: AuditAction,
        entry_id: &str,
        old_value: Option<JsonValue>,
        new_value: Option<JsonValue>,
        description: String,
        now: NaiveDateTime,
    ) {
        let log = AuditLog::new(actor, action, entry_id, old_value, new_value, description, now);
        if let Err(e) = self.audit_repo.insert(&log) {
            warn!(
                error = %e,
                entry_id,
                action = %action,
                "审计日志写入失败"
            );
        }
    }

    /// 生成人读操作描述（名称查询失败回落到ID标签）
    fn describe_entry(&self, action: AuditAction, entry: &TimetableEntry) -> String {
        let subject = self
            .subject_repo
            .find_by_id(&entry.subject_id)
            .ok()
            .flatten()
            .map(|s| format!("《{}》", s.subject_name))
            .unwrap_or_else(|| format!("课程(id={})", entry.subject_id));

        let faculty = self
            .faculty_repo
            .find_by_id(&entry.faculty_id)
            .ok()
            .flatten()
            .map(|f| f.faculty_name)
            .unwrap_or_else(|| format!("教师(id={})", entry.faculty_id));

        let room = self
            .classroom_repo
            .find_by_id(&entry.classroom_id)
            .ok()
            .flatten()
            .map(|c| c.display_name())
            .unwrap_or_else(|| format!("教室(id={})", entry.classroom_id));

        let slot = self
            .slot_repo
            .find_by_id(&entry.slot_id)
            .ok()
            .flatten()
            .map(|t| t.display_name())
            .unwrap_or_else(|| format!("时间段(id={})", entry.slot_id));

        let verb = match action {
            AuditAction::Create => "创建排课",
            AuditAction::Update => "更新排课",
            AuditAction::Delete => "删除排课",
            AuditAction::Activate => "激活排课",
            AuditAction::Deactivate => "停用排课",
        };

        format!(
            "{}: {} 由 {} 在 {} {} ({}学年 第{}学期 {}班)",
            verb, subject, faculty, room, slot, entry.academic_year, entry.semester, entry.section
        )
    }

    /// 记录的结构化快照（序列化失败记日志并降级为 None）
    fn snapshot(entry: &TimetableEntry) -> Option<JsonValue> {
        match serde_json::to_value(entry) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(error = %e, entry_id = %entry.entry_id, "记录快照序列化失败");
                None
            }
        }
    }
}
