// ==========================================
// 高校排课管理系统 - 资源可用性校验器
// ==========================================
// 检查顺序: 教室 → 时间段 → 课程 → 教师账号
// 顺序只影响错误消息的具体性，四项全部成立操作才能继续
// ==========================================

use std::sync::Arc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::entry::EntryDraft;
use crate::repository::reference_repo::{
    ClassroomRepository, FacultyRepository, SubjectRepository, TimeSlotRepository,
};

// ==========================================
// AvailabilityChecker - 可用性校验器
// ==========================================
pub struct AvailabilityChecker {
    classroom_repo: Arc<ClassroomRepository>,
    slot_repo: Arc<TimeSlotRepository>,
    subject_repo: Arc<SubjectRepository>,
    faculty_repo: Arc<FacultyRepository>,
}

impl AvailabilityChecker {
    pub fn new(
        classroom_repo: Arc<ClassroomRepository>,
        slot_repo: Arc<TimeSlotRepository>,
        subject_repo: Arc<SubjectRepository>,
        faculty_repo: Arc<FacultyRepository>,
    ) -> Self {
        Self {
            classroom_repo,
            slot_repo,
            subject_repo,
            faculty_repo,
        }
    }

    /// 依次校验草稿引用的四类资源均可用
    pub fn ensure_available(&self, draft: &EntryDraft) -> ApiResult<()> {
        // 1. 教室: 存在、启用、状态可用
        let classroom = self
            .classroom_repo
            .find_by_id(&draft.classroom_id)
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::AvailabilityError(format!("教室(id={})不存在", draft.classroom_id))
            })?;
        if !classroom.is_schedulable() {
            return Err(ApiError::AvailabilityError(format!(
                "教室 {} 当前不可用（状态: {}）",
                classroom.display_name(),
                classroom.status
            )));
        }

        // 2. 时间段: 存在且启用
        let slot = self
            .slot_repo
            .find_by_id(&draft.slot_id)
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::AvailabilityError(format!("时间段(id={})不存在", draft.slot_id))
            })?;
        if !slot.is_active {
            return Err(ApiError::AvailabilityError(format!(
                "时间段 {} 已停用",
                slot.display_name()
            )));
        }

        // 3. 课程: 存在且启用
        let subject = self
            .subject_repo
            .find_by_id(&draft.subject_id)
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::AvailabilityError(format!("课程(id={})不存在", draft.subject_id))
            })?;
        if !subject.is_active {
            return Err(ApiError::AvailabilityError(format!(
                "课程《{}》已停用",
                subject.subject_name
            )));
        }

        // 4. 教师: 存在且关联账号激活
        let faculty = self
            .faculty_repo
            .find_by_id(&draft.faculty_id)
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::AvailabilityError(format!("教师(id={})不存在", draft.faculty_id))
            })?;
        if !faculty.is_account_active() {
            return Err(ApiError::AvailabilityError(format!(
                "教师 {} 的账号未激活（状态: {}）",
                faculty.faculty_name, faculty.account_status
            )));
        }

        debug!(
            classroom_id = %draft.classroom_id,
            slot_id = %draft.slot_id,
            subject_id = %draft.subject_id,
            faculty_id = %draft.faculty_id,
            "资源可用性校验通过"
        );
        Ok(())
    }
}
