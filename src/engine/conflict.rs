// ==========================================
// 高校排课管理系统 - 冲突检测引擎
// ==========================================
// 核心算法: (教师, 时间段, 学期, 学年) 与 (教室, 时间段, 学期, 学年)
// 两个槽位键各自只能被一条激活记录占用
//
// 检查顺序: 教师冲突先于教室冲突，只报告首个命中
// 更新路径传入 exclude_entry_id，记录不与自己的旧行冲突
//
// 此处的查询是用户友好的快速路径；检查与写入是两条语句，
// 并发窗口由 timetable_entry 上的双部分唯一索引关死，
// 写入时的唯一约束违反才是权威冲突信号
// ==========================================

use std::sync::Arc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::entry::TimetableEntry;
use crate::repository::entry_repo::TimetableEntryRepository;
use crate::repository::reference_repo::{
    ClassroomRepository, FacultyRepository, SubjectRepository,
};

// ==========================================
// ConflictDetector - 冲突检测引擎
// ==========================================
pub struct ConflictDetector {
    entry_repo: Arc<TimetableEntryRepository>,
    subject_repo: Arc<SubjectRepository>,
    faculty_repo: Arc<FacultyRepository>,
    classroom_repo: Arc<ClassroomRepository>,
}

impl ConflictDetector {
    pub fn new(
        entry_repo: Arc<TimetableEntryRepository>,
        subject_repo: Arc<SubjectRepository>,
        faculty_repo: Arc<FacultyRepository>,
        classroom_repo: Arc<ClassroomRepository>,
    ) -> Self {
        Self {
            entry_repo,
            subject_repo,
            faculty_repo,
            classroom_repo,
        }
    }

    /// 检测提议的槽位占用是否与现有激活记录冲突
    ///
    /// # 参数
    /// - exclude_entry_id: 更新时排除的记录ID
    ///
    /// # 返回
    /// - Ok(None): 无冲突
    /// - Ok(Some(message)): 冲突，附人读描述
    pub fn check(
        &self,
        faculty_id: &str,
        classroom_id: &str,
        slot_id: &str,
        semester: i32,
        academic_year: &str,
        exclude_entry_id: Option<&str>,
    ) -> ApiResult<Option<String>> {
        // 1. 教师冲突
        if let Some(existing) = self
            .entry_repo
            .find_active_by_faculty_slot(
                faculty_id,
                slot_id,
                semester,
                academic_year,
                exclude_entry_id,
            )
            .map_err(ApiError::from)?
        {
            debug!(faculty_id, slot_id, existing = %existing.entry_id, "检测到教师冲突");
            return Ok(Some(self.describe_faculty_conflict(&existing)));
        }

        // 2. 教室冲突
        if let Some(existing) = self
            .entry_repo
            .find_active_by_classroom_slot(
                classroom_id,
                slot_id,
                semester,
                academic_year,
                exclude_entry_id,
            )
            .map_err(ApiError::from)?
        {
            debug!(classroom_id, slot_id, existing = %existing.entry_id, "检测到教室冲突");
            return Ok(Some(self.describe_classroom_conflict(&existing)));
        }

        Ok(None)
    }

    /// 检测并在冲突时直接返回 ConflictError（流水线硬失败路径）
    pub fn ensure_no_conflict(
        &self,
        faculty_id: &str,
        classroom_id: &str,
        slot_id: &str,
        semester: i32,
        academic_year: &str,
        exclude_entry_id: Option<&str>,
    ) -> ApiResult<()> {
        match self.check(
            faculty_id,
            classroom_id,
            slot_id,
            semester,
            academic_year,
            exclude_entry_id,
        )? {
            None => Ok(()),
            Some(message) => Err(ApiError::ConflictError(message)),
        }
    }

    // ==========================================
    // 冲突描述
    // ==========================================

    /// 教师冲突: 描述占用该教师时间的现有课程与教室
    fn describe_faculty_conflict(&self, existing: &TimetableEntry) -> String {
        let subject = self.subject_label(&existing.subject_id);
        let room = self.classroom_label(&existing.classroom_id);
        format!(
            "教师时间冲突: 该教师在此时间段已安排 {} (教室: {})",
            subject, room
        )
    }

    /// 教室冲突: 描述占用该教室的现有课程与授课教师
    fn describe_classroom_conflict(&self, existing: &TimetableEntry) -> String {
        let subject = self.subject_label(&existing.subject_id);
        let faculty = self.faculty_label(&existing.faculty_id);
        format!(
            "教室占用冲突: 该教室在此时间段已安排 {} (教师: {})",
            subject, faculty
        )
    }

    // 名称查询失败不影响冲突结论，回落到ID标签
    fn subject_label(&self, subject_id: &str) -> String {
        self.subject_repo
            .find_by_id(subject_id)
            .ok()
            .flatten()
            .map(|s| format!("《{}》", s.subject_name))
            .unwrap_or_else(|| format!("课程(id={})", subject_id))
    }

    fn faculty_label(&self, faculty_id: &str) -> String {
        self.faculty_repo
            .find_by_id(faculty_id)
            .ok()
            .flatten()
            .map(|f| f.faculty_name)
            .unwrap_or_else(|| format!("教师(id={})", faculty_id))
    }

    fn classroom_label(&self, classroom_id: &str) -> String {
        self.classroom_repo
            .find_by_id(classroom_id)
            .ok()
            .flatten()
            .map(|c| c.display_name())
            .unwrap_or_else(|| format!("教室(id={})", classroom_id))
    }
}
