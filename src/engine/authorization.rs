// ==========================================
// 高校排课管理系统 - 授权校验器
// ==========================================
// 职责: 确认教师持有课程的激活授课分配
// 约束: 无副作用; 错误消息用人读名称，名称查询失败回落通用称谓
// ==========================================

use std::sync::Arc;
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::repository::reference_repo::{
    AssignmentRepository, FacultyRepository, SubjectRepository,
};

// ==========================================
// AuthorizationChecker - 授权校验器
// ==========================================
pub struct AuthorizationChecker {
    assignment_repo: Arc<AssignmentRepository>,
    faculty_repo: Arc<FacultyRepository>,
    subject_repo: Arc<SubjectRepository>,
}

impl AuthorizationChecker {
    pub fn new(
        assignment_repo: Arc<AssignmentRepository>,
        faculty_repo: Arc<FacultyRepository>,
        subject_repo: Arc<SubjectRepository>,
    ) -> Self {
        Self {
            assignment_repo,
            faculty_repo,
            subject_repo,
        }
    }

    /// 校验 (教师, 课程) 存在激活授课分配
    ///
    /// # 返回
    /// - Ok(()): 已分配
    /// - Err(AuthorizationError): 未分配，消息点名教师与课程
    pub fn ensure_assigned(&self, faculty_id: &str, subject_id: &str) -> ApiResult<()> {
        let assignment = self
            .assignment_repo
            .find_active(faculty_id, subject_id)
            .map_err(ApiError::from)?;

        if assignment.is_some() {
            debug!(faculty_id, subject_id, "授课分配校验通过");
            return Ok(());
        }

        // 组装人读消息；名称查询失败不升级为错误，回落通用称谓
        let faculty_label = self
            .faculty_repo
            .find_by_id(faculty_id)
            .ok()
            .flatten()
            .map(|f| f.faculty_name)
            .unwrap_or_else(|| format!("教师(id={})", faculty_id));

        let subject_label = self
            .subject_repo
            .find_by_id(subject_id)
            .ok()
            .flatten()
            .map(|s| format!("《{}》", s.subject_name))
            .unwrap_or_else(|| format!("课程(id={})", subject_id));

        Err(ApiError::AuthorizationError(format!(
            "{} 未被分配讲授 {}",
            faculty_label, subject_label
        )))
    }
}
