// ==========================================
// 高校排课管理系统 - 建议提示引擎
// ==========================================
// 职责: 计算非阻断提示（容量、跨院系授课）
// 约束: 提示只随成功结果返回; 参照数据查询失败降级为
// "无法核查"提示，从不使请求失败
// ==========================================

use std::sync::Arc;
use tracing::debug;

use crate::domain::entry::EntryDraft;
use crate::domain::types::WarningKind;
use crate::domain::warning::ScheduleWarning;
use crate::repository::reference_repo::{
    ClassroomRepository, EnrollmentRepository, FacultyRepository, SubjectRepository,
};

// ==========================================
// 容量分档
// ==========================================

/// 容量分档阈值: 接近容量
pub const NEAR_CAPACITY_RATIO: f64 = 0.9;

/// 容量分档阈值: 高占用
pub const HIGH_OCCUPANCY_RATIO: f64 = 0.8;

/// 计算容量分档，只返回最高一档
///
/// - enrolled > capacity        → 超容量
/// - enrolled > 0.9 × capacity  → 接近容量
/// - enrolled > 0.8 × capacity  → 高占用（信息级）
/// - 其他                       → 无提示
/// 生效容量: 教室座位数，除非人数上限覆写更低
///
/// 覆写只能收紧，不能放宽到教室座位数之上
pub fn effective_capacity(room_capacity: i64, max_students: Option<i32>) -> i64 {
    match max_students {
        Some(m) => room_capacity.min(i64::from(m)),
        None => room_capacity,
    }
}

pub fn capacity_band(enrolled: i64, capacity: i64) -> Option<WarningKind> {
    if capacity <= 0 {
        return None;
    }
    let cap = capacity as f64;
    let n = enrolled as f64;

    if enrolled > capacity {
        Some(WarningKind::CapacityExceeded)
    } else if n > cap * NEAR_CAPACITY_RATIO {
        Some(WarningKind::NearCapacity)
    } else if n > cap * HIGH_OCCUPANCY_RATIO {
        Some(WarningKind::HighOccupancy)
    } else {
        None
    }
}

// ==========================================
// AdvisoryEngine - 建议提示引擎
// ==========================================
pub struct AdvisoryEngine {
    enrollment_repo: Arc<EnrollmentRepository>,
    classroom_repo: Arc<ClassroomRepository>,
    faculty_repo: Arc<FacultyRepository>,
    subject_repo: Arc<SubjectRepository>,
}

impl AdvisoryEngine {
    pub fn new(
        enrollment_repo: Arc<EnrollmentRepository>,
        classroom_repo: Arc<ClassroomRepository>,
        faculty_repo: Arc<FacultyRepository>,
        subject_repo: Arc<SubjectRepository>,
    ) -> Self {
        Self {
            enrollment_repo,
            classroom_repo,
            faculty_repo,
            subject_repo,
        }
    }

    /// 计算草稿的全部提示
    pub fn advise(&self, draft: &EntryDraft) -> Vec<ScheduleWarning> {
        let mut warnings = Vec::new();

        if let Some(w) = self.capacity_advisory(draft) {
            warnings.push(w);
        }
        if let Some(w) = self.department_advisory(draft) {
            warnings.push(w);
        }

        debug!(count = warnings.len(), "建议提示计算完成");
        warnings
    }

    // ==========================================
    // 容量建议
    // ==========================================

    fn capacity_advisory(&self, draft: &EntryDraft) -> Option<ScheduleWarning> {
        let classroom = match self.classroom_repo.find_by_id(&draft.classroom_id) {
            Ok(Some(room)) => room,
            // 教室缺失或查询失败 → 无法核查，降级提示
            _ => return Some(unverified("无法核查教室容量与选课人数")),
        };

        let enrolled = match self.enrollment_repo.count_enrolled(
            &draft.subject_id,
            &draft.section,
            draft.semester,
            &draft.academic_year,
        ) {
            Ok(n) => n,
            Err(_) => return Some(unverified("无法核查教室容量与选课人数")),
        };

        let capacity = effective_capacity(i64::from(classroom.capacity), draft.max_students);
        match capacity_band(enrolled, capacity)? {
            WarningKind::CapacityExceeded => Some(ScheduleWarning::warning(
                WarningKind::CapacityExceeded,
                format!(
                    "选课人数({})已超过教室 {} 容量({})",
                    enrolled,
                    classroom.display_name(),
                    capacity
                ),
            )),
            WarningKind::NearCapacity => Some(ScheduleWarning::warning(
                WarningKind::NearCapacity,
                format!(
                    "选课人数({})接近教室 {} 容量({})",
                    enrolled,
                    classroom.display_name(),
                    capacity
                ),
            )),
            WarningKind::HighOccupancy => Some(ScheduleWarning::info(
                WarningKind::HighOccupancy,
                format!(
                    "教室 {} 占用率较高: 选课人数 {}/{}",
                    classroom.display_name(),
                    enrolled,
                    capacity
                ),
            )),
            // capacity_band 只产生以上三档
            _ => None,
        }
    }

    // ==========================================
    // 跨院系建议
    // ==========================================

    fn department_advisory(&self, draft: &EntryDraft) -> Option<ScheduleWarning> {
        let faculty = match self.faculty_repo.find_by_id(&draft.faculty_id) {
            Ok(Some(f)) => f,
            _ => return Some(unverified("无法核查教师与课程的院系归属")),
        };
        let subject = match self.subject_repo.find_by_id(&draft.subject_id) {
            Ok(Some(s)) => s,
            _ => return Some(unverified("无法核查教师与课程的院系归属")),
        };

        if faculty.department != subject.department {
            return Some(ScheduleWarning::info(
                WarningKind::CrossDepartment,
                format!(
                    "跨院系授课: 教师属于{}，课程属于{}",
                    faculty.department, subject.department
                ),
            ));
        }
        None
    }
}

fn unverified(message: &str) -> ScheduleWarning {
    ScheduleWarning::warning(WarningKind::Unverified, message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_banding_boundaries() {
        // 超容量
        assert_eq!(capacity_band(101, 100), Some(WarningKind::CapacityExceeded));
        // 接近容量 (>90%)
        assert_eq!(capacity_band(91, 100), Some(WarningKind::NearCapacity));
        // 高占用 (>80%)
        assert_eq!(capacity_band(81, 100), Some(WarningKind::HighOccupancy));
        // 无提示
        assert_eq!(capacity_band(50, 100), None);
    }

    #[test]
    fn test_only_highest_band_fires() {
        // 超容量同时满足三档条件，只报最高档
        assert_eq!(capacity_band(150, 100), Some(WarningKind::CapacityExceeded));
        // 刚好等于容量不算超，落入接近容量档
        assert_eq!(capacity_band(100, 100), Some(WarningKind::NearCapacity));
        // 刚好90%不算接近，落入高占用档
        assert_eq!(capacity_band(90, 100), Some(WarningKind::HighOccupancy));
        // 刚好80%无提示
        assert_eq!(capacity_band(80, 100), None);
    }

    #[test]
    fn test_effective_capacity_override_only_tightens() {
        // 覆写更低 → 生效
        assert_eq!(effective_capacity(100, Some(50)), 50);
        // 覆写更高 → 仍受教室座位数约束
        assert_eq!(effective_capacity(60, Some(200)), 60);
        // 无覆写 → 教室座位数
        assert_eq!(effective_capacity(100, None), 100);
    }

    #[test]
    fn test_degenerate_capacity() {
        assert_eq!(capacity_band(10, 0), None);
        assert_eq!(capacity_band(10, -1), None);
    }
}
