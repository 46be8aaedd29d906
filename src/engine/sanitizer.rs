// ==========================================
// 高校排课管理系统 - 字段清洗器
// ==========================================
// 职责: 将边界原始输入规范化并定型为 EntryDraft
// 约束: 缺失的必填字段在一条消息中全部列出; 无副作用
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::entry::{EntryDraft, RawEntryDraft, DEFAULT_SECTION};

/// 清洗原始草稿
///
/// 规则:
/// - 必填: 课程/教师/教室/时间段/学期/学年，缺失项合并为一条 ValidationError
/// - 班级标签缺省为 "A"
/// - 备注/人数上限为可选，空白规范化为 None
/// - 学期必须为正整数（格式正确性，学年格式由专门校验器负责）
pub fn sanitize(raw: &RawEntryDraft) -> ApiResult<EntryDraft> {
    let mut missing: Vec<&str> = Vec::new();

    let subject_id = normalize(&raw.subject_id);
    if subject_id.is_none() {
        missing.push("课程");
    }
    let faculty_id = normalize(&raw.faculty_id);
    if faculty_id.is_none() {
        missing.push("教师");
    }
    let classroom_id = normalize(&raw.classroom_id);
    if classroom_id.is_none() {
        missing.push("教室");
    }
    let slot_id = normalize(&raw.slot_id);
    if slot_id.is_none() {
        missing.push("时间段");
    }
    if raw.semester.is_none() {
        missing.push("学期");
    }
    let academic_year = normalize(&raw.academic_year);
    if academic_year.is_none() {
        missing.push("学年");
    }

    if !missing.is_empty() {
        return Err(ApiError::ValidationError(format!(
            "缺少必填字段: {}",
            missing.join("、")
        )));
    }

    let semester = raw.semester.unwrap_or(1);
    if semester < 1 {
        return Err(ApiError::ValidationError(format!(
            "学期必须为正整数, 实际: {}",
            semester
        )));
    }

    if let Some(max) = raw.max_students {
        if max < 1 {
            return Err(ApiError::ValidationError(format!(
                "人数上限必须为正整数, 实际: {}",
                max
            )));
        }
    }

    Ok(EntryDraft {
        // 必填字段上面已校验非空
        subject_id: subject_id.unwrap_or_default(),
        faculty_id: faculty_id.unwrap_or_default(),
        classroom_id: classroom_id.unwrap_or_default(),
        slot_id: slot_id.unwrap_or_default(),
        section: normalize(&raw.section).unwrap_or_else(|| DEFAULT_SECTION.to_string()),
        semester,
        academic_year: academic_year.unwrap_or_default(),
        max_students: raw.max_students,
        notes: normalize(&raw.notes),
    })
}

/// 去除首尾空白，空串视为缺失
fn normalize(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
