// ==========================================
// 高校排课管理系统 - 排课记录领域模型
// ==========================================
// 不变量:
// - 任意两条激活记录的 (faculty, slot, semester, academic_year) 不同
// - 任意两条激活记录的 (classroom, slot, semester, academic_year) 不同
// - 记录的教师必须持有其课程的激活授课分配
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::EntryStatus;

/// 班级标签默认值
pub const DEFAULT_SECTION: &str = "A";

// ==========================================
// TimetableEntry - 排课记录
// ==========================================
// 生命周期: Draft(内存) → Active(持久化) → Inactive(软删除终态)
// 物理删除不在正常操作路径上
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub entry_id: String,          // 记录ID
    pub subject_id: String,        // 课程ID
    pub faculty_id: String,        // 教师ID
    pub classroom_id: String,      // 教室ID
    pub slot_id: String,           // 时间段ID
    pub section: String,           // 班级标签（默认"A"）
    pub semester: i32,             // 学期
    pub academic_year: String,     // 学年 "YYYY-YYYY"
    pub max_students: Option<i32>, // 人数上限覆写（可选）
    pub notes: Option<String>,     // 备注（可选）
    pub status: EntryStatus,       // 激活状态
    pub created_by: String,        // 创建人
    pub updated_by: Option<String>, // 最后修改人
    pub created_at: NaiveDateTime, // 创建时间
    pub updated_at: NaiveDateTime, // 修改时间
}

impl TimetableEntry {
    /// 由已通过校验的草稿构造新记录
    pub fn from_draft(
        entry_id: String,
        draft: &EntryDraft,
        created_by: &str,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            entry_id,
            subject_id: draft.subject_id.clone(),
            faculty_id: draft.faculty_id.clone(),
            classroom_id: draft.classroom_id.clone(),
            slot_id: draft.slot_id.clone(),
            section: draft.section.clone(),
            semester: draft.semester,
            academic_year: draft.academic_year.clone(),
            max_students: draft.max_students,
            notes: draft.notes.clone(),
            status: EntryStatus::Active,
            created_by: created_by.to_string(),
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 用草稿字段覆写现有记录（更新路径，保留创建信息与当前状态）
    pub fn apply_draft(&mut self, draft: &EntryDraft, updated_by: &str, now: NaiveDateTime) {
        self.subject_id = draft.subject_id.clone();
        self.faculty_id = draft.faculty_id.clone();
        self.classroom_id = draft.classroom_id.clone();
        self.slot_id = draft.slot_id.clone();
        self.section = draft.section.clone();
        self.semester = draft.semester;
        self.academic_year = draft.academic_year.clone();
        self.max_students = draft.max_students;
        self.notes = draft.notes.clone();
        self.updated_by = Some(updated_by.to_string());
        self.updated_at = now;
    }
}

// ==========================================
// RawEntryDraft - 边界原始输入
// ==========================================
// 调用方（上层请求处理器）提交的未校验数据，
// 字段全部可缺省，由字段清洗器统一校验并定型
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEntryDraft {
    pub subject_id: Option<String>,    // 课程ID
    pub faculty_id: Option<String>,    // 教师ID
    pub classroom_id: Option<String>,  // 教室ID
    pub slot_id: Option<String>,       // 时间段ID
    pub section: Option<String>,       // 班级标签
    pub semester: Option<i32>,         // 学期
    pub academic_year: Option<String>, // 学年
    pub max_students: Option<i32>,     // 人数上限覆写
    pub notes: Option<String>,         // 备注
}

// ==========================================
// EntryDraft - 已定型草稿
// ==========================================
// 字段清洗器的输出，进入校验流水线的唯一形态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDraft {
    pub subject_id: String,
    pub faculty_id: String,
    pub classroom_id: String,
    pub slot_id: String,
    pub section: String,
    pub semester: i32,
    pub academic_year: String,
    pub max_students: Option<i32>,
    pub notes: Option<String>,
}
