// ==========================================
// 高校排课管理系统 - 参照数据领域模型
// ==========================================
// 这些实体由协作方（教务主数据系统）拥有，
// 本核心只读取，不写入
// ==========================================

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::ClassroomStatus;

// ==========================================
// Subject - 课程
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub subject_id: String,   // 课程ID
    pub subject_code: String, // 课程代码（如 CS101）
    pub subject_name: String, // 课程名称
    pub department: String,   // 开课院系
    pub is_active: bool,      // 是否启用
}

// ==========================================
// Faculty - 教师
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    pub faculty_id: String,     // 教师ID
    pub faculty_name: String,   // 姓名
    pub department: String,     // 所属院系
    pub account_status: String, // 关联用户账号状态（ACTIVE 才可排课）
}

impl Faculty {
    /// 关联账号是否激活
    pub fn is_account_active(&self) -> bool {
        self.account_status == "ACTIVE"
    }
}

// ==========================================
// Classroom - 教室
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub classroom_id: String,    // 教室ID
    pub room_no: String,         // 房间号
    pub building: Option<String>, // 楼栋
    pub capacity: i32,           // 容量（座位数）
    pub status: ClassroomStatus, // 可用状态
    pub is_active: bool,         // 是否启用
}

impl Classroom {
    /// 是否可排课（启用且状态为可用）
    pub fn is_schedulable(&self) -> bool {
        self.is_active && self.status == ClassroomStatus::Available
    }

    /// 展示用名称（楼栋+房间号）
    pub fn display_name(&self) -> String {
        match &self.building {
            Some(b) => format!("{}{}", b, self.room_no),
            None => self.room_no.clone(),
        }
    }
}

// ==========================================
// TimeSlot - 时间段
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub slot_id: String,      // 时间段ID
    pub day_of_week: String,  // 星期（如 "周一"）
    pub start_time: NaiveTime, // 开始时间
    pub end_time: NaiveTime,   // 结束时间
    pub is_active: bool,      // 是否启用
}

impl TimeSlot {
    /// 展示用描述（星期 + 起止时间）
    pub fn display_name(&self) -> String {
        format!(
            "{} {}-{}",
            self.day_of_week,
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

// ==========================================
// FacultySubjectAssignment - 教师授课分配
// ==========================================
// 授权记录：教师只能讲授被分配的课程
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultySubjectAssignment {
    pub assignment_id: String, // 分配ID
    pub faculty_id: String,    // 教师ID
    pub subject_id: String,    // 课程ID
    pub is_active: bool,       // 是否生效
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classroom_schedulable() {
        let room = Classroom {
            classroom_id: "R1".to_string(),
            room_no: "201".to_string(),
            building: Some("理科楼".to_string()),
            capacity: 60,
            status: ClassroomStatus::Available,
            is_active: true,
        };
        assert!(room.is_schedulable());
        assert_eq!(room.display_name(), "理科楼201");

        let closed = Classroom {
            status: ClassroomStatus::Maintenance,
            ..room
        };
        assert!(!closed.is_schedulable());
    }

    #[test]
    fn test_slot_display_name() {
        let slot = TimeSlot {
            slot_id: "T1".to_string(),
            day_of_week: "周一".to_string(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 40, 0).unwrap(),
            is_active: true,
        };
        assert_eq!(slot.display_name(), "周一 08:00-09:40");
    }
}
