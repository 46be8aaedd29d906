// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数与参照数据种子
// ==========================================

use std::sync::{Arc, Mutex};

use chrono::{Datelike, Local};
use rusqlite::Connection;
use tempfile::NamedTempFile;
use uuid::Uuid;

use campus_timetable::api::TimetableApi;
use campus_timetable::app::AppState;
use campus_timetable::db;
use campus_timetable::domain::entry::RawEntryDraft;

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含排课API实例和用于准备测试数据的裸连接
pub struct ApiTestEnv {
    pub db_path: String,
    pub api: Arc<TimetableApi>,
    pub conn: Arc<Mutex<Connection>>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建测试环境: 临时库 + 建表 + 装配API
    pub fn new() -> anyhow::Result<Self> {
        let temp_file = NamedTempFile::new()?;
        let db_path = temp_file.path().to_string_lossy().to_string();

        let conn = db::open_sqlite_connection(&db_path)?;
        db::init_schema(&conn)?;
        let conn = Arc::new(Mutex::new(conn));

        let state = AppState::from_connection(&db_path, conn.clone());

        Ok(Self {
            db_path,
            api: state.timetable_api,
            conn,
            _temp_file: temp_file,
        })
    }

    /// 创建测试环境并灌入标准参照数据
    pub fn with_reference_data() -> anyhow::Result<Self> {
        let env = Self::new()?;
        env.seed_reference_data()?;
        Ok(env)
    }

    /// 标准参照数据
    ///
    /// 课程:  S1 数据结构(计算机) / S2 线性代数(数学) / S3 编译原理(计算机, 停用)
    /// 教师:  F1 张伟(计算机) / F2 李娜(数学) / F3 王强(计算机, 账号停用)
    /// 教室:  R1 A楼101(容量100) / R2 A楼102(容量60) / R3 B楼201(维修中)
    /// 时段:  T1 周一08:00 / T2 周二10:00 / T3 周三14:00(停用)
    /// 授权:  F1→S1, F1→S3, F2→S2, F2→S1(跨院系), F3→S1
    pub fn seed_reference_data(&self) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            INSERT INTO subject (subject_id, subject_code, subject_name, department, is_active) VALUES
                ('S1', 'CS101',   '数据结构', '计算机学院', 1),
                ('S2', 'MATH201', '线性代数', '数学学院',   1),
                ('S3', 'CS301',   '编译原理', '计算机学院', 0);

            INSERT INTO faculty (faculty_id, faculty_name, department, account_status) VALUES
                ('F1', '张伟', '计算机学院', 'ACTIVE'),
                ('F2', '李娜', '数学学院',   'ACTIVE'),
                ('F3', '王强', '计算机学院', 'DISABLED');

            INSERT INTO classroom (classroom_id, room_no, building, capacity, status, is_active) VALUES
                ('R1', '101', 'A楼', 100, 'AVAILABLE',   1),
                ('R2', '102', 'A楼',  60, 'AVAILABLE',   1),
                ('R3', '201', 'B楼',  80, 'MAINTENANCE', 1);

            INSERT INTO time_slot (slot_id, day_of_week, start_time, end_time, is_active) VALUES
                ('T1', '周一', '08:00', '09:40', 1),
                ('T2', '周二', '10:00', '11:40', 1),
                ('T3', '周三', '14:00', '15:40', 0);

            INSERT INTO faculty_subject_assignment (assignment_id, faculty_id, subject_id, is_active) VALUES
                ('A1', 'F1', 'S1', 1),
                ('A2', 'F1', 'S3', 1),
                ('A3', 'F2', 'S2', 1),
                ('A4', 'F2', 'S1', 1),
                ('A5', 'F3', 'S1', 1);
            "#,
        )?;
        Ok(())
    }

    /// 灌入选课记录（status='ENROLLED'）
    pub fn add_enrollments(
        &self,
        subject_id: &str,
        section: &str,
        semester: i32,
        academic_year: &str,
        count: i64,
    ) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "INSERT INTO enrollment
                (enrollment_id, subject_id, section, semester, academic_year, student_id, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'ENROLLED')",
        )?;
        for i in 0..count {
            stmt.execute(rusqlite::params![
                Uuid::new_v4().to_string(),
                subject_id,
                section,
                semester,
                academic_year,
                format!("STU{:04}", i),
            ])?;
        }
        Ok(())
    }
}

// ==========================================
// 通用辅助
// ==========================================

/// 当前学年（满足学年窗口校验）
pub fn current_academic_year() -> String {
    let y = Local::now().year();
    format!("{}-{}", y, y + 1)
}

/// 构造一份完整的排课草稿
pub fn make_draft(subject_id: &str, faculty_id: &str, classroom_id: &str, slot_id: &str) -> RawEntryDraft {
    RawEntryDraft {
        subject_id: Some(subject_id.to_string()),
        faculty_id: Some(faculty_id.to_string()),
        classroom_id: Some(classroom_id.to_string()),
        slot_id: Some(slot_id.to_string()),
        section: Some("A".to_string()),
        semester: Some(1),
        academic_year: Some(current_academic_year()),
        max_students: None,
        notes: None,
    }
}
