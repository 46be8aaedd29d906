// ==========================================
// 高校排课管理系统 - 应用状态
// ==========================================
// 职责: 组合根。打开数据库、建表、装配仓储/引擎/API
// 所有仓储共享同一个 Arc<Mutex<Connection>>，
// 请求在进程内天然串行化，配合存储层唯一索引关死并发窗口
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::TimetableApi;
use crate::config::AppConfig;
use crate::db;
use crate::engine::{
    AdvisoryEngine, AuthorizationChecker, AvailabilityChecker, ConflictDetector,
};
use crate::repository::audit_repo::AuditLogRepository;
use crate::repository::entry_repo::TimetableEntryRepository;
use crate::repository::reference_repo::{
    AssignmentRepository, ClassroomRepository, EnrollmentRepository, FacultyRepository,
    SubjectRepository, TimeSlotRepository,
};

/// 应用状态
///
/// 包含排课API实例和共享数据库连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 排课API
    pub timetable_api: Arc<TimetableApi>,
}

impl AppState {
    /// 按环境配置装配（数据库路径取自环境变量或系统数据目录）
    pub fn from_env_config() -> ApiResult<Self> {
        let config = AppConfig::from_env();
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::DatabaseConnectionError(format!(
                    "无法创建数据目录 {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Self::new(&config.db_path_str())
    }

    /// 打开数据库并装配全部组件
    pub fn new(db_path: &str) -> ApiResult<Self> {
        let conn = db::open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;
        db::init_schema(&conn).map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;

        let conn = Arc::new(Mutex::new(conn));
        let state = Self::from_connection(db_path, conn);
        info!(db_path, "应用状态初始化完成");
        Ok(state)
    }

    /// 从已有连接装配（测试路径共用）
    pub fn from_connection(db_path: &str, conn: Arc<Mutex<Connection>>) -> Self {
        // 仓储
        let entry_repo = Arc::new(TimetableEntryRepository::from_connection(conn.clone()));
        let audit_repo = Arc::new(AuditLogRepository::from_connection(conn.clone()));
        let subject_repo = Arc::new(SubjectRepository::from_connection(conn.clone()));
        let faculty_repo = Arc::new(FacultyRepository::from_connection(conn.clone()));
        let classroom_repo = Arc::new(ClassroomRepository::from_connection(conn.clone()));
        let slot_repo = Arc::new(TimeSlotRepository::from_connection(conn.clone()));
        let assignment_repo = Arc::new(AssignmentRepository::from_connection(conn.clone()));
        let enrollment_repo = Arc::new(EnrollmentRepository::from_connection(conn));

        // 引擎
        let authorization = Arc::new(AuthorizationChecker::new(
            assignment_repo,
            faculty_repo.clone(),
            subject_repo.clone(),
        ));
        let availability = Arc::new(AvailabilityChecker::new(
            classroom_repo.clone(),
            slot_repo.clone(),
            subject_repo.clone(),
            faculty_repo.clone(),
        ));
        let conflict = Arc::new(ConflictDetector::new(
            entry_repo.clone(),
            subject_repo.clone(),
            faculty_repo.clone(),
            classroom_repo.clone(),
        ));
        let advisory = Arc::new(AdvisoryEngine::new(
            enrollment_repo,
            classroom_repo.clone(),
            faculty_repo.clone(),
            subject_repo.clone(),
        ));

        // API
        let timetable_api = Arc::new(TimetableApi::new(
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
        ));

        Self {
            db_path: db_path.to_string(),
            timetable_api,
        }
    }
}
