// ==========================================
// 高校排课管理系统 - 配置层
// ==========================================
// 职责: 解析数据库路径等运行配置
// 优先级: 环境变量 > 系统数据目录默认值
// ==========================================

use std::path::PathBuf;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "CAMPUS_TIMETABLE_DB";

/// 应用数据目录名
pub const APP_DIR_NAME: &str = "campus-timetable";

/// 默认数据库文件名
pub const DEFAULT_DB_FILE: &str = "timetable.db";

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 数据库文件路径
    pub db_path: PathBuf,
}

impl AppConfig {
    /// 从环境变量解析配置
    ///
    /// - CAMPUS_TIMETABLE_DB 指定数据库路径
    /// - 未指定时回落到系统数据目录（如 ~/.local/share/campus-timetable/timetable.db）
    pub fn from_env() -> Self {
        let db_path = std::env::var(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_db_path());

        Self { db_path }
    }

    /// 系统数据目录下的默认数据库路径
    pub fn default_db_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(DEFAULT_DB_FILE)
    }

    /// 数据库路径的字符串形式（rusqlite 接口使用 &str）
    pub fn db_path_str(&self) -> String {
        self.db_path.to_string_lossy().to_string()
    }
}
