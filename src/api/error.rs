// ==========================================
// 高校排课管理系统 - API层错误类型
// ==========================================
// 职责: 定义校验流水线的错误分类，转换Repository错误为用户友好的错误消息
// 约束: 所有错误信息必须包含显式原因；驱动层原始错误不出本层
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
///
/// 校验流水线的六类业务错误 + 数据访问错误。
/// 业务错误全部同步产生并转换为结构化失败结果，不崩溃进程
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 校验流水线错误
    // ==========================================
    /// 必填字段缺失或输入不合法（调用方修正输入即可恢复）
    #[error("输入验证失败: {0}")]
    ValidationError(String),

    /// 教师未被分配讲授该课程
    #[error("授权校验失败: {0}")]
    AuthorizationError(String),

    /// 课程/教师/教室/时间段停用或不可用
    #[error("资源不可用: {0}")]
    AvailabilityError(String),

    /// 教师或教室双重占用
    #[error("排课冲突: {0}")]
    ConflictError(String),

    /// 学年格式不合法
    #[error("学年格式错误: {0}")]
    FormatError(String),

    /// 操作目标记录不存在
    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将Repository层的技术错误转换为用户友好的业务错误
// 唯一约束违反 → 排课冲突（存储层权威信号）
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // 双唯一索引的违反就是排课冲突
            RepositoryError::UniqueConstraintViolation(msg) => {
                if msg.contains("uq_entry_faculty_slot") {
                    ApiError::ConflictError(
                        "教师在该学期该时间段已有激活排课（存储层约束拒绝写入）".to_string(),
                    )
                } else if msg.contains("uq_entry_classroom_slot") {
                    ApiError::ConflictError(
                        "教室在该学期该时间段已有激活排课（存储层约束拒绝写入）".to_string(),
                    )
                } else {
                    ApiError::ConflictError(format!("唯一约束违反: {}", msg))
                }
            }

            // 数据库错误
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::ValidationError(format!("引用的参照数据不存在: {}", msg))
            }

            // 数据质量错误
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InternalError(format!("字段{}映射失败: {}", field, message))
            }

            // 通用错误
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl ApiError {
    /// 返回给最终调用方的消息
    ///
    /// 业务错误原样透出；数据库/内部错误脱敏为通用提示，
    /// 驱动层细节只进日志不出接口
    pub fn user_message(&self) -> String {
        match self {
            ApiError::DatabaseError(_)
            | ApiError::DatabaseConnectionError(_)
            | ApiError::InternalError(_)
            | ApiError::Other(_) => "系统繁忙，操作未完成，请稍后重试".to_string(),
            other => other.to_string(),
        }
    }

    /// 是否为业务类错误（调用方可自行修正）
    pub fn is_business_error(&self) -> bool {
        matches!(
            self,
            ApiError::ValidationError(_)
                | ApiError::AuthorizationError(_)
                | ApiError::AvailabilityError(_)
                | ApiError::ConflictError(_)
                | ApiError::FormatError(_)
                | ApiError::NotFound(_)
        )
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
