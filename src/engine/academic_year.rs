// ==========================================
// 高校排课管理系统 - 学年格式校验器
// ==========================================
// 规则:
// - 形如 "YYYY-YYYY"
// - 第二年 = 第一年 + 1
// - 第一年落在当前年份 ±ALLOWED_YEAR_WINDOW 内
// ==========================================

use chrono::{Datelike, NaiveDate};

use crate::api::error::{ApiError, ApiResult};

/// 起始年允许偏离当前年份的窗口
pub const ALLOWED_YEAR_WINDOW: i32 = 5;

/// 校验学年字符串
///
/// # 参数
/// - academic_year: 待校验字符串
/// - today: 当前日期（显式传入，便于测试）
///
/// # 返回
/// - Ok(()): 格式合法
/// - Err(FormatError): 带纠正提示的格式错误
pub fn validate(academic_year: &str, today: NaiveDate) -> ApiResult<()> {
    let (start, end) = parse_years(academic_year).ok_or_else(|| {
        ApiError::FormatError(format!(
            "学年格式应为 YYYY-YYYY（如 2025-2026）, 实际: '{}'",
            academic_year
        ))
    })?;

    if end != start + 1 {
        return Err(ApiError::FormatError(format!(
            "学年必须为连续两年（结束年 = 起始年 + 1）, 实际: '{}'",
            academic_year
        )));
    }

    let current = today.year();
    if (start - current).abs() > ALLOWED_YEAR_WINDOW {
        return Err(ApiError::FormatError(format!(
            "学年起始年 {} 超出合理范围（{} ± {} 年）",
            start, current, ALLOWED_YEAR_WINDOW
        )));
    }

    Ok(())
}

/// 解析 "YYYY-YYYY"，形状不符返回 None
fn parse_years(s: &str) -> Option<(i32, i32)> {
    let (left, right) = s.split_once('-')?;
    if left.len() != 4 || right.len() != 4 {
        return None;
    }
    if !left.bytes().all(|b| b.is_ascii_digit()) || !right.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((left.parse().ok()?, right.parse().ok()?))
}
