use super::core::{TimetableEntryRepository, TS_FORMAT};
use crate::domain::entry::TimetableEntry;
use crate::domain::types::EntryStatus;
use crate::repository::error::RepositoryResult;
use chrono::NaiveDateTime;
use rusqlite::{params, Row, ToSql};
use serde::{Deserialize, Serialize};

/// 查询列清单（与 map_row 一一对应）
const ENTRY_COLUMNS: &str = r#"
    entry_id, subject_id, faculty_id, classroom_id, slot_id,
    section, semester, academic_year, max_students, notes,
    is_active, created_by, updated_by, created_at, updated_at
"#;

// ==========================================
// EntryFilter - 列表查询过滤条件
// ==========================================
// 默认只看激活记录；管理视图置 include_inactive 可见软删除行
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryFilter {
    pub subject_id: Option<String>,
    pub faculty_id: Option<String>,
    pub classroom_id: Option<String>,
    pub slot_id: Option<String>,
    pub section: Option<String>,
    pub semester: Option<i32>,
    pub academic_year: Option<String>,
    pub include_inactive: bool,
}

impl EntryFilter {
    /// 组装 WHERE 子句与对应参数（只用占位符，不拼接值）
    fn build_where(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut clause = String::from(" WHERE 1=1");
        let mut binds: Vec<Box<dyn ToSql>> = Vec::new();

        if !self.include_inactive {
            clause.push_str(" AND is_active = 1");
        }
        if let Some(ref v) = self.subject_id {
            clause.push_str(" AND subject_id = ?");
            binds.push(Box::new(v.clone()));
        }
        if let Some(ref v) = self.faculty_id {
            clause.push_str(" AND faculty_id = ?");
            binds.push(Box::new(v.clone()));
        }
        if let Some(ref v) = self.classroom_id {
            clause.push_str(" AND classroom_id = ?");
            binds.push(Box::new(v.clone()));
        }
        if let Some(ref v) = self.slot_id {
            clause.push_str(" AND slot_id = ?");
            binds.push(Box::new(v.clone()));
        }
        if let Some(ref v) = self.section {
            clause.push_str(" AND section = ?");
            binds.push(Box::new(v.clone()));
        }
        if let Some(v) = self.semester {
            clause.push_str(" AND semester = ?");
            binds.push(Box::new(v));
        }
        if let Some(ref v) = self.academic_year {
            clause.push_str(" AND academic_year = ?");
            binds.push(Box::new(v.clone()));
        }

        (clause, binds)
    }
}

impl TimetableEntryRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 按 entry_id 查询单条记录（不论激活状态，管理视图可见软删除行）
    pub fn find_by_id(&self, entry_id: &str) -> RepositoryResult<Option<TimetableEntry>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM timetable_entry WHERE entry_id = ?1",
            ENTRY_COLUMNS
        ))?;

        match stmt.query_row(params![entry_id], |row| self.map_row(row)) {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询占用 (教师, 时间段, 学期, 学年) 的其他激活记录
    ///
    /// # 参数
    /// - exclude_entry_id: 更新时排除自身，记录不与自己的旧行冲突
    pub fn find_active_by_faculty_slot(
        &self,
        faculty_id: &str,
        slot_id: &str,
        semester: i32,
        academic_year: &str,
        exclude_entry_id: Option<&str>,
    ) -> RepositoryResult<Option<TimetableEntry>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM timetable_entry
            WHERE faculty_id = ?1 AND slot_id = ?2
              AND semester = ?3 AND academic_year = ?4
              AND is_active = 1
              AND (?5 IS NULL OR entry_id <> ?5)
            LIMIT 1
            "#,
            ENTRY_COLUMNS
        ))?;

        match stmt.query_row(
            params![faculty_id, slot_id, semester, academic_year, exclude_entry_id],
            |row| self.map_row(row),
        ) {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询占用 (教室, 时间段, 学期, 学年) 的其他激活记录
    pub fn find_active_by_classroom_slot(
        &self,
        classroom_id: &str,
        slot_id: &str,
        semester: i32,
        academic_year: &str,
        exclude_entry_id: Option<&str>,
    ) -> RepositoryResult<Option<TimetableEntry>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM timetable_entry
            WHERE classroom_id = ?1 AND slot_id = ?2
              AND semester = ?3 AND academic_year = ?4
              AND is_active = 1
              AND (?5 IS NULL OR entry_id <> ?5)
            LIMIT 1
            "#,
            ENTRY_COLUMNS
        ))?;

        match stmt.query_row(
            params![classroom_id, slot_id, semester, academic_year, exclude_entry_id],
            |row| self.map_row(row),
        ) {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 分页列表查询
    ///
    /// # 参数
    /// - filter: 过滤条件
    /// - page: 页码（从1开始）
    /// - page_size: 每页记录数
    ///
    /// # 返回
    /// - Ok((entries, total)): 当前页记录 + 满足条件的总数
    pub fn list(
        &self,
        filter: &EntryFilter,
        page: i64,
        page_size: i64,
    ) -> RepositoryResult<(Vec<TimetableEntry>, i64)> {
        let conn = self.get_conn()?;
        let (clause, binds) = filter.build_where();

        // 总数
        let total: i64 = {
            let mut stmt =
                conn.prepare(&format!("SELECT COUNT(*) FROM timetable_entry{}", clause))?;
            let bind_refs: Vec<&dyn ToSql> = binds.iter().map(|b| b.as_ref()).collect();
            stmt.query_row(&bind_refs[..], |row| row.get(0))?
        };

        // 当前页
        let offset = (page - 1) * page_size;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM timetable_entry{}
            ORDER BY academic_year, semester, slot_id, created_at
            LIMIT ? OFFSET ?
            "#,
            ENTRY_COLUMNS, clause
        ))?;

        let mut bind_refs: Vec<&dyn ToSql> = binds.iter().map(|b| b.as_ref()).collect();
        bind_refs.push(&page_size);
        bind_refs.push(&offset);

        let rows = stmt.query_map(&bind_refs[..], |row| self.map_row(row))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }

        Ok((entries, total))
    }

    // ==========================================
    // 行映射
    // ==========================================

    pub(super) fn map_row(&self, row: &Row<'_>) -> rusqlite::Result<TimetableEntry> {
        Ok(TimetableEntry {
            entry_id: row.get(0)?,
            subject_id: row.get(1)?,
            faculty_id: row.get(2)?,
            classroom_id: row.get(3)?,
            slot_id: row.get(4)?,
            section: row.get(5)?,
            semester: row.get(6)?,
            academic_year: row.get(7)?,
            max_students: row.get(8)?,
            notes: row.get(9)?,
            status: EntryStatus::from_flag(row.get::<_, bool>(10)?),
            created_by: row.get(11)?,
            updated_by: row.get(12)?,
            created_at: parse_ts(row, 13)?,
            updated_at: parse_ts(row, 14)?,
        })
    }
}

/// 解析时间戳列，格式错误映射为列类型错误
fn parse_ts(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TS_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}
