use super::*;

use chrono::Local;
use tracing::info;
use uuid::Uuid;

use crate::domain::entry::RawEntryDraft;
use crate::domain::types::EntryStatus;

impl TimetableApi {
    // ==========================================
    // 创建
    // ==========================================

    /// 创建排课记录
    ///
    /// 全量校验流水线通过后写入并审计；
    /// 建议提示（容量/跨院系）随成功结果返回
    pub fn create_entry(&self, raw: &RawEntryDraft, actor: &str) -> EntryMutationResponse {
        if actor.trim().is_empty() {
            return EntryMutationResponse::failed("操作人不能为空".to_string());
        }

        match self.try_create(raw, actor) {
            Ok((entry_id, warnings)) => {
                info!(entry_id = %entry_id, actor, "排课创建成功");
                EntryMutationResponse::succeeded(entry_id, warnings)
            }
            Err(e) => {
                warn!(error = %e, actor, "排课创建失败");
                EntryMutationResponse::failed(e.user_message())
            }
        }
    }

    fn try_create(
        &self,
        raw: &RawEntryDraft,
        actor: &str,
    ) -> ApiResult<(String, Vec<ScheduleWarning>)> {
        let draft = sanitizer::sanitize(raw)?;
        let warnings = self.validate_draft(&draft, None)?;

        let now = Local::now().naive_local();
        let entry = TimetableEntry::from_draft(Uuid::new_v4().to_string(), &draft, actor, now);

        // 预检与写入是两条语句；并发下的漏网冲突由双唯一索引在此处拒绝，
        // 转换为 ConflictError 返回
        self.entry_repo.insert(&entry)?;

        self.record_audit(
            actor,
            AuditAction::Create,
            &entry.entry_id,
            None,
            Self::snapshot(&entry),
            self.describe_entry(AuditAction::Create, &entry),
            now,
        );

        Ok((entry.entry_id, warnings))
    }

    // ==========================================
    // 更新
    // ==========================================

    /// 更新排课记录
    ///
    /// 与创建同一条校验流水线，冲突检查排除自身
    pub fn update_entry(
        &self,
        entry_id: &str,
        raw: &RawEntryDraft,
        actor: &str,
    ) -> EntryMutationResponse {
        if actor.trim().is_empty() {
            return EntryMutationResponse::failed("操作人不能为空".to_string());
        }

        match self.try_update(entry_id, raw, actor) {
            Ok(warnings) => {
                info!(entry_id, actor, "排课更新成功");
                EntryMutationResponse::succeeded(entry_id.to_string(), warnings)
            }
            Err(e) => {
                warn!(error = %e, entry_id, actor, "排课更新失败");
                EntryMutationResponse::failed(e.user_message())
            }
        }
    }

    fn try_update(
        &self,
        entry_id: &str,
        raw: &RawEntryDraft,
        actor: &str,
    ) -> ApiResult<Vec<ScheduleWarning>> {
        let mut entry = self.load_entry(entry_id)?;

        let draft = sanitizer::sanitize(raw)?;
        let warnings = self.validate_draft(&draft, Some(entry_id))?;

        let old_value = Self::snapshot(&entry);
        let now = Local::now().naive_local();
        entry.apply_draft(&draft, actor, now);

        self.entry_repo.update(&entry)?;

        self.record_audit(
            actor,
            AuditAction::Update,
            entry_id,
            old_value,
            Self::snapshot(&entry),
            self.describe_entry(AuditAction::Update, &entry),
            now,
        );

        Ok(warnings)
    }

    // ==========================================
    // 删除（公开路径: 要求当前激活）
    // ==========================================

    /// 删除排课记录（软删除: Active → Inactive）
    pub fn delete_entry(&self, entry_id: &str, actor: &str) -> OperationResponse {
        if actor.trim().is_empty() {
            return OperationResponse::failed("操作人不能为空".to_string());
        }

        match self.try_delete(entry_id, actor) {
            Ok(()) => {
                info!(entry_id, actor, "排课删除成功");
                OperationResponse::succeeded()
            }
            Err(e) => {
                warn!(error = %e, entry_id, actor, "排课删除失败");
                OperationResponse::failed(e.user_message())
            }
        }
    }

    fn try_delete(&self, entry_id: &str, actor: &str) -> ApiResult<()> {
        let entry = self.load_entry(entry_id)?;

        if !entry.status.is_active() {
            return Err(ApiError::ValidationError(
                "排课记录已处于停用状态，无法删除".to_string(),
            ));
        }

        let now = Local::now().naive_local();
        self.entry_repo
            .set_status(entry_id, EntryStatus::Inactive, actor, now)?;

        self.record_audit(
            actor,
            AuditAction::Delete,
            entry_id,
            Self::snapshot(&entry),
            None,
            self.describe_entry(AuditAction::Delete, &entry),
            now,
        );

        Ok(())
    }

    // ==========================================
    // 停用（管理路径: 幂等，不问当前状态）
    // ==========================================

    /// 停用排课记录
    ///
    /// 对已停用记录重复调用保持状态不变并仍返回成功
    pub fn deactivate_entry(&self, entry_id: &str, actor: &str) -> OperationResponse {
        if actor.trim().is_empty() {
            return OperationResponse::failed("操作人不能为空".to_string());
        }

        match self.try_toggle(entry_id, actor, EntryStatus::Inactive) {
            Ok(changed) => {
                info!(entry_id, actor, changed, "排课停用完成");
                OperationResponse::succeeded()
            }
            Err(e) => {
                warn!(error = %e, entry_id, actor, "排课停用失败");
                OperationResponse::failed(e.user_message())
            }
        }
    }

    // ==========================================
    // 激活
    // ==========================================

    /// 重新激活排课记录
    ///
    /// 状态切换不重跑校验流水线；停用期间若出现占用同一槽位的
    /// 激活记录，双唯一索引会在写入时拒绝并返回冲突
    pub fn activate_entry(&self, entry_id: &str, actor: &str) -> OperationResponse {
        if actor.trim().is_empty() {
            return OperationResponse::failed("操作人不能为空".to_string());
        }

        match self.try_toggle(entry_id, actor, EntryStatus::Active) {
            Ok(changed) => {
                info!(entry_id, actor, changed, "排课激活完成");
                OperationResponse::succeeded()
            }
            Err(e) => {
                warn!(error = %e, entry_id, actor, "排课激活失败");
                OperationResponse::failed(e.user_message())
            }
        }
    }

    /// 状态切换公共路径
    ///
    /// # 返回
    /// - Ok(true): 状态已切换并审计
    /// - Ok(false): 已处于目标状态，幂等成功，不产生审计
    fn try_toggle(
        &self,
        entry_id: &str,
        actor: &str,
        target: EntryStatus,
    ) -> ApiResult<bool> {
        let entry = self.load_entry(entry_id)?;

        if entry.status == target {
            return Ok(false);
        }

        let now = Local::now().naive_local();
        self.entry_repo.set_status(entry_id, target, actor, now)?;

        let action = match target {
            EntryStatus::Active => AuditAction::Activate,
            EntryStatus::Inactive => AuditAction::Deactivate,
        };
        self.record_audit(
            actor,
            action,
            entry_id,
            Self::snapshot(&entry),
            None,
            self.describe_entry(action, &entry),
            now,
        );

        Ok(true)
    }

    // ==========================================
    // 批量删除
    // ==========================================

    /// 批量删除排课记录
    ///
    /// 逐条应用单条删除；部分成功是正常结果（明细在 failed 中），
    /// 批次整体不保证原子性
    pub fn bulk_delete_entries(&self, entry_ids: &[String], actor: &str) -> BulkDeleteResponse {
        if actor.trim().is_empty() {
            return BulkDeleteResponse {
                success: false,
                deactivated: Vec::new(),
                failed: Vec::new(),
                message: "操作人不能为空".to_string(),
            };
        }

        let mut deactivated = Vec::new();
        let mut failed = Vec::new();

        for entry_id in entry_ids {
            match self.try_delete(entry_id, actor) {
                Ok(()) => deactivated.push(entry_id.clone()),
                Err(e) => failed.push(BulkFailure {
                    entry_id: entry_id.clone(),
                    message: e.user_message(),
                }),
            }
        }

        let message = format!(
            "批量删除完成: 成功{}条, 失败{}条",
            deactivated.len(),
            failed.len()
        );
        info!(total = entry_ids.len(), ok = deactivated.len(), "批量删除完成");

        BulkDeleteResponse {
            success: failed.is_empty(),
            deactivated,
            failed,
            message,
        }
    }
}
