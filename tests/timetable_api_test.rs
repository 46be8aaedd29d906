// ==========================================
// TimetableApi 集成测试
// ==========================================
// 测试范围:
// 1. 创建排课: 全量校验流水线（清洗/学年/授权/可用性/冲突）
// 2. 更新排课: 自身排除、换时段冲突
// 3. 状态切换: 删除/停用/激活、幂等性、重新激活占用时段
// 4. 批量删除: 部分成功
// 5. 列表查询与审计追溯
// ==========================================

mod helpers;

use helpers::api_test_helper::*;

use campus_timetable::domain::entry::RawEntryDraft;
use campus_timetable::domain::types::{AuditAction, EntryStatus};
use campus_timetable::repository::EntryFilter;

// ==========================================
// 创建排课测试
// ==========================================

#[test]
fn test_create_entry_成功() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let resp = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");

    assert!(resp.success, "创建应成功: {:?}", resp.message);
    let entry_id = resp.entry_id.expect("应返回记录ID");
    assert!(resp.warnings.is_empty(), "同院系小班不应有提示");

    let entry = env.api.get_entry(&entry_id).unwrap().expect("记录应可查回");
    assert_eq!(entry.subject_id, "S1");
    assert_eq!(entry.status, EntryStatus::Active);
    assert_eq!(entry.section, "A");
    assert_eq!(entry.created_by, "admin");
}

#[test]
fn test_create_entry_缺少必填字段() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let raw = RawEntryDraft {
        faculty_id: None,
        slot_id: None,
        ..make_draft("S1", "F1", "R1", "T1")
    };
    let resp = env.api.create_entry(&raw, "admin");

    assert!(!resp.success);
    let msg = resp.message.expect("应返回错误消息");
    assert!(msg.contains("教师"), "消息应点名缺失字段: {}", msg);
    assert!(msg.contains("时间段"), "消息应点名缺失字段: {}", msg);
}

#[test]
fn test_create_entry_学年格式错误() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let raw = RawEntryDraft {
        academic_year: Some("2025-2027".to_string()),
        ..make_draft("S1", "F1", "R1", "T1")
    };
    let resp = env.api.create_entry(&raw, "admin");

    assert!(!resp.success, "结束年不等于起始年+1应被拒绝");
}

#[test]
fn test_create_entry_教师未授权() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    // F1 未被分配讲授 S2
    let resp = env.api.create_entry(&make_draft("S2", "F1", "R1", "T1"), "admin");

    assert!(!resp.success);
    let msg = resp.message.expect("应返回错误消息");
    assert!(msg.contains("未被分配"), "应为授权错误: {}", msg);
}

#[test]
fn test_create_entry_教室维修中() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let resp = env.api.create_entry(&make_draft("S1", "F1", "R3", "T1"), "admin");

    assert!(!resp.success, "维修中的教室不可排课");
}

#[test]
fn test_create_entry_时间段停用() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let resp = env.api.create_entry(&make_draft("S1", "F1", "R1", "T3"), "admin");

    assert!(!resp.success, "停用的时间段不可排课");
}

#[test]
fn test_create_entry_课程停用() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    // F1 已被分配讲授 S3，但 S3 已停用
    let resp = env.api.create_entry(&make_draft("S3", "F1", "R1", "T1"), "admin");

    assert!(!resp.success, "停用的课程不可排课");
}

#[test]
fn test_create_entry_教师账号停用() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let resp = env.api.create_entry(&make_draft("S1", "F3", "R1", "T1"), "admin");

    assert!(!resp.success, "账号停用的教师不可排课");
}

#[test]
fn test_create_entry_操作人为空() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let resp = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "  ");

    assert!(!resp.success);
    assert_eq!(resp.message.as_deref(), Some("操作人不能为空"));
}

#[test]
fn test_create_entry_教师时间冲突() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let first = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    assert!(first.success);

    // 同教师同时段换教室仍冲突
    let second = env.api.create_entry(&make_draft("S1", "F1", "R2", "T1"), "admin");
    assert!(!second.success);
    let msg = second.message.expect("应返回错误消息");
    assert!(msg.contains("教师时间冲突"), "应报教师冲突: {}", msg);
    assert!(msg.contains("《数据结构》"), "消息应点名已占用课程: {}", msg);
}

#[test]
fn test_create_entry_教室占用冲突() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let first = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    assert!(first.success);

    // 换教师占同一教室同一时段
    let second = env.api.create_entry(&make_draft("S2", "F2", "R1", "T1"), "admin");
    assert!(!second.success);
    let msg = second.message.expect("应返回错误消息");
    assert!(msg.contains("教室占用冲突"), "应报教室冲突: {}", msg);
}

#[test]
fn test_create_entry_不同时段不冲突() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    assert!(env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin").success);
    assert!(env.api.create_entry(&make_draft("S1", "F1", "R1", "T2"), "admin").success);
}

#[test]
fn test_create_entry_跨院系提示() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    // F2(数学) 被授权讲 S1(计算机)，应成功但附带跨院系提示
    let resp = env.api.create_entry(&make_draft("S1", "F2", "R1", "T1"), "admin");

    assert!(resp.success, "跨院系授课不阻断: {:?}", resp.message);
    assert!(
        resp.warnings.iter().any(|w| w.message.contains("跨院系")),
        "应附带跨院系提示: {:?}",
        resp.warnings
    );
}

// ==========================================
// 更新排课测试
// ==========================================

#[test]
fn test_update_entry_自身不算冲突() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let created = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    let entry_id = created.entry_id.expect("创建失败");

    // 原时段原教室不变，只改备注
    let raw = RawEntryDraft {
        notes: Some("调整教材".to_string()),
        ..make_draft("S1", "F1", "R1", "T1")
    };
    let resp = env.api.update_entry(&entry_id, &raw, "admin");

    assert!(resp.success, "保持原时段更新不应自冲突: {:?}", resp.message);
    let entry = env.api.get_entry(&entry_id).unwrap().unwrap();
    assert_eq!(entry.notes.as_deref(), Some("调整教材"));
    assert_eq!(entry.updated_by.as_deref(), Some("admin"));
}

#[test]
fn test_update_entry_换到占用时段被拒() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let a = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    let b = env.api.create_entry(&make_draft("S2", "F2", "R2", "T2"), "admin");
    let b_id = b.entry_id.expect("创建失败");

    // 把 b 挪到 a 的教室和时段
    let resp = env.api.update_entry(&b_id, &make_draft("S2", "F2", "R1", "T1"), "admin");

    assert!(!resp.success, "换入占用时段应被拒绝");
    assert!(a.success);
}

#[test]
fn test_update_entry_记录不存在() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let resp = env
        .api
        .update_entry("no-such-entry", &make_draft("S1", "F1", "R1", "T1"), "admin");

    assert!(!resp.success);
}

// ==========================================
// 状态切换测试
// ==========================================

#[test]
fn test_delete_entry_软删除() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let created = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    let entry_id = created.entry_id.expect("创建失败");

    let resp = env.api.delete_entry(&entry_id, "admin");
    assert!(resp.success, "删除应成功: {:?}", resp.message);

    // 软删除: 行仍在，状态为停用
    let entry = env.api.get_entry(&entry_id).unwrap().expect("行应保留");
    assert_eq!(entry.status, EntryStatus::Inactive);

    // 已停用的记录不可再删除
    let again = env.api.delete_entry(&entry_id, "admin");
    assert!(!again.success);
    assert!(again.message.unwrap().contains("已处于停用状态"));
}

#[test]
fn test_deactivate_activate_幂等() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let created = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    let entry_id = created.entry_id.expect("创建失败");

    assert!(env.api.deactivate_entry(&entry_id, "admin").success);
    // 重复停用仍成功（无变化）
    assert!(env.api.deactivate_entry(&entry_id, "admin").success);

    assert!(env.api.activate_entry(&entry_id, "admin").success);
    let entry = env.api.get_entry(&entry_id).unwrap().unwrap();
    assert_eq!(entry.status, EntryStatus::Active);

    // 审计只记录实际发生的状态变化: 创建+停用+激活 = 3条
    let trail = env.api.entry_audit_trail(&entry_id).unwrap();
    assert_eq!(trail.len(), 3, "幂等操作不产生审计: {:?}", trail);
}

#[test]
fn test_activate_entry_占用时段被存储层拒绝() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let a = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    let a_id = a.entry_id.expect("创建失败");

    assert!(env.api.deactivate_entry(&a_id, "admin").success);

    // 停用后时段空出，另一条占入
    let b = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    assert!(b.success, "停用行不占用时段: {:?}", b.message);

    // 重新激活撞上唯一索引
    let resp = env.api.activate_entry(&a_id, "admin");
    assert!(!resp.success, "激活到占用时段应被拒绝");
    assert!(
        resp.message.unwrap().contains("冲突"),
        "应报冲突类错误"
    );

    // 原记录保持停用
    let entry = env.api.get_entry(&a_id).unwrap().unwrap();
    assert_eq!(entry.status, EntryStatus::Inactive);
}

#[test]
fn test_bulk_delete_部分成功() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let a = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    let b = env.api.create_entry(&make_draft("S2", "F2", "R2", "T2"), "admin");
    let a_id = a.entry_id.unwrap();
    let b_id = b.entry_id.unwrap();

    let ids = vec![a_id.clone(), "no-such-entry".to_string(), b_id.clone()];
    let resp = env.api.bulk_delete_entries(&ids, "admin");

    assert!(!resp.success, "存在失败项时整体不算成功");
    assert_eq!(resp.deactivated, vec![a_id.clone(), b_id]);
    assert_eq!(resp.failed.len(), 1);
    assert_eq!(resp.failed[0].entry_id, "no-such-entry");

    let entry = env.api.get_entry(&a_id).unwrap().unwrap();
    assert_eq!(entry.status, EntryStatus::Inactive);
}

// ==========================================
// 列表查询与审计测试
// ==========================================

#[test]
fn test_list_entries_过滤与分页() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    assert!(env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin").success);
    assert!(env.api.create_entry(&make_draft("S1", "F1", "R1", "T2"), "admin").success);
    assert!(env.api.create_entry(&make_draft("S2", "F2", "R2", "T1"), "admin").success);

    // 按教师过滤
    let filter = EntryFilter {
        faculty_id: Some("F1".to_string()),
        ..Default::default()
    };
    let resp = env.api.list_entries(&filter, 1, 20);
    assert!(resp.success);
    assert_eq!(resp.pagination.total, 2);

    // 分页: 每页1条
    let resp = env.api.list_entries(&filter, 2, 1);
    assert_eq!(resp.entries.len(), 1);
    assert_eq!(resp.pagination.page, 2);
    assert_eq!(resp.pagination.total_pages, 2);
}

#[test]
fn test_list_entries_默认隐藏停用行() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let a = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    let a_id = a.entry_id.unwrap();
    assert!(env.api.create_entry(&make_draft("S2", "F2", "R2", "T2"), "admin").success);
    assert!(env.api.delete_entry(&a_id, "admin").success);

    let resp = env.api.list_entries(&EntryFilter::default(), 1, 20);
    assert_eq!(resp.pagination.total, 1, "停用行默认不可见");

    let filter = EntryFilter {
        include_inactive: true,
        ..Default::default()
    };
    let resp = env.api.list_entries(&filter, 1, 20);
    assert_eq!(resp.pagination.total, 2, "管理视图可见停用行");
}

#[test]
fn test_entry_audit_trail_完整追溯() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let created = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    let entry_id = created.entry_id.unwrap();

    let raw = RawEntryDraft {
        notes: Some("换教材".to_string()),
        ..make_draft("S1", "F1", "R1", "T1")
    };
    assert!(env.api.update_entry(&entry_id, &raw, "scheduler").success);
    assert!(env.api.delete_entry(&entry_id, "admin").success);

    let trail = env.api.entry_audit_trail(&entry_id).unwrap();
    assert_eq!(trail.len(), 3);
    assert_eq!(trail[0].action, AuditAction::Create);
    assert_eq!(trail[1].action, AuditAction::Update);
    assert_eq!(trail[1].actor, "scheduler");
    assert_eq!(trail[2].action, AuditAction::Delete);

    // 更新审计带前后快照
    assert!(trail[1].old_value_json.is_some());
    assert!(trail[1].new_value_json.is_some());
}

#[test]
fn test_recent_audit_logs_倒序() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    let a = env.api.create_entry(&make_draft("S1", "F1", "R1", "T1"), "admin");
    let a_id = a.entry_id.unwrap();
    assert!(env.api.delete_entry(&a_id, "admin").success);

    let recent = env.api.recent_audit_logs(1).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].action, AuditAction::Delete);

    let all = env.api.recent_audit_logs(10).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_get_entry_空ID() {
    let env = ApiTestEnv::with_reference_data().expect("无法创建测试环境");

    assert!(env.api.get_entry("  ").is_err());
    assert!(env.api.get_entry("no-such-entry").unwrap().is_none());
}
