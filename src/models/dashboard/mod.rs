pub mod responses;

/// 看板中每个列表的条数
pub const DASHBOARD_LIST_LIMIT: u64 = 5;
