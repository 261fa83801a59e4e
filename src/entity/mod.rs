//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! 时间戳以 unix 秒存储，日期以 `YYYY-MM-DD` 文本存储，转换为业务实体时还原为 chrono 类型。

pub mod academic_years;
pub mod announcements;
pub mod assessments;
pub mod attendances;
pub mod class_subjects;
pub mod classes;
pub mod contents;
pub mod fee_payments;
pub mod fee_structures;
pub mod messages;
pub mod notifications;
pub mod parents;
pub mod questions;
pub mod reports;
pub mod students;
pub mod subjects;
pub mod submissions;
pub mod teacher_subjects;
pub mod teachers;
pub mod timetables;
pub mod users;

use chrono::{DateTime, NaiveDate, Utc};

/// 日期在库中的文本格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub(crate) fn parse_date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).unwrap_or_default()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
