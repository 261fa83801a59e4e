use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;

string_enum! {
    /// 上课日，周一至周六
    Weekday {
        Monday => "monday",
        Tuesday => "tuesday",
        Wednesday => "wednesday",
        Thursday => "thursday",
        Friday => "friday",
        Saturday => "saturday",
    }
}

impl Weekday {
    /// 一周内的顺序，周一为 0
    pub fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(0)
    }
}

string_enum! {
    /// 学习资料类型
    ContentType {
        Pdf => "pdf",
        Video => "video",
        Audio => "audio",
        Ppt => "ppt",
        Doc => "doc",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicYear {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub grade: String,
    pub section: String,
    pub academic_year_id: i64,
    pub class_teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub grade: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSubject {
    pub id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    pub id: i64,
    pub class_id: i64,
    pub day: Weekday,
    pub period: i32,
    pub subject_id: i64,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentType,
    pub file: String,
    pub subject_id: i64,
    pub grade: String,
    pub chapter: Option<String>,
    pub uploaded_by: i64,
    pub upload_date: DateTime<Utc>,
    pub is_homework: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_ordinal() {
        assert_eq!(Weekday::Monday.ordinal(), 0);
        assert_eq!(Weekday::Saturday.ordinal(), 5);
        assert!("sunday".parse::<Weekday>().is_err());
    }
}
