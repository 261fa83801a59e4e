use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::common::nullable;

use super::entities::{ContentType, Weekday};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAcademicYearRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAcademicYearRequest {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub grade: String,
    pub section: String,
    pub academic_year_id: i64,
    pub class_teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClassRequest {
    pub grade: Option<String>,
    pub section: Option<String>,
    pub academic_year_id: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub class_teacher_id: Option<Option<i64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub grade: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassSubjectRequest {
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClassSubjectRequest {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimetableRequest {
    pub class_id: i64,
    pub day: Weekday,
    pub period: i32,
    pub subject_id: i64,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTimetableRequest {
    pub class_id: Option<i64>,
    pub day: Option<Weekday>,
    pub period: Option<i32>,
    pub subject_id: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentRequest {
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentType,
    pub file: String,
    pub subject_id: i64,
    pub grade: String,
    pub chapter: Option<String>,
    // 教师创建时由服务端填写
    pub uploaded_by: Option<i64>,
    #[serde(default)]
    pub is_homework: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub content_type: Option<ContentType>,
    pub file: Option<String>,
    pub subject_id: Option<i64>,
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub chapter: Option<Option<String>>,
    pub is_homework: Option<bool>,
}
