use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::common::nullable;

use super::entities::Relationship;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub user_id: i64,
    pub student_code: String,
    // 缺省为当天
    pub enrollment_date: Option<NaiveDate>,
    pub grade: String,
    pub section: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub student_code: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub grade: Option<String>,
    pub section: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_id: Option<Option<i64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacherRequest {
    pub user_id: i64,
    pub teacher_code: String,
    pub hire_date: Option<NaiveDate>,
    pub qualifications: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeacherRequest {
    pub teacher_code: Option<String>,
    pub hire_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "nullable")]
    pub qualifications: Option<Option<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateParentRequest {
    pub user_id: i64,
    pub parent_code: String,
    pub occupation: Option<String>,
    pub relationship_to_student: Option<Relationship>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateParentRequest {
    pub parent_code: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub occupation: Option<Option<String>>,
    pub relationship_to_student: Option<Relationship>,
}

/// 替换教师所授科目
#[derive(Debug, Clone, Deserialize)]
pub struct SetTeacherSubjectsRequest {
    pub subject_ids: Vec<i64>,
}
