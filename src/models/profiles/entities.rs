use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;
use crate::models::users::entities::User;

string_enum! {
    /// 家长与学生的关系
    Relationship {
        Father => "father",
        Mother => "mother",
        Guardian => "guardian",
    }
}

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub student_code: String,
    pub enrollment_date: NaiveDate,
    pub grade: String,
    pub section: String,
    pub parent_id: Option<i64>,
}

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub teacher_code: String,
    pub hire_date: NaiveDate,
    pub qualifications: Option<String>,
}

// 家长档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parent {
    pub id: i64,
    pub user_id: i64,
    pub parent_code: String,
    pub occupation: Option<String>,
    pub relationship_to_student: Relationship,
}

/// 档案与其账号信息
#[derive(Debug, Clone, Serialize)]
pub struct ProfileInfo<T> {
    #[serde(flatten)]
    pub profile: T,
    pub user_details: User,
}
