use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::common::nullable;

use super::entities::{AnswerOption, AssessmentType, QuestionType};

/// 测评默认时长（分钟）
pub const DEFAULT_DURATION_MINUTES: i32 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssessmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub assessment_type: AssessmentType,
    pub subject_id: i64,
    pub class_id: i64,
    // 教师创建时由服务端填写
    pub teacher_id: Option<i64>,
    pub scheduled_date: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub total_marks: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssessmentRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub assessment_type: Option<AssessmentType>,
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub total_marks: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub assessment_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub marks: i32,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_answer: Option<AnswerOption>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuestionRequest {
    pub question_text: Option<String>,
    pub question_type: Option<QuestionType>,
    pub marks: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub option_a: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub option_b: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub option_c: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub option_d: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub correct_answer: Option<Option<AnswerOption>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assessment_id: i64,
    // 学生创建时由服务端填写
    pub student_id: Option<i64>,
    pub marks_obtained: Option<i32>,
    pub grade: Option<String>,
    pub feedback: Option<String>,
}

/// 批改：分数、等级、评语
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubmissionRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub marks_obtained: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub grade: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub feedback: Option<Option<String>>,
}
