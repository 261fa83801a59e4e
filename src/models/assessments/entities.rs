use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;

string_enum! {
    AssessmentType {
        Quiz => "quiz",
        Exam => "exam",
        Assignment => "assignment",
    }
}

string_enum! {
    QuestionType {
        Mcq => "mcq",
        ShortAnswer => "short_answer",
        Essay => "essay",
    }
}

string_enum! {
    /// 选择题答案
    AnswerOption {
        A => "a",
        B => "b",
        C => "c",
        D => "d",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub assessment_type: AssessmentType,
    pub subject_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub scheduled_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub total_marks: i32,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assessment_id: i64,
    pub student_id: i64,
    pub submitted_at: DateTime<Utc>,
    pub marks_obtained: Option<i32>,
    pub grade: Option<String>,
    pub feedback: Option<String>,
}
