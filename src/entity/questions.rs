//! 题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assessment_id: i64,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    pub question_type: String,
    pub marks: i32,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_answer: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::assessments::entities::Question {
    fn from(model: Model) -> Self {
        use crate::models::assessments::entities::QuestionType;

        Self {
            id: model.id,
            assessment_id: model.assessment_id,
            question_text: model.question_text,
            question_type: model.question_type.parse().unwrap_or(QuestionType::Mcq),
            marks: model.marks,
            option_a: model.option_a,
            option_b: model.option_b,
            option_c: model.option_c,
            option_d: model.option_d,
            correct_answer: model.correct_answer.and_then(|a| a.parse().ok()),
        }
    }
}
