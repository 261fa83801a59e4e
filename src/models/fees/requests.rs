use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::common::nullable;

use super::entities::{FeeType, PaymentMethod};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeeStructureRequest {
    pub academic_year_id: i64,
    pub fee_type: FeeType,
    pub grade: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFeeStructureRequest {
    pub academic_year_id: Option<i64>,
    pub fee_type: Option<FeeType>,
    pub grade: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeePaymentRequest {
    pub student_id: i64,
    pub fee_structure_id: i64,
    pub amount_paid: f64,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFeePaymentRequest {
    pub amount_paid: Option<f64>,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, deserialize_with = "nullable")]
    pub transaction_id: Option<Option<String>>,
    pub is_paid: Option<bool>,
}
