use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::common::enums::string_enum;

string_enum! {
    FeeType {
        Tuition => "tuition",
        Exam => "exam",
        Transport => "transport",
        Misc => "misc",
    }
}

string_enum! {
    PaymentMethod {
        Cash => "cash",
        Online => "online",
        Cheque => "cheque",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeStructure {
    pub id: i64,
    pub academic_year_id: i64,
    pub fee_type: FeeType,
    pub grade: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

/// 缴费记录，is_paid 由录入方单独维护，与金额是否缴足无关
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeePayment {
    pub id: i64,
    pub student_id: i64,
    pub fee_structure_id: i64,
    pub amount_paid: f64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub is_paid: bool,
}
