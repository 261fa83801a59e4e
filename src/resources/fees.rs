use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, Condition, QueryOrder, Select, Set};

use super::{CrudResource, active_value};
use crate::access::{Actor, Scope};
use crate::entity::{fee_payments, fee_structures, format_date, students, to_datetime};
use crate::errors::Result;
use crate::models::fees::entities::{FeePayment, FeeStructure};
use crate::models::fees::requests::{
    CreateFeePaymentRequest, CreateFeeStructureRequest, UpdateFeePaymentRequest,
    UpdateFeeStructureRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{FieldErrors, common::round_money};

pub struct FeeStructureResource;

impl CrudResource for FeeStructureResource {
    type Entity = fee_structures::Entity;
    type Model = fee_structures::Model;
    type ActiveModel = fee_structures::ActiveModel;
    type Create = CreateFeeStructureRequest;
    type Update = UpdateFeeStructureRequest;
    type Output = FeeStructure;

    const NAME: &'static str = "Fee structure";
    const PATH: &'static str = "fee-structures";

    fn id_column() -> fee_structures::Column {
        fee_structures::Column::Id
    }

    fn validate(model: &fee_structures::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(grade) = active_value(&model.grade) {
            errors.not_blank("grade", grade);
        }
        if let Some(amount) = active_value(&model.amount) {
            errors.non_negative("amount", *amount);
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateFeeStructureRequest,
        _now: i64,
    ) -> Result<fee_structures::ActiveModel> {
        Ok(fee_structures::ActiveModel {
            academic_year_id: Set(req.academic_year_id),
            fee_type: Set(req.fee_type.to_string()),
            grade: Set(req.grade),
            amount: Set(round_money(req.amount)),
            due_date: Set(format_date(req.due_date)),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut fee_structures::ActiveModel,
        req: UpdateFeeStructureRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(year) = req.academic_year_id {
            model.academic_year_id = Set(year);
        }
        if let Some(fee_type) = req.fee_type {
            model.fee_type = Set(fee_type.to_string());
        }
        if let Some(grade) = req.grade {
            model.grade = Set(grade);
        }
        if let Some(amount) = req.amount {
            model.amount = Set(round_money(amount));
        }
        if let Some(due_date) = req.due_date {
            model.due_date = Set(format_date(due_date));
        }
        Ok(())
    }
}

pub struct FeePaymentResource;

impl CrudResource for FeePaymentResource {
    type Entity = fee_payments::Entity;
    type Model = fee_payments::Model;
    type ActiveModel = fee_payments::ActiveModel;
    type Create = CreateFeePaymentRequest;
    type Update = UpdateFeePaymentRequest;
    type Output = FeePayment;

    const NAME: &'static str = "Fee payment";
    const PATH: &'static str = "fee-payments";

    fn id_column() -> fee_payments::Column {
        fee_payments::Column::Id
    }

    fn order(select: Select<fee_payments::Entity>) -> Select<fee_payments::Entity> {
        select
            .order_by_desc(fee_payments::Column::PaymentDate)
            .order_by_asc(fee_payments::Column::Id)
    }

    // 学生看到自己的缴费，家长看到子女的缴费
    fn scope(actor: &Actor) -> Scope {
        match actor.role() {
            UserRole::Student => Scope::with_profile(actor.student(), |student| {
                Scope::only(Condition::all().add(fee_payments::Column::StudentId.eq(student.id)))
            }),
            UserRole::Parent => Scope::with_profile(actor.parent(), |parent| {
                Scope::only(
                    Condition::all().add(
                        fee_payments::Column::StudentId.in_subquery(
                            Query::select()
                                .column(students::Column::Id)
                                .from(students::Entity)
                                .and_where(students::Column::ParentId.eq(parent.id))
                                .to_owned(),
                        ),
                    ),
                )
            }),
            _ => Scope::All,
        }
    }

    fn validate(model: &fee_payments::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(amount) = active_value(&model.amount_paid) {
            errors.non_negative("amount_paid", *amount);
        }
        errors
    }

    fn new_model(
        _actor: &Actor,
        req: CreateFeePaymentRequest,
        now: i64,
    ) -> Result<fee_payments::ActiveModel> {
        let payment_date = req
            .payment_date
            .unwrap_or_else(|| to_datetime(now).date_naive());
        Ok(fee_payments::ActiveModel {
            student_id: Set(req.student_id),
            fee_structure_id: Set(req.fee_structure_id),
            amount_paid: Set(round_money(req.amount_paid)),
            payment_date: Set(format_date(payment_date)),
            payment_method: Set(req.payment_method.to_string()),
            transaction_id: Set(req.transaction_id),
            is_paid: Set(req.is_paid),
            ..Default::default()
        })
    }

    fn apply_update(
        model: &mut fee_payments::ActiveModel,
        req: UpdateFeePaymentRequest,
        _now: i64,
    ) -> Result<()> {
        if let Some(amount) = req.amount_paid {
            model.amount_paid = Set(round_money(amount));
        }
        if let Some(date) = req.payment_date {
            model.payment_date = Set(format_date(date));
        }
        if let Some(method) = req.payment_method {
            model.payment_method = Set(method.to_string());
        }
        if let Some(transaction_id) = req.transaction_id {
            model.transaction_id = Set(transaction_id);
        }
        if let Some(is_paid) = req.is_paid {
            model.is_paid = Set(is_paid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::access::{Action, Profile, tests::user_with_role};
    use crate::models::fees::entities::{FeeType, PaymentMethod};

    #[test]
    fn test_amount_rounded_to_cents() {
        let admin = Actor::new(user_with_role(1, UserRole::Admin), Profile::None);
        let req = CreateFeeStructureRequest {
            academic_year_id: 1,
            fee_type: FeeType::Tuition,
            grade: "Grade 1".to_string(),
            amount: 1250.456,
            due_date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        };
        let model = FeeStructureResource::new_model(&admin, req, 0).unwrap();
        assert_eq!(active_value(&model.amount), Some(&1250.46));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let model = fee_payments::ActiveModel {
            amount_paid: Set(-5.0),
            ..Default::default()
        };
        assert!(FeePaymentResource::validate(&model).contains("amount_paid"));
    }

    #[test]
    fn test_payment_defaults() {
        let admin = Actor::new(user_with_role(1, UserRole::Admin), Profile::None);
        let req = CreateFeePaymentRequest {
            student_id: 2,
            fee_structure_id: 3,
            amount_paid: 100.0,
            payment_date: None,
            payment_method: PaymentMethod::Online,
            transaction_id: None,
            is_paid: false,
        };
        // 2024-03-01 00:00:00 UTC
        let model = FeePaymentResource::new_model(&admin, req, 1_709_251_200).unwrap();
        assert_eq!(
            active_value(&model.payment_date).map(String::as_str),
            Some("2024-03-01")
        );
        assert_eq!(active_value(&model.is_paid), Some(&false));
    }

    #[test]
    fn test_only_administrators_write_fees() {
        let teacher = Actor::new(user_with_role(4, UserRole::Teacher), Profile::None);
        let principal = Actor::new(user_with_role(5, UserRole::Principal), Profile::None);
        assert!(!FeePaymentResource::permits(&teacher, Action::Create));
        assert!(FeeStructureResource::permits(&principal, Action::Delete));
    }

    #[test]
    fn test_orphan_parent_sees_no_payments() {
        let parent = Actor::new(user_with_role(6, UserRole::Parent), Profile::None);
        assert!(FeePaymentResource::scope(&parent).is_empty());
    }
}
