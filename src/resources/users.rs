use sea_orm::{ColumnTrait, Condition, Set};

use super::{CrudResource, active_value};
use crate::access::{Actor, Scope};
use crate::entity::{format_date, users};
use crate::errors::{Result, SchoolError};
use crate::models::FieldErrors;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

const ROLE_IS_IMMUTABLE: &str = "role: The role of an existing user cannot be changed.";

pub struct UserResource;

impl CrudResource for UserResource {
    type Entity = users::Entity;
    type Model = users::Model;
    type ActiveModel = users::ActiveModel;
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;
    type Output = User;

    const NAME: &'static str = "User";
    const PATH: &'static str = "users";

    fn id_column() -> users::Column {
        users::Column::Id
    }

    // 非管理员只能看到自己
    fn scope(actor: &Actor) -> Scope {
        if actor.is_administrator() {
            Scope::All
        } else {
            Scope::only(Condition::all().add(users::Column::Id.eq(actor.id())))
        }
    }

    fn validate_create(_actor: &Actor, req: &CreateUserRequest) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Err(msg) = validate_password_simple(&req.password) {
            errors.add("password", msg);
        }
        errors
    }

    fn validate(model: &users::ActiveModel) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(Err(msg)) = active_value(&model.username).map(|u| validate_username(u)) {
            errors.add("username", msg);
        }
        if let Some(Err(msg)) = active_value(&model.email).map(|e| validate_email(e)) {
            errors.add("email", msg);
        }
        errors
    }

    fn new_model(_actor: &Actor, req: CreateUserRequest, now: i64) -> Result<users::ActiveModel> {
        new_user_model(req, now)
    }

    // 角色决定档案与数据范围，创建后不可修改
    fn apply_update(
        model: &mut users::ActiveModel,
        req: UpdateUserRequest,
        now: i64,
    ) -> Result<()> {
        if req.role.is_some() {
            return Err(SchoolError::validation(ROLE_IS_IMMUTABLE));
        }
        if let Some(email) = req.email {
            model.email = Set(email);
        }
        if let Some(password) = req.password {
            validate_password_simple(&password).map_err(SchoolError::validation)?;
            model.password_hash = Set(hash_password(&password)?);
        }
        if let Some(first_name) = req.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = req.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(phone_number) = req.phone_number {
            model.phone_number = Set(phone_number);
        }
        if let Some(address) = req.address {
            model.address = Set(address);
        }
        if let Some(date_of_birth) = req.date_of_birth {
            model.date_of_birth = Set(date_of_birth.map(format_date));
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }
        if let Some(is_staff) = req.is_staff {
            model.is_staff = Set(is_staff);
        }
        model.updated_at = Set(now);
        Ok(())
    }
}

/// 构造新用户，密码在此处哈希
pub(crate) fn new_user_model(req: CreateUserRequest, now: i64) -> Result<users::ActiveModel> {
    let role = req.role.unwrap_or(UserRole::Student);
    Ok(users::ActiveModel {
        username: Set(req.username),
        email: Set(req.email),
        password_hash: Set(hash_password(&req.password)?),
        role: Set(role.to_string()),
        first_name: Set(req.first_name),
        last_name: Set(req.last_name),
        phone_number: Set(req.phone_number),
        address: Set(req.address),
        date_of_birth: Set(req.date_of_birth.map(format_date)),
        is_active: Set(req.is_active.unwrap_or(true)),
        is_staff: Set(req.is_staff.unwrap_or(role.is_administrator())),
        last_login: Set(None),
        date_joined: Set(now),
        updated_at: Set(now),
        ..Default::default()
    })
}
