//! 通用资源定义
//!
//! 每个实体实现一次 `CrudResource`，由 `storage::resources` 与 `services::resources`
//! 提供统一的列表、创建、查询、更新与删除。角色范围、写权限、字段校验以及
//! 创建时由服务端填写的字段都在各自的实现中给出。

pub mod academics;
pub mod assessments;
pub mod attendance;
pub mod communications;
pub mod fees;
pub mod profiles;
pub mod users;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait,
    FromQueryResult, IntoActiveModel, ModelTrait, QueryOrder, Select, Value,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::access::{Action, Actor, Scope};
use crate::errors::{Result, SchoolError};
use crate::models::FieldErrors;
use crate::models::profiles::entities::{Student, Teacher};
use crate::models::users::entities::UserRole;

pub use academics::{
    AcademicYearResource, ClassResource, ClassSubjectResource, ContentResource, SubjectResource,
    TimetableResource,
};
pub use assessments::{AssessmentResource, QuestionResource, SubmissionResource};
pub use attendance::AttendanceResource;
pub use communications::{
    AnnouncementResource, MessageResource, NotificationResource, ReportResource,
};
pub use fees::{FeePaymentResource, FeeStructureResource};
pub use profiles::{ParentResource, StudentResource, TeacherResource};
pub use users::UserResource;

#[async_trait::async_trait]
pub trait CrudResource: Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Model, ActiveModel = Self::ActiveModel>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Clone
        + Send
        + Sync
        + 'static;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + Sync
        + 'static;
    type Create: DeserializeOwned + 'static;
    type Update: DeserializeOwned + 'static;
    type Output: From<Self::Model> + Serialize;

    /// 资源名称，用于提示信息
    const NAME: &'static str;
    /// 路由路径，`/api/v1/{PATH}`
    const PATH: &'static str;
    /// 联合唯一约束涉及的字段
    const UNIQUE_TOGETHER: &'static [&'static str] = &[];

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    fn order(select: Select<Self::Entity>) -> Select<Self::Entity> {
        select.order_by_asc(Self::id_column())
    }

    /// 调用者可见的数据范围，同时作用于列表、详情、更新与删除
    fn scope(_actor: &Actor) -> Scope {
        Scope::All
    }

    /// 更新与删除时的范围，默认与读取一致；教师通常只能改自己名下的记录
    fn write_scope(actor: &Actor) -> Scope {
        Self::scope(actor)
    }

    fn permits(actor: &Actor, _action: Action) -> bool {
        actor.is_administrator()
    }

    /// 与调用者相关的请求级校验
    fn validate_create(_actor: &Actor, _req: &Self::Create) -> FieldErrors {
        FieldErrors::new()
    }

    /// 写入前对合并后的数据做校验，创建与更新共用
    fn validate(_model: &Self::ActiveModel) -> FieldErrors {
        FieldErrors::new()
    }

    /// 需要读取关联记录的校验，在 `validate` 之后执行
    async fn validate_related(
        _db: &DatabaseConnection,
        _model: &Self::ActiveModel,
    ) -> Result<FieldErrors> {
        Ok(FieldErrors::new())
    }

    fn new_model(actor: &Actor, req: Self::Create, now: i64) -> Result<Self::ActiveModel>;

    fn apply_update(model: &mut Self::ActiveModel, req: Self::Update, now: i64) -> Result<()>;
}

/// 读出 ActiveModel 中已有的值
pub(crate) fn active_value<V: Into<Value>>(value: &ActiveValue<V>) -> Option<&V> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v),
        ActiveValue::NotSet => None,
    }
}

/// 非管理员的教师调用者必须有教师档案
pub(crate) fn require_teacher(actor: &Actor) -> Result<&Teacher> {
    actor
        .teacher()
        .ok_or_else(|| SchoolError::not_found("Teacher profile not found"))
}

pub(crate) fn require_student(actor: &Actor) -> Result<&Student> {
    actor
        .student()
        .ok_or_else(|| SchoolError::not_found("Student profile not found"))
}

/// 管理员需要显式给出归属字段
pub(crate) fn owner_from_payload(field: &str, value: Option<i64>) -> Result<i64> {
    value.ok_or_else(|| SchoolError::validation(format!("{field}: This field is required.")))
}

/// 管理员与教师可写
pub(crate) fn staff_may_write(actor: &Actor) -> bool {
    actor.is_administrator() || actor.role() == UserRole::Teacher
}
