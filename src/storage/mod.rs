use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::access::Actor;
use crate::models::{
    academics::entities::Subject,
    dashboard::responses::{AdminDashboard, ParentDashboard, StudentDashboard, TeacherDashboard},
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod resources;
pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 数据库连接，供通用资源操作使用
    fn connection(&self) -> &DatabaseConnection;

    /// 用户管理方法
    // 创建用户，密码在内部哈希
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 档案方法
    // 按角色加载用户对应的档案
    async fn resolve_actor(&self, user: User) -> Result<Actor>;

    /// 教师科目方法
    // 教师不存在时返回 None
    async fn list_teacher_subjects(&self, teacher_id: i64) -> Result<Option<Vec<Subject>>>;
    // 整体替换教师所授科目
    async fn set_teacher_subjects(
        &self,
        teacher_id: i64,
        subject_ids: &[i64],
    ) -> Result<Option<Vec<Subject>>>;

    /// 看板方法
    async fn admin_dashboard(&self, actor: &Actor) -> Result<AdminDashboard>;
    // 以下三个在调用者缺少对应档案时返回 None
    async fn teacher_dashboard(&self, user: &User) -> Result<Option<TeacherDashboard>>;
    async fn student_dashboard(&self, user: &User) -> Result<Option<StudentDashboard>>;
    async fn parent_dashboard(&self, user: &User) -> Result<Option<ParentDashboard>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
