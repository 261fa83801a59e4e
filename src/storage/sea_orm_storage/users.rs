use super::SeaOrmStorage;
use crate::entity::users::{Column, Entity as Users};
use crate::errors::Result;
use crate::models::users::{entities::User, requests::CreateUserRequest};
use crate::resources::users::new_user_model;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let model = new_user_model(req, now)?;
        let result = model.insert(&self.db).await?;
        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id).one(&self.db).await?;
        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        Ok(Users::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::SchoolError;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::sea_orm_storage::testing::memory_storage;
    use crate::utils::password::verify_password;

    fn request(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "SecureP@ss1".to_string(),
            role: Some(UserRole::Teacher),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone_number: None,
            address: None,
            date_of_birth: None,
            is_active: None,
            is_staff: None,
        }
    }

    #[actix_web::test]
    async fn test_create_and_lookup_user() {
        let storage = memory_storage().await;
        let user = storage
            .create_user_impl(request("ada_01", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Teacher);
        assert!(verify_password("SecureP@ss1", &user.password_hash));

        let by_email = storage
            .get_user_by_username_or_email_impl("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);

        assert!(storage.update_last_login_impl(user.id).await.unwrap());
        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert!(reloaded.last_login.is_some());
    }

    #[actix_web::test]
    async fn test_duplicate_username_is_conflict() {
        let storage = memory_storage().await;
        storage
            .create_user_impl(request("ada_01", "ada@example.com"))
            .await
            .unwrap();
        let err = storage
            .create_user_impl(request("ada_01", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }
}
