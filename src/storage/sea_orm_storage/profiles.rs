use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::SeaOrmStorage;
use crate::access::{Actor, Profile};
use crate::entity::{parents, students, teachers};
use crate::errors::Result;
use crate::models::users::entities::{User, UserRole};

impl SeaOrmStorage {
    pub(crate) async fn student_by_user(&self, user_id: i64) -> Result<Option<students::Model>> {
        Ok(students::Entity::find()
            .filter(students::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }

    pub(crate) async fn teacher_by_user(&self, user_id: i64) -> Result<Option<teachers::Model>> {
        Ok(teachers::Entity::find()
            .filter(teachers::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }

    pub(crate) async fn parent_by_user(&self, user_id: i64) -> Result<Option<parents::Model>> {
        Ok(parents::Entity::find()
            .filter(parents::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }

    /// 按角色加载档案，档案缺失时为 Profile::None
    pub async fn resolve_actor_impl(&self, user: User) -> Result<Actor> {
        let profile = match user.role {
            UserRole::Student => self
                .student_by_user(user.id)
                .await?
                .map(|m| Profile::Student(m.into())),
            UserRole::Teacher => self
                .teacher_by_user(user.id)
                .await?
                .map(|m| Profile::Teacher(m.into())),
            UserRole::Parent => self
                .parent_by_user(user.id)
                .await?
                .map(|m| Profile::Parent(m.into())),
            UserRole::Admin | UserRole::Principal => None,
        };
        Ok(Actor::new(user, profile.unwrap_or(Profile::None)))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveModelTrait, Set};

    use crate::entity::teachers;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::testing::{memory_storage, seed_user};

    #[actix_web::test]
    async fn test_resolve_actor_loads_profile_for_role() {
        let storage = memory_storage().await;
        let user = seed_user(&storage.db, "teacher01", UserRole::Teacher).await;
        let teacher = teachers::ActiveModel {
            user_id: Set(user.id),
            teacher_code: Set("T-01".to_string()),
            hire_date: Set("2020-01-01".to_string()),
            qualifications: Set(None),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();

        let actor = storage.resolve_actor_impl(user.into_user()).await.unwrap();
        assert_eq!(actor.teacher().map(|t| t.id), Some(teacher.id));
        assert!(actor.student().is_none());
    }

    #[actix_web::test]
    async fn test_missing_profile_resolves_to_none() {
        let storage = memory_storage().await;
        let user = seed_user(&storage.db, "student01", UserRole::Student).await;
        let actor = storage.resolve_actor_impl(user.into_user()).await.unwrap();
        assert!(actor.student().is_none());
        assert_eq!(actor.role(), UserRole::Student);
    }
}
