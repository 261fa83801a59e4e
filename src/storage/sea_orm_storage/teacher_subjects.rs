use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::SeaOrmStorage;
use crate::entity::{subjects, teacher_subjects, teachers};
use crate::errors::Result;
use crate::models::academics::entities::Subject;

impl SeaOrmStorage {
    pub(crate) async fn subjects_of_teacher<C: ConnectionTrait>(
        db: &C,
        teacher_id: i64,
    ) -> Result<Vec<Subject>> {
        let models = subjects::Entity::find()
            .filter(
                subjects::Column::Id.in_subquery(
                    Query::select()
                        .column(teacher_subjects::Column::SubjectId)
                        .from(teacher_subjects::Entity)
                        .and_where(teacher_subjects::Column::TeacherId.eq(teacher_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(subjects::Column::Id)
            .all(db)
            .await?;
        Ok(models.into_iter().map(Subject::from).collect())
    }

    pub async fn list_teacher_subjects_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Option<Vec<Subject>>> {
        if teachers::Entity::find_by_id(teacher_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Ok(None);
        }
        Ok(Some(Self::subjects_of_teacher(&self.db, teacher_id).await?))
    }

    /// 在事务中删除旧关联并写入新关联，未知科目触发外键错误
    pub async fn set_teacher_subjects_impl(
        &self,
        teacher_id: i64,
        subject_ids: &[i64],
    ) -> Result<Option<Vec<Subject>>> {
        let txn = self.db.begin().await?;
        if teachers::Entity::find_by_id(teacher_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        teacher_subjects::Entity::delete_many()
            .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
            .exec(&txn)
            .await?;

        let mut unique_ids = subject_ids.to_vec();
        unique_ids.sort_unstable();
        unique_ids.dedup();
        for subject_id in unique_ids {
            teacher_subjects::ActiveModel {
                teacher_id: Set(teacher_id),
                subject_id: Set(subject_id),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        let subjects = Self::subjects_of_teacher(&txn, teacher_id).await?;
        txn.commit().await?;
        Ok(Some(subjects))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveModelTrait, Set};

    use crate::entity::{subjects, teachers};
    use crate::errors::SchoolError;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::testing::{memory_storage, seed_user};

    async fn seed(storage: &SeaOrmStorage) -> (i64, Vec<i64>) {
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
        let mut ids = Vec::new();
        for code in ["MATH", "PHY", "CHEM"] {
            let subject = subjects::ActiveModel {
                name: Set(code.to_string()),
                code: Set(code.to_string()),
                description: Set(None),
                grade: Set("Grade 9".to_string()),
                ..Default::default()
            }
            .insert(&storage.db)
            .await
            .unwrap();
            ids.push(subject.id);
        }
        (teacher.id, ids)
    }

    #[actix_web::test]
    async fn test_replace_teacher_subjects() {
        let storage = memory_storage().await;
        let (teacher_id, ids) = seed(&storage).await;

        let first = storage
            .set_teacher_subjects_impl(teacher_id, &[ids[0], ids[1], ids[0]])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.len(), 2);

        let second = storage
            .set_teacher_subjects_impl(teacher_id, &[ids[2]])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.iter().map(|s| s.id).collect::<Vec<_>>(), vec![ids[2]]);

        let listed = storage
            .list_teacher_subjects_impl(teacher_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[actix_web::test]
    async fn test_unknown_subject_is_invalid_reference() {
        let storage = memory_storage().await;
        let (teacher_id, ids) = seed(&storage).await;
        storage
            .set_teacher_subjects_impl(teacher_id, &[ids[0]])
            .await
            .unwrap();

        let err = storage
            .set_teacher_subjects_impl(teacher_id, &[9999])
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::InvalidReference(_)));

        // 事务回滚，原有关联保留
        let listed = storage
            .list_teacher_subjects_impl(teacher_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[actix_web::test]
    async fn test_missing_teacher() {
        let storage = memory_storage().await;
        assert!(storage.list_teacher_subjects_impl(42).await.unwrap().is_none());
        assert!(storage.set_teacher_subjects_impl(42, &[]).await.unwrap().is_none());
    }
}
