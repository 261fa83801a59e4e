//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod dashboard;
mod profiles;
mod teacher_subjects;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config.database.pool_size, config.database.timeout)
                .await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化，外键约束开启）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::access::Actor;
use crate::models::{
    academics::entities::Subject,
    dashboard::responses::{AdminDashboard, ParentDashboard, StudentDashboard, TeacherDashboard},
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 档案模块
    async fn resolve_actor(&self, user: User) -> Result<Actor> {
        self.resolve_actor_impl(user).await
    }

    // 教师科目模块
    async fn list_teacher_subjects(&self, teacher_id: i64) -> Result<Option<Vec<Subject>>> {
        self.list_teacher_subjects_impl(teacher_id).await
    }

    async fn set_teacher_subjects(
        &self,
        teacher_id: i64,
        subject_ids: &[i64],
    ) -> Result<Option<Vec<Subject>>> {
        self.set_teacher_subjects_impl(teacher_id, subject_ids)
            .await
    }

    // 看板模块
    async fn admin_dashboard(&self, actor: &Actor) -> Result<AdminDashboard> {
        self.admin_dashboard_impl(actor).await
    }

    async fn teacher_dashboard(&self, user: &User) -> Result<Option<TeacherDashboard>> {
        self.teacher_dashboard_impl(user).await
    }

    async fn student_dashboard(&self, user: &User) -> Result<Option<StudentDashboard>> {
        self.student_dashboard_impl(user).await
    }

    async fn parent_dashboard(&self, user: &User) -> Result<Option<ParentDashboard>> {
        self.parent_dashboard_impl(user).await
    }
}

/// 测试用的内存数据库
#[cfg(test)]
pub(crate) mod testing {
    use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

    use super::SeaOrmStorage;
    use crate::entity::users;
    use crate::models::users::entities::UserRole;

    /// 单连接的内存 SQLite，已执行全部迁移
    pub(crate) async fn memory_db() -> DatabaseConnection {
        let db = SeaOrmStorage::connect_sqlite("sqlite::memory:", 1, 5)
            .await
            .unwrap();
        SeaOrmStorage::migrate(&db).await.unwrap();
        db
    }

    pub(crate) async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::from_connection(memory_db().await)
    }

    /// 直接写入用户，跳过密码哈希
    pub(crate) async fn seed_user(
        db: &DatabaseConnection,
        username: &str,
        role: UserRole,
    ) -> users::Model {
        users::ActiveModel {
            username: Set(username.to_string()),
            email: Set(format!("{username}@example.com")),
            password_hash: Set("not-a-hash".to_string()),
            role: Set(role.to_string()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            phone_number: Set(None),
            address: Set(None),
            date_of_birth: Set(None),
            is_active: Set(true),
            is_staff: Set(role.is_administrator()),
            last_login: Set(None),
            date_joined: Set(0),
            updated_at: Set(0),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("academy.db").unwrap(),
            "sqlite://academy.db?mode=rwc"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://localhost/academy").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }
}
