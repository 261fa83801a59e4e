//! 访问控制
//!
//! `Actor` 是已认证用户与其角色档案的组合，`Scope` 描述某个角色能看到的数据范围，
//! `Action` 用于写操作的权限判断。

use sea_orm::Condition;

use crate::models::profiles::entities::{Parent, Student, Teacher};
use crate::models::users::entities::{User, UserRole};

/// 用户角色对应的档案
#[derive(Debug, Clone)]
pub enum Profile {
    Student(Student),
    Teacher(Teacher),
    Parent(Parent),
    None,
}

/// 当前请求的调用者
#[derive(Debug, Clone)]
pub struct Actor {
    pub user: User,
    pub profile: Profile,
}

impl Actor {
    pub fn new(user: User, profile: Profile) -> Self {
        Self { user, profile }
    }

    pub fn id(&self) -> i64 {
        self.user.id
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }

    /// 管理员与校长
    pub fn is_administrator(&self) -> bool {
        self.user.role.is_administrator()
    }

    pub fn student(&self) -> Option<&Student> {
        match &self.profile {
            Profile::Student(student) => Some(student),
            _ => None,
        }
    }

    pub fn teacher(&self) -> Option<&Teacher> {
        match &self.profile {
            Profile::Teacher(teacher) => Some(teacher),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<&Parent> {
        match &self.profile {
            Profile::Parent(parent) => Some(parent),
            _ => None,
        }
    }
}

/// 查询范围
#[derive(Debug, Clone)]
pub enum Scope {
    /// 不做限制
    All,
    /// 没有任何可见数据（例如档案缺失）
    None,
    /// 附加过滤条件
    Only(Condition),
}

impl Scope {
    pub fn only(condition: Condition) -> Self {
        Scope::Only(condition)
    }

    /// 档案存在时按档案生成范围，否则为空
    pub fn with_profile<T>(profile: Option<&T>, build: impl FnOnce(&T) -> Scope) -> Self {
        profile.map(build).unwrap_or(Scope::None)
    }

    /// 需要附加到查询上的条件，`None` 表示不需要过滤
    pub fn condition(&self) -> Option<Condition> {
        match self {
            Scope::Only(condition) => Some(condition.clone()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Scope::None)
    }
}

/// 写操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    pub(crate) fn user_with_role(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            first_name: String::new(),
            last_name: String::new(),
            phone_number: None,
            address: None,
            date_of_birth: None,
            is_active: true,
            is_staff: false,
            last_login: None,
            date_joined: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn student_actor(
        user_id: i64,
        student_id: i64,
        grade: &str,
        section: &str,
    ) -> Actor {
        Actor::new(
            user_with_role(user_id, UserRole::Student),
            Profile::Student(Student {
                id: student_id,
                user_id,
                student_code: format!("S{student_id}"),
                enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap_or_default(),
                grade: grade.to_string(),
                section: section.to_string(),
                parent_id: None,
            }),
        )
    }

    #[test]
    fn test_profile_accessors() {
        let actor = student_actor(1, 7, "Grade 1", "A");
        assert_eq!(actor.student().map(|s| s.id), Some(7));
        assert!(actor.teacher().is_none());
        assert!(actor.parent().is_none());
        assert!(!actor.is_administrator());
    }

    #[test]
    fn test_scope_with_missing_profile_is_empty() {
        let actor = Actor::new(user_with_role(2, UserRole::Teacher), Profile::None);
        let scope = Scope::with_profile(actor.teacher(), |_| Scope::All);
        assert!(scope.is_empty());
        assert!(scope.condition().is_none());
    }

    #[test]
    fn test_principal_is_administrator() {
        let actor = Actor::new(user_with_role(3, UserRole::Principal), Profile::None);
        assert!(actor.is_administrator());
        assert_eq!(Action::Delete.to_string(), "delete");
    }
}
