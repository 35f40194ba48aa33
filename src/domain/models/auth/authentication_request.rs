use crate::config::Role;

/// 미들웨어 인증 모드
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 세션이 없으면 401
    Required,
    /// 세션이 있으면 사용자 정보를 붙이고, 없어도 통과
    Optional,
}

/// 스코프 단위 역할 요구사항
#[derive(Debug, Clone)]
pub enum RequiredRole {
    Single(Role),
    Any(Vec<Role>),
}

impl RequiredRole {
    pub fn is_satisfied(&self, user_roles: &[Role]) -> bool {
        match self {
            RequiredRole::Single(required_role) => user_roles.contains(required_role),
            RequiredRole::Any(required_roles) => {
                required_roles.iter().any(|role| user_roles.contains(role))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_role_single() {
        let required = RequiredRole::Single(Role::Admin);
        assert!(required.is_satisfied(&[Role::Customer, Role::Admin]));
        assert!(!required.is_satisfied(&[Role::Customer]));
    }

    #[test]
    fn test_required_role_any() {
        let required = RequiredRole::Any(vec![Role::Customer, Role::Admin]);
        assert!(required.is_satisfied(&[Role::Customer]));
        assert!(required.is_satisfied(&[Role::Admin]));
        assert!(!required.is_satisfied(&[]));
    }
}
