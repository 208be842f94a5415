//! Authorization context for authenticated users

use crate::types::{ProfileIdentity, UserRole};

/// Represents an authenticated user context
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: ProfileIdentity,
}

impl AuthContext {
    /// Create new auth context for a user
    pub fn new(user: ProfileIdentity) -> Self {
        Self { user }
    }

    /// Check if user has the creator role
    pub fn is_creator(&self) -> bool {
        self.user.role == UserRole::Creator
    }

    /// Check if user has the admin role
    pub fn is_admin(&self) -> bool {
        self.user.role == UserRole::Admin
    }

    /// Check if the account is suspended
    pub fn is_suspended(&self) -> bool {
        self.user.suspended_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn create_test_identity(role: UserRole) -> ProfileIdentity {
        ProfileIdentity {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            display_name: Some("Test User".to_string()),
            avatar_url: None,
            role,
            suspended_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_auth_context_role_checks() {
        let creator_ctx = AuthContext::new(create_test_identity(UserRole::Creator));
        let client_ctx = AuthContext::new(create_test_identity(UserRole::Client));
        let admin_ctx = AuthContext::new(create_test_identity(UserRole::Admin));

        assert!(creator_ctx.is_creator());
        assert!(!creator_ctx.is_admin());

        assert!(!client_ctx.is_creator());
        assert!(!client_ctx.is_admin());

        assert!(admin_ctx.is_admin());
        assert!(!admin_ctx.is_creator());
    }

    #[test]
    fn test_auth_context_suspension() {
        let mut identity = create_test_identity(UserRole::Creator);
        let ctx = AuthContext::new(identity.clone());
        assert!(!ctx.is_suspended());

        identity.suspended_at = Some(Utc::now());
        let suspended_ctx = AuthContext::new(identity);
        assert!(suspended_ctx.is_suspended());
    }
}
