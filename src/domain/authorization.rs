use std::collections::HashSet;

/// Role names understood by the catalog
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";

    /// Check if a role is valid
    pub fn is_valid_role(role: &str) -> bool {
        matches!(role, ADMIN | USER)
    }
}

/// User context extracted from authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
    pub roles: Vec<String>,
    /// Namespaces the user is a member of
    pub namespace_ids: HashSet<i64>,
    pub is_api_key: bool,
}

impl UserContext {
    pub fn new(user_id: String, roles: Vec<String>, namespace_ids: HashSet<i64>) -> Self {
        Self {
            user_id,
            roles,
            namespace_ids,
            is_api_key: false,
        }
    }

    /// Context for a static API key. Keys act as administrators.
    pub fn from_api_key(key_label: &str) -> Self {
        Self {
            user_id: format!("api_key:{}", key_label),
            roles: vec![roles::ADMIN.to_string()],
            namespace_ids: HashSet::new(),
            is_api_key: true,
        }
    }

    /// Context used when authentication is disabled for development
    pub fn anonymous_admin() -> Self {
        Self::new(
            "anonymous".to_string(),
            vec![roles::ADMIN.to_string()],
            HashSet::new(),
        )
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(roles::ADMIN)
    }

    pub fn is_member_of(&self, namespace_id: i64) -> bool {
        self.namespace_ids.contains(&namespace_id)
    }
}
