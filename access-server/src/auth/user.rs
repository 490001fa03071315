//! Current user context

use serde::{Deserialize, Serialize};

/// Principal attached to a request by [`BearerAuthenticator`](super::BearerAuthenticator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl CurrentUser {
    /// Check if user is an admin (role == "admin")
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Check if user has a specific permission
    /// Supports wildcard matching (e.g., "users:*" matches "users:write")
    pub fn has_permission(&self, permission: &str) -> bool {
        // Admin has all permissions
        if self.is_admin() {
            return true;
        }

        // Check for special 'all' permission
        if self.permissions.iter().any(|p| p == "all") {
            return true;
        }

        self.permissions.iter().any(|p| {
            if p == permission {
                return true;
            }
            // "users:*" matches "users:write" but not "users" itself
            match p.strip_suffix(":*") {
                Some(prefix) => permission
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with(':')),
                None => false,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str, permissions: &[&str]) -> CurrentUser {
        CurrentUser {
            id: "1".to_string(),
            username: "john".to_string(),
            role: role.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_current_user_permissions() {
        let user = user("user", &["users:read", "profile:*"]);

        assert!(user.has_permission("users:read"));
        assert!(user.has_permission("profile:write")); // Wildcard match
        assert!(!user.has_permission("users:write"));
        assert!(!user.has_permission("profile"));
        assert!(!user.has_permission("profiles:read"));
    }

    #[test]
    fn test_admin_has_all_permissions() {
        let admin = user("admin", &[]);

        assert!(admin.has_permission("users:read"));
        assert!(admin.has_permission("users:delete"));
        assert!(admin.is_admin());
    }

    #[test]
    fn test_all_permission() {
        let root = user("manager", &["all"]);
        assert!(root.has_permission("anything:at_all"));
        assert!(!root.is_admin());
    }
}
