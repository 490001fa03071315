//! Permission Definitions
//!
//! 演示服务使用的权限目录。
//!
//! ## 格式
//! - `资源:操作`，如 `users:read`
//! - `资源:*` 匹配该资源的所有操作
//! - `all` 匹配所有权限 (仅管理员)

/// 可配置权限列表
pub const ALL_PERMISSIONS: &[&str] = &[
    "users:read",   // 查看用户列表
    "users:write",  // 创建用户
    "profile:read", // 查看自己的资料
];

/// Admin 专属权限（不在可配置列表中）
pub const ADMIN_ONLY_PERMISSIONS: &[&str] = &[
    "all", // 超级权限 (管理区)
];

/// 受保护路由使用的权限
pub const USERS_READ: &str = "users:read";
pub const USERS_WRITE: &str = "users:write";
pub const PROFILE_READ: &str = "profile:read";
pub const ADMIN_AREA: &str = "all";

/// Validate if a permission string is valid
pub fn is_valid_permission(permission: &str) -> bool {
    ALL_PERMISSIONS.contains(&permission)
        || is_admin_only(permission)
        || permission.ends_with(":*")
}

/// 只有管理员可以授予的权限
pub fn is_admin_only(permission: &str) -> bool {
    ADMIN_ONLY_PERMISSIONS.contains(&permission)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_permissions_are_valid() {
        for permission in ALL_PERMISSIONS.iter().chain(ADMIN_ONLY_PERMISSIONS) {
            assert!(is_valid_permission(permission), "{permission}");
        }
        assert!(is_valid_permission("reports:*"));
        assert!(!is_valid_permission("users:fly"));
    }

    #[test]
    fn test_admin_only_permissions() {
        assert!(is_admin_only(ADMIN_AREA));
        assert!(!is_admin_only(USERS_WRITE));
        assert!(!is_admin_only("users:*"));
    }
}
