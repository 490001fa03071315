//! 用户目录
//!
//! 令牌 → 用户映射。使用 DashMap 实现无锁并发读写，
//! 运行时可以通过 `POST /api/users` 添加用户。

use std::path::Path;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::user::CurrentUser;
use crate::core::{AppError, AppResult};

/// 用户目录文件中的一条记录
///
/// ```json
/// [
///   { "token": "t-1", "id": "1", "username": "alice", "role": "admin", "permissions": [] }
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub token: String,
    #[serde(flatten)]
    pub user: CurrentUser,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    by_token: DashMap<String, CurrentUser>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let directory = Self::new();
        for record in records {
            directory.insert(record.token, record.user);
        }
        directory
    }

    /// 从 JSON 文件加载
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AppError::UserDirectoryIo {
            path: path.display().to_string(),
            source,
        })?;
        let records: Vec<UserRecord> =
            serde_json::from_str(&content).map_err(|source| AppError::UserDirectoryParse {
                path: path.display().to_string(),
                source,
            })?;

        tracing::info!(path = %path.display(), users = records.len(), "User directory loaded");
        Ok(Self::from_records(records))
    }

    /// 内置演示用户
    ///
    /// | 令牌 | 用户 | 权限 |
    /// |------|------|------|
    /// | admin-token | admin | 角色 admin (全部) |
    /// | manager-token | manager | users:*, profile:read |
    /// | user-token | user1 | users:read, profile:read |
    /// | guest-token | guest | profile:read |
    pub fn demo() -> Self {
        let record = |token: &str, id: &str, username: &str, role: &str, permissions: &[&str]| {
            UserRecord {
                token: token.to_string(),
                user: CurrentUser {
                    id: id.to_string(),
                    username: username.to_string(),
                    role: role.to_string(),
                    permissions: permissions.iter().map(|p| p.to_string()).collect(),
                },
            }
        };

        Self::from_records([
            record("admin-token", "1", "admin", "admin", &[]),
            record("manager-token", "2", "manager", "manager", &["users:*", "profile:read"]),
            record("user-token", "3", "user1", "user", &["users:read", "profile:read"]),
            record("guest-token", "4", "guest", "guest", &["profile:read"]),
        ])
    }

    pub fn insert(&self, token: impl Into<String>, user: CurrentUser) {
        self.by_token.insert(token.into(), user);
    }

    pub fn find_by_token(&self, token: &str) -> Option<CurrentUser> {
        self.by_token.get(token).map(|entry| entry.value().clone())
    }

    pub fn find_by_id(&self, id: &str) -> Option<CurrentUser> {
        self.by_token
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.value().clone())
    }

    /// 移除某个用户的所有令牌，返回移除数量
    pub fn remove_user(&self, id: &str) -> usize {
        let before = self.by_token.len();
        self.by_token.retain(|_, user| user.id != id);
        before - self.by_token.len()
    }

    /// 所有用户，按 id 排序
    pub fn users(&self) -> Vec<CurrentUser> {
        let mut users: Vec<_> = self
            .by_token
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users.dedup_by(|a, b| a.id == b.id);
        users
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_demo_directory() {
        let directory = UserDirectory::demo();
        assert_eq!(directory.len(), 4);
        assert_eq!(directory.find_by_token("user-token").unwrap().username, "user1");
        assert_eq!(directory.find_by_id("2").unwrap().username, "manager");
        assert!(directory.find_by_token("nope").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"token":"t-1","id":"7","username":"alice","role":"user","permissions":["users:read"]}}]"#
        )
        .unwrap();

        let directory = UserDirectory::load(file.path()).unwrap();
        let alice = directory.find_by_token("t-1").unwrap();
        assert_eq!(alice.id, "7");
        assert_eq!(alice.permissions, vec!["users:read"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = UserDirectory::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, AppError::UserDirectoryIo { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = UserDirectory::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::UserDirectoryParse { .. }));
    }

    #[test]
    fn test_remove_user_drops_all_tokens() {
        let directory = UserDirectory::demo();
        let user = directory.find_by_id("3").unwrap();
        directory.insert("second-token", user);

        assert_eq!(directory.remove_user("3"), 2);
        assert!(directory.find_by_token("user-token").is_none());
        assert_eq!(directory.users().len(), 3);
    }
}
