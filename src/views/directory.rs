//! User Directory
//!
//! The lookup collaborator profile views are assembled from. The cache never
//! calls it; [`ProfileViews`](super::ProfileViews) does, on a miss.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

// == Records ==
/// Stored user account, as the directory knows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub nickname: String,
    #[serde(default)]
    pub avatar_id: Option<String>,
    /// Last profile update (Unix seconds)
    #[serde(default)]
    pub updated_at: i64,
}

/// Avatar image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Avatar {
    pub id: String,
    pub avatar_url: String,
}

// == User Directory ==
/// Source of user and avatar records.
pub trait UserDirectory: Send + Sync {
    /// Looks a user up by id.
    fn user(&self, id: &str) -> Option<UserRecord>;

    /// Looks an avatar up by id.
    fn avatar(&self, avatar_id: &str) -> Option<Avatar>;
}

// == In-Memory Directory ==
/// Directory held in memory, optionally seeded from a JSON file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(from = "DirectoryFile")]
pub struct InMemoryDirectory {
    users: HashMap<String, UserRecord>,
    avatars: HashMap<String, Avatar>,
}

/// On-disk layout: plain lists, indexed by id on load.
#[derive(Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(default)]
    avatars: Vec<Avatar>,
}

impl From<DirectoryFile> for InMemoryDirectory {
    fn from(file: DirectoryFile) -> Self {
        let mut directory = Self::new();
        file.users.into_iter().for_each(|u| directory.insert_user(u));
        file.avatars.into_iter().for_each(|a| directory.insert_avatar(a));
        directory
    }
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `{ "users": [...], "avatars": [...] }` from `path`.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading user directory {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing user directory {}", path.display()))
    }

    pub fn insert_user(&mut self, user: UserRecord) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn insert_avatar(&mut self, avatar: Avatar) {
        self.avatars.insert(avatar.id.clone(), avatar);
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl UserDirectory for InMemoryDirectory {
    fn user(&self, id: &str) -> Option<UserRecord> {
        self.users.get(id).cloned()
    }

    fn avatar(&self, avatar_id: &str) -> Option<Avatar> {
        self.avatars.get(avatar_id).cloned()
    }
}
