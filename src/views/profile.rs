//! Profile Views
//!
//! Public user profile assembled from several directory lookups and
//! memoized in the view cache, so rendering a list of posts or comments
//! does not repeat the lookups per item.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::cache::ViewCache;
use crate::cache_key;
use crate::views::{Avatar, UserDirectory};

/// Key namespace for cached profile views.
const BASE_USER_VIEW: &str = "base_user";

// == Base User ==
/// Public profile shown next to a user's posts and comments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseUser {
    pub user_id: String,
    pub nickname: String,
    #[serde(rename = "avatar")]
    pub avatar_info: Option<Avatar>,
    pub updated_time: i64,
}

/// A profile view and whether it came from the cache.
#[derive(Debug, Clone)]
pub struct ProfileLookup {
    pub user: Arc<BaseUser>,
    pub cached: bool,
}

// == Profile Views ==
/// Cache-aside reader for [`BaseUser`] views.
#[derive(Clone)]
pub struct ProfileViews {
    cache: Arc<ViewCache>,
    directory: Arc<dyn UserDirectory>,
}

impl ProfileViews {
    pub fn new(cache: Arc<ViewCache>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { cache, directory }
    }

    /// Cache key of a user's profile view.
    pub fn key(user_id: &str) -> String {
        cache_key!(BASE_USER_VIEW, user_id)
    }

    // == Base User ==
    /// Returns the profile view of `user_id`.
    ///
    /// On a miss the view is assembled from the directory and stored with
    /// the cache's default TTL. Unknown users and empty ids yield `None` and
    /// are never cached.
    pub fn base_user(&self, user_id: &str) -> Option<ProfileLookup> {
        if user_id.is_empty() {
            return None;
        }

        let key = Self::key(user_id);
        if let Some(user) = self.cache.get_as::<BaseUser>(&key) {
            return Some(ProfileLookup { user, cached: true });
        }

        let user = Arc::new(self.assemble(user_id)?);
        self.cache.put_shared(key, user.clone(), None);
        debug!("Cached profile view for user {}", user_id);

        Some(ProfileLookup {
            user,
            cached: false,
        })
    }

    /// Drops the cached view of `user_id`. Returns whether one was cached.
    pub fn invalidate(&self, user_id: &str) -> bool {
        self.cache.delete([Self::key(user_id)]) > 0
    }

    fn assemble(&self, user_id: &str) -> Option<BaseUser> {
        let record = self.directory.user(user_id)?;
        let avatar_info = record
            .avatar_id
            .as_deref()
            .and_then(|avatar_id| self.directory.avatar(avatar_id));

        Some(BaseUser {
            user_id: record.id,
            nickname: record.nickname,
            avatar_info,
            updated_time: record.updated_at,
        })
    }
}
