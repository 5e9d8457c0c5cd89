use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single message on the wall.
///
/// `id` and `edit_id` are fixed at creation. `timestamp` is milliseconds since
/// the Unix epoch and moves forward on every successful edit, which re-dates
/// the post to the top of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub alias: String,
    pub avatar: String,
    pub content: String,
    pub timestamp: i64,
    pub edit_id: String,
}

impl Post {
    pub fn new(
        id: String,
        alias: String,
        avatar: String,
        content: String,
        edit_id: String,
    ) -> Self {
        Self {
            id,
            alias,
            avatar,
            content,
            timestamp: now_millis(),
            edit_id,
        }
    }
}

/// Body of a create request. A blank `edit_id` means "generate one for me".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub edit_id: Option<String>,
}

/// Partial update. Absent fields are carried over from the stored post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.alias.is_none() && self.avatar.is_none() && self.content.is_none()
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Body of an edit request: the secret code plus the fields to change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    #[serde(default)]
    pub edit_id: String,
    #[serde(default)]
    pub updates: PostPatch,
}

impl EditRequest {
    pub fn new(edit_id: impl Into<String>, updates: PostPatch) -> Self {
        Self {
            edit_id: edit_id.into(),
            updates,
        }
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
