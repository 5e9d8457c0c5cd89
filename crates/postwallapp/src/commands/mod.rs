//! # Command Layer
//!
//! This module contains the **business logic** of the wall. Each operation
//! lives in its own submodule as a plain function over a [`DataStore`].
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Validate input fields and normalize them for storage
//! - Assign ids, edit codes and timestamps
//! - Authorize edits by comparing edit codes
//! - Return a structured [`CmdResult`] with affected posts and messages
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: No stdout, stderr, or HTTP status codes
//! - **Argument or body parsing**: That's the client's job
//! - **Persistence details**: Keys and the recency index belong to `store`
//!
//! Failures are returned as [`WallError`](crate::error::WallError) values;
//! clients map them to exit codes or HTTP responses.
//!
//! ## Command Modules
//!
//! - [`create`]: Publish a new post
//! - [`update`]: Edit a post with its edit code
//! - [`list`]: The newest-first feed
//! - [`get`]: A single post
//! - [`seed`]: Add the welcome post to an empty wall
//!
//! [`DataStore`]: crate::store::DataStore

use crate::model::Post;
use serde::Serialize;

pub mod create;
pub mod get;
pub mod list;
pub mod seed;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_posts: Vec<Post>,
    pub listed_posts: Vec<Post>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_posts(mut self, posts: Vec<Post>) -> Self {
        self.affected_posts = posts;
        self
    }

    pub fn with_listed_posts(mut self, posts: Vec<Post>) -> Self {
        self.listed_posts = posts;
        self
    }

    /// The single post a create or update produced.
    pub fn affected_post(&self) -> Option<&Post> {
        self.affected_posts.first()
    }
}
