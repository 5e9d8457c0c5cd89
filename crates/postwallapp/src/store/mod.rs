//! # Storage Layer
//!
//! This module defines the storage abstraction for the wall. The [`DataStore`]
//! trait is what the command layer talks to; [`post_store::PostStore`] is its
//! only implementation, layered over any [`backend::KvBackend`].
//!
//! ## Key Layout
//!
//! ```text
//! post:{id}   -> JSON-serialized Post      (one scalar per post)
//! postIds     -> [id, id, ...]             (one list, newest first)
//! ```
//!
//! ## Index Invariant
//!
//! Every id in `postIds` has exactly one `post:{id}` record and every record
//! is listed exactly once. `set_post` only pushes an id the first time it is
//! written; `update_post` never touches the list; `delete_post` removes both.
//!
//! ## Failure Model
//!
//! - A corrupt record is skipped (and logged) by `list_posts`, never fatal.
//! - `get_post` reports backend failures as "not found" after logging them.
//! - Write failures surface as [`WallError::Store`](crate::error::WallError)
//!   with a generic message; the backend detail only goes to the log.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: `PostStore<MemBackend>`, for tests and
//!   throwaway servers.
//! - [`fs::FileStore`]: `PostStore<FsBackend>`, durable on local disk.

use crate::error::Result;
use crate::model::Post;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod post_store;

/// Key of the recency index list.
pub const POST_IDS_KEY: &str = "postIds";

/// Key of the scalar record for a post.
pub fn post_key(id: &str) -> String {
    format!("post:{}", id)
}

/// Abstract interface for post storage.
///
/// The store performs no field-level validation or merging; callers hand it
/// complete, already-validated posts.
pub trait DataStore: Send + Sync {
    /// All posts, newest `timestamp` first
    fn list_posts(&self) -> Result<Vec<Post>>;

    /// Get a post by id, `None` when unknown
    fn get_post(&self, id: &str) -> Result<Option<Post>>;

    /// Create or overwrite a post, indexing it on first write
    fn set_post(&self, post: &Post) -> Result<Post>;

    /// Overwrite an existing post without touching the index
    fn update_post(&self, id: &str, post: &Post) -> Result<Post>;

    /// Remove a post and its index entry; returns whether it existed
    fn delete_post(&self, id: &str) -> Result<bool>;

    /// Whether a record exists for `id`
    fn post_exists(&self, id: &str) -> Result<bool>;
}

/// Sorts posts newest first. Equal timestamps keep their relative order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
