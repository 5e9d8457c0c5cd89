use super::backend::KvBackend;
use super::{post_key, sort_newest_first, DataStore, POST_IDS_KEY};
use crate::error::{Result, WallError};
use crate::model::Post;
use tracing::{debug, error, warn};

pub struct PostStore<B: KvBackend> {
    /// The underlying key-value backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: KvBackend> PostStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read_post(&self, id: &str) -> Result<Option<Post>> {
        let Some(raw) = self.backend.get(&post_key(id))? else {
            return Ok(None);
        };
        let post = serde_json::from_str(&raw)?;
        Ok(Some(post))
    }
}

impl<B: KvBackend> DataStore for PostStore<B> {
    fn list_posts(&self) -> Result<Vec<Post>> {
        let ids = self.backend.range(POST_IDS_KEY, 0, -1).map_err(|e| {
            error!(error = %e, "failed to read post index");
            WallError::Store("Failed to retrieve posts".to_string())
        })?;

        let mut posts = Vec::with_capacity(ids.len());
        for id in &ids {
            let raw = self.backend.get(&post_key(id)).map_err(|e| {
                error!(post_id = %id, error = %e, "failed to read post");
                WallError::Store("Failed to retrieve posts".to_string())
            })?;

            // An index entry without a record is skipped; a corrupt record is
            // skipped and logged so one bad post cannot take down the feed.
            let Some(raw) = raw else { continue };
            match serde_json::from_str::<Post>(&raw) {
                Ok(post) => posts.push(post),
                Err(e) => warn!(post_id = %id, error = %e, "skipping unreadable post"),
            }
        }

        sort_newest_first(&mut posts);
        Ok(posts)
    }

    fn get_post(&self, id: &str) -> Result<Option<Post>> {
        match self.read_post(id) {
            Ok(post) => Ok(post),
            Err(e) => {
                error!(post_id = %id, error = %e, "failed to get post");
                Ok(None)
            }
        }
    }

    fn set_post(&self, post: &Post) -> Result<Post> {
        let key = post_key(&post.id);
        let failed = |e: WallError| {
            error!(post_id = %post.id, error = %e, "failed to save post");
            WallError::Store("Failed to save post".to_string())
        };

        let is_new = !self.backend.exists(&key).map_err(failed)?;
        let raw = serde_json::to_string(post).map_err(|e| failed(e.into()))?;
        self.backend.set(&key, &raw).map_err(failed)?;

        if is_new {
            if let Err(e) = self
                .backend
                .push_front(POST_IDS_KEY, std::slice::from_ref(&post.id))
            {
                // A record must never outlive a failed index write.
                if let Err(cleanup) = self.backend.delete(&key) {
                    error!(
                        post_id = %post.id,
                        error = %cleanup,
                        "failed to remove unindexed post record"
                    );
                }
                return Err(failed(e));
            }
        }

        debug!(post_id = %post.id, "post saved");
        Ok(post.clone())
    }

    fn update_post(&self, id: &str, post: &Post) -> Result<Post> {
        let write = || -> Result<()> {
            self.backend.set(&post_key(id), &serde_json::to_string(post)?)
        };

        write().map_err(|e| {
            error!(post_id = %id, error = %e, "failed to update post");
            WallError::Store("Failed to update post".to_string())
        })?;
        debug!(post_id = %id, "post updated");
        Ok(post.clone())
    }

    fn delete_post(&self, id: &str) -> Result<bool> {
        if self.get_post(id)?.is_none() {
            return Ok(false);
        }

        if let Err(e) = self.backend.delete(&post_key(id)) {
            error!(post_id = %id, error = %e, "failed to delete post");
            return Ok(false);
        }

        // The record is gone; a leftover index entry is a store failure, not "absent".
        if let Err(e) = self.backend.remove_one(POST_IDS_KEY, id) {
            error!(post_id = %id, error = %e, "post deleted but index entry left behind");
            return Err(WallError::Store("Failed to delete post".to_string()));
        }

        debug!(post_id = %id, "post deleted");
        Ok(true)
    }

    fn post_exists(&self, id: &str) -> Result<bool> {
        match self.backend.exists(&post_key(id)) {
            Ok(exists) => Ok(exists),
            Err(e) => {
                error!(post_id = %id, error = %e, "failed to check post");
                Ok(false)
            }
        }
    }
}
