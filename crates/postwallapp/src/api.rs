//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every client, whether the HTTP server or the CLI.
//!
//! ## Generic Over DataStore
//!
//! `PostwallApi<S: DataStore>` is generic over the storage backend:
//! - Production: `PostwallApi<FileStore>`
//! - Ephemeral servers and tests: `PostwallApi<InMemoryStore>`
//!
//! The facade is built once at startup and shared (the server wraps it in an
//! `Arc`); nothing in the library holds a process-wide store.
//!
//! ## Testing Strategy
//!
//! API tests check that each method reaches the right command and returns the
//! expected shape. Command logic is tested in `commands/*.rs`.

use crate::commands;
use crate::error::Result;
use crate::model::{EditRequest, NewPost};
use crate::store::DataStore;

pub struct PostwallApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> PostwallApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list_posts(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn get_post(&self, id: &str) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn create_post(&self, new_post: NewPost) -> Result<commands::CmdResult> {
        commands::create::run(&self.store, new_post)
    }

    pub fn update_post(&self, id: &str, request: EditRequest) -> Result<commands::CmdResult> {
        commands::update::run(&self.store, id, request)
    }

    pub fn seed_default_post(&self) -> Result<commands::CmdResult> {
        commands::seed::run(&self.store)
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WallError;
    use crate::model::PostPatch;
    use crate::store::memory::InMemoryStore;
    use crate::test_utils::TestEnv;

    fn new_post(content: &str) -> NewPost {
        NewPost {
            alias: "Bob".into(),
            avatar: "🏂".into(),
            content: content.into(),
            edit_id: None,
        }
    }

    #[test]
    fn create_then_list_and_get() {
        let api = PostwallApi::new(InMemoryStore::new());
        let created = api.create_post(new_post("hi")).unwrap();
        let id = created.affected_post().unwrap().id.clone();

        assert_eq!(api.list_posts().unwrap().listed_posts.len(), 1);
        assert_eq!(api.get_post(&id).unwrap().listed_posts[0].content, "hi");
    }

    #[test]
    fn update_dispatches_to_command() {
        let api = PostwallApi::new(InMemoryStore::new());
        let created = api.create_post(new_post("hi")).unwrap();
        let post = created.affected_post().unwrap();

        let request = EditRequest::new(
            post.edit_id.clone(),
            PostPatch::default().with_content("edited"),
        );
        let updated = api.update_post(&post.id, request).unwrap();
        assert_eq!(updated.affected_post().unwrap().content, "edited");
    }

    #[test]
    fn errors_pass_through() {
        let api = PostwallApi::new(InMemoryStore::new());
        let err = api.get_post("missing").unwrap_err();
        assert!(matches!(err, WallError::NotFound(_)));
    }

    #[test]
    fn seed_only_fills_an_empty_wall() {
        let api = PostwallApi::new(InMemoryStore::new());
        assert_eq!(api.seed_default_post().unwrap().affected_posts.len(), 1);
        assert!(api.seed_default_post().unwrap().affected_posts.is_empty());
    }

    #[test]
    fn file_backed_api_persists_across_instances() {
        let env = TestEnv::new();
        let post = env
            .api()
            .create_post(new_post("kept on disk"))
            .unwrap()
            .affected_posts
            .remove(0);

        let reopened = env.api();
        let listed = reopened.list_posts().unwrap().listed_posts;
        assert_eq!(listed, vec![post]);
    }
}
