use super::mem_backend::MemBackend;
use super::post_store::PostStore;

pub type InMemoryStore = PostStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        PostStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Post;
    use crate::store::DataStore;

    pub const FIXTURE_EDIT_ID: &str = "123456";

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` posts with ids `post1..postN`, oldest first.
        pub fn with_posts(self, count: usize) -> Self {
            for i in 0..count {
                let n = i + 1;
                self.store
                    .set_post(&Post {
                        id: format!("post{}", n),
                        alias: format!("Poster {}", n),
                        avatar: "🏂".to_string(),
                        content: format!("Content for post {}", n),
                        timestamp: 1_000 * n as i64,
                        edit_id: FIXTURE_EDIT_ID.to_string(),
                    })
                    .unwrap();
            }
            self
        }

        pub fn with_post(self, id: &str, alias: &str, content: &str, timestamp: i64) -> Self {
            self.store
                .set_post(&Post {
                    id: id.to_string(),
                    alias: alias.to_string(),
                    avatar: "🏂".to_string(),
                    content: content.to_string(),
                    timestamp,
                    edit_id: FIXTURE_EDIT_ID.to_string(),
                })
                .unwrap();
            self
        }

        pub fn build(self) -> InMemoryStore {
            self.store
        }
    }
}
