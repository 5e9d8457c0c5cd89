use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::ids::{generate_edit_id, generate_post_id};
use crate::model::Post;
use crate::store::DataStore;
use tracing::info;

pub const DEFAULT_ALIAS: &str = "MexicanSnowboarder";
pub const DEFAULT_AVATAR: &str = "🏂";
pub const DEFAULT_CONTENT: &str = "Just hit the slopes! Fresh powder today! 🏔️";

/// Puts the welcome post on an empty wall. A wall that already has posts is
/// left alone.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let existing = store.list_posts()?;
    let mut result = CmdResult::default();

    if !existing.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Found {} existing posts, skipping default post creation",
            existing.len()
        )));
        return Ok(result);
    }

    let post = Post::new(
        generate_post_id(),
        DEFAULT_ALIAS.to_string(),
        DEFAULT_AVATAR.to_string(),
        DEFAULT_CONTENT.to_string(),
        generate_edit_id(),
    );
    let saved = store.set_post(&post)?;
    info!(post_id = %saved.id, "created default post");

    result.add_message(CmdMessage::success(format!(
        "Created default post: {}",
        DEFAULT_ALIAS
    )));
    Ok(result.with_affected_posts(vec![saved]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::validation::{validate_alias, validate_avatar, validate_content};

    #[test]
    fn seeds_empty_wall() {
        let store = StoreFixture::new().build();
        let result = run(&store).unwrap();

        assert_eq!(result.affected_posts.len(), 1);
        let listed = store.list_posts().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].alias, DEFAULT_ALIAS);
    }

    #[test]
    fn leaves_populated_wall_alone() {
        let store = StoreFixture::new().with_posts(2).build();
        let result = run(&store).unwrap();

        assert!(result.affected_posts.is_empty());
        assert!(result.messages[0].content.contains("2 existing posts"));
        assert_eq!(store.list_posts().unwrap().len(), 2);
    }

    #[test]
    fn seeding_twice_creates_one_post() {
        let store = StoreFixture::new().build();
        run(&store).unwrap();
        run(&store).unwrap();
        assert_eq!(store.list_posts().unwrap().len(), 1);
    }

    #[test]
    fn default_post_passes_validation() {
        assert!(validate_alias(DEFAULT_ALIAS).is_ok());
        assert!(validate_avatar(DEFAULT_AVATAR).is_ok());
        assert!(validate_content(DEFAULT_CONTENT).is_ok());
    }
}
