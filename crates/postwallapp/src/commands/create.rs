use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::ids::{generate_edit_id, generate_post_id};
use crate::model::{NewPost, Post};
use crate::store::DataStore;
use crate::validation::{
    validate_alias, validate_avatar, validate_content, validate_optional_edit_id,
};
use tracing::info;

/// Validates and publishes a new post.
///
/// Fields are checked in declaration order (alias, content, avatar, edit code)
/// and the first failure is returned. The edit code in the result is the only
/// time the caller gets to see it.
pub fn run<S: DataStore>(store: &S, new_post: NewPost) -> Result<CmdResult> {
    let alias = validate_alias(&new_post.alias)?;
    let content = validate_content(&new_post.content)?;
    let avatar = validate_avatar(&new_post.avatar)?;
    let edit_id = validate_optional_edit_id(new_post.edit_id.as_deref())?
        .unwrap_or_else(generate_edit_id);

    let post = Post::new(generate_post_id(), alias, avatar, content, edit_id);
    let saved = store.set_post(&post)?;
    info!(post_id = %saved.id, alias = %saved.alias, "post created");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Post created: {} (edit code: {})",
        saved.id, saved.edit_id
    )));
    Ok(result.with_affected_posts(vec![saved]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WallError;
    use crate::store::memory::InMemoryStore;
    use crate::validation::ValidationError;

    fn bob(edit_id: Option<&str>) -> NewPost {
        NewPost {
            alias: "Bob".into(),
            avatar: "🏂".into(),
            content: "hi".into(),
            edit_id: edit_id.map(String::from),
        }
    }

    #[test]
    fn creates_post_with_client_edit_id() {
        let store = InMemoryStore::new();
        let result = run(&store, bob(Some("123456"))).unwrap();

        let post = result.affected_post().unwrap();
        assert_eq!(post.edit_id, "123456");
        assert_eq!(post.alias, "Bob");
        assert_eq!(store.get_post(&post.id).unwrap().as_ref(), Some(post));
    }

    #[test]
    fn generates_edit_id_when_missing_or_blank() {
        let store = InMemoryStore::new();
        for code in [None, Some(""), Some("   ")] {
            let result = run(&store, bob(code)).unwrap();
            let post = result.affected_post().unwrap();
            assert_eq!(post.edit_id.len(), 6);
            assert!(post.edit_id.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn message_reveals_edit_code_once() {
        let store = InMemoryStore::new();
        let result = run(&store, bob(Some("654321"))).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].content.contains("654321"));
    }

    #[test]
    fn created_post_is_listed_immediately() {
        let store = InMemoryStore::new();
        let first = run(&store, bob(None)).unwrap().affected_posts.remove(0);
        let second = run(&store, bob(None)).unwrap().affected_posts.remove(0);
        assert_ne!(first.id, second.id);

        let listed = store.list_posts().unwrap();
        assert!(listed.iter().any(|p| p.id == first.id));
        assert!(listed.iter().any(|p| p.id == second.id));
    }

    #[test]
    fn stores_trimmed_fields() {
        let store = InMemoryStore::new();
        let result = run(
            &store,
            NewPost {
                alias: "  Bob ".into(),
                avatar: " 🏂 ".into(),
                content: "  hello  ".into(),
                edit_id: None,
            },
        )
        .unwrap();
        let post = result.affected_post().unwrap();
        assert_eq!(post.alias, "Bob");
        assert_eq!(post.avatar, "🏂");
        assert_eq!(post.content, "hello");
    }

    #[test]
    fn content_boundary() {
        let store = InMemoryStore::new();
        let mut ok = bob(None);
        ok.content = "x".repeat(300);
        assert!(run(&store, ok).is_ok());

        let mut too_long = bob(None);
        too_long.content = "x".repeat(301);
        let err = run(&store, too_long).unwrap_err();
        assert!(matches!(
            err,
            WallError::Validation(ValidationError::ContentTooLong)
        ));
    }

    #[test]
    fn alias_rules() {
        let store = InMemoryStore::new();
        let mut long = bob(None);
        long.alias = "a".repeat(51);
        assert_eq!(run(&store, long).unwrap_err().field(), Some("alias"));

        let mut bang = bob(None);
        bang.alias = "abc!".into();
        assert_eq!(run(&store, bang).unwrap_err().field(), Some("alias"));

        let mut fine = bob(None);
        fine.alias = "abc-123 DEF".into();
        assert!(run(&store, fine).is_ok());
    }

    #[test]
    fn first_invalid_field_in_order_wins() {
        let store = InMemoryStore::new();
        let all_bad = NewPost {
            alias: "".into(),
            avatar: "nope".into(),
            content: "".into(),
            edit_id: Some("1".into()),
        };
        assert_eq!(run(&store, all_bad).unwrap_err().field(), Some("alias"));

        let content_and_avatar_bad = NewPost {
            alias: "Bob".into(),
            avatar: "nope".into(),
            content: "".into(),
            edit_id: None,
        };
        assert_eq!(
            run(&store, content_and_avatar_bad).unwrap_err().field(),
            Some("content")
        );

        let avatar_and_code_bad = NewPost {
            alias: "Bob".into(),
            avatar: "nope".into(),
            content: "hi".into(),
            edit_id: Some("12".into()),
        };
        assert_eq!(
            run(&store, avatar_and_code_bad).unwrap_err().field(),
            Some("avatar")
        );
    }

    #[test]
    fn rejects_malformed_client_edit_id() {
        let store = InMemoryStore::new();
        let err = run(&store, bob(Some("12ab56"))).unwrap_err();
        assert_eq!(err.field(), Some("editId"));
        assert!(store.list_posts().unwrap().is_empty());
    }

    #[test]
    fn store_failure_propagates() {
        let store = InMemoryStore::new();
        store.backend().set_simulate_write_error(true);
        let err = run(&store, bob(None)).unwrap_err();
        assert!(matches!(err, WallError::Store(_)));
    }
}
