use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WallError};
use crate::model::{now_millis, EditRequest, Post};
use crate::store::DataStore;
use crate::validation::{
    validate_alias, validate_avatar, validate_content, validate_post_id,
    validate_required_edit_id, ValidationError,
};
use tracing::{debug, info};

/// Edits a post on behalf of whoever knows its edit code.
///
/// Order matters: the id and code shapes are checked first, then the post is
/// looked up (not found), then the code is compared (unauthorized), and only
/// then are the patch fields validated, alias then content then avatar, so the
/// first failing field is the one reported. Fields absent from the patch keep
/// their stored values; `id` and `edit_id` never change and `timestamp` moves
/// to the edit time.
pub fn run<S: DataStore>(store: &S, id: &str, request: EditRequest) -> Result<CmdResult> {
    validate_post_id(id)?;
    validate_required_edit_id(&request.edit_id)?;

    let existing = store
        .get_post(id)?
        .ok_or_else(|| WallError::NotFound("Post not found".to_string()))?;

    if existing.edit_id != request.edit_id {
        debug!(post_id = %id, "edit rejected: wrong edit code");
        return Err(WallError::Unauthorized("Invalid edit ID".to_string()));
    }

    let patch = request.updates;
    if patch.is_empty() {
        return Err(ValidationError::EmptyUpdate.into());
    }

    let alias = match patch.alias {
        Some(alias) => validate_alias(&alias)?,
        None => existing.alias.clone(),
    };
    let content = match patch.content {
        Some(content) => validate_content(&content)?,
        None => existing.content.clone(),
    };
    let avatar = match patch.avatar {
        Some(avatar) => validate_avatar(&avatar)?,
        None => existing.avatar.clone(),
    };

    let updated = Post {
        id: existing.id.clone(),
        alias,
        avatar,
        content,
        timestamp: now_millis().max(existing.timestamp),
        edit_id: existing.edit_id.clone(),
    };
    let saved = store.update_post(id, &updated)?;
    info!(post_id = %saved.id, "post updated");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Post updated: {}", saved.id)));
    Ok(result.with_affected_posts(vec![saved]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::model::{NewPost, PostPatch};
    use crate::store::memory::fixtures::{StoreFixture, FIXTURE_EDIT_ID};
    use crate::store::memory::InMemoryStore;
    use std::thread::sleep;
    use std::time::Duration;

    fn create_bob(store: &InMemoryStore) -> Post {
        create::run(
            store,
            NewPost {
                alias: "Bob".into(),
                avatar: "🏂".into(),
                content: "hi".into(),
                edit_id: Some("123456".into()),
            },
        )
        .unwrap()
        .affected_posts
        .remove(0)
    }

    #[test]
    fn wrong_code_is_unauthorized_and_leaves_post_unchanged() {
        let store = InMemoryStore::new();
        let post = create_bob(&store);

        let err = run(
            &store,
            &post.id,
            EditRequest::new("000000", PostPatch::default().with_content("hacked")),
        )
        .unwrap_err();

        assert!(matches!(err, WallError::Unauthorized(_)));
        assert_eq!(store.get_post(&post.id).unwrap().unwrap(), post);
    }

    #[test]
    fn correct_code_updates_only_patched_fields() {
        let store = InMemoryStore::new();
        let post = create_bob(&store);
        sleep(Duration::from_millis(5));

        let result = run(
            &store,
            &post.id,
            EditRequest::new("123456", PostPatch::default().with_content("hi there")),
        )
        .unwrap();

        let updated = result.affected_post().unwrap();
        assert_eq!(updated.content, "hi there");
        assert_eq!(updated.alias, "Bob");
        assert_eq!(updated.avatar, "🏂");
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.edit_id, "123456");
        assert!(updated.timestamp > post.timestamp);
        assert_eq!(store.get_post(&post.id).unwrap().as_ref(), Some(updated));
    }

    #[test]
    fn id_and_code_survive_repeated_edits() {
        let store = InMemoryStore::new();
        let post = create_bob(&store);

        let mut last_timestamp = post.timestamp;
        for (i, alias) in ["Bobby", "Robert", "Rob"].iter().enumerate() {
            let patch = PostPatch::default()
                .with_alias(*alias)
                .with_content(format!("edit {}", i));
            let updated = run(&store, &post.id, EditRequest::new("123456", patch))
                .unwrap()
                .affected_posts
                .remove(0);
            assert_eq!(updated.id, post.id);
            assert_eq!(updated.edit_id, post.edit_id);
            assert!(updated.timestamp >= last_timestamp);
            last_timestamp = updated.timestamp;
        }

        let stored = store.get_post(&post.id).unwrap().unwrap();
        assert_eq!(stored.alias, "Rob");
        assert_eq!(store.list_posts().unwrap().len(), 1);
    }

    #[test]
    fn timestamp_never_moves_backwards() {
        let far_future = now_millis() + 60_000;
        let store = StoreFixture::new()
            .with_post("future1", "Bob", "from the future", far_future)
            .build();

        let updated = run(
            &store,
            "future1",
            EditRequest::new(FIXTURE_EDIT_ID, PostPatch::default().with_content("now")),
        )
        .unwrap()
        .affected_posts
        .remove(0);
        assert_eq!(updated.timestamp, far_future);
    }

    #[test]
    fn edit_moves_post_to_top_of_feed() {
        let store = StoreFixture::new().with_posts(3).build();
        run(
            &store,
            "post1",
            EditRequest::new(FIXTURE_EDIT_ID, PostPatch::default().with_alias("Top")),
        )
        .unwrap();

        assert_eq!(store.list_posts().unwrap()[0].id, "post1");
    }

    #[test]
    fn unknown_post_is_not_found() {
        let store = InMemoryStore::new();
        let err = run(
            &store,
            "doesnotexist",
            EditRequest::new("123456", PostPatch::default().with_content("x")),
        )
        .unwrap_err();
        assert!(matches!(err, WallError::NotFound(_)));
    }

    #[test]
    fn malformed_id_and_code_are_validation_errors() {
        let store = StoreFixture::new().with_posts(1).build();
        let patch = PostPatch::default().with_content("x");

        let err = run(&store, "bad-id", EditRequest::new("123456", patch.clone())).unwrap_err();
        assert_eq!(err.field(), Some("id"));

        let err = run(&store, "post1", EditRequest::new("", patch.clone())).unwrap_err();
        assert!(matches!(
            err,
            WallError::Validation(ValidationError::EditIdRequired)
        ));

        let err = run(&store, "post1", EditRequest::new("12345", patch)).unwrap_err();
        assert!(matches!(
            err,
            WallError::Validation(ValidationError::EditIdInvalid)
        ));
    }

    #[test]
    fn empty_patch_is_rejected() {
        let store = StoreFixture::new().with_posts(1).build();
        let err = run(
            &store,
            "post1",
            EditRequest::new(FIXTURE_EDIT_ID, PostPatch::default()),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("updates"));
    }

    #[test]
    fn invalid_patch_field_leaves_post_unchanged() {
        let store = StoreFixture::new().with_posts(1).build();
        let before = store.get_post("post1").unwrap().unwrap();

        let patch = PostPatch::default()
            .with_content("fine")
            .with_avatar("not an avatar");
        let err = run(&store, "post1", EditRequest::new(FIXTURE_EDIT_ID, patch)).unwrap_err();

        assert_eq!(err.field(), Some("avatar"));
        assert_eq!(store.get_post("post1").unwrap().unwrap(), before);
    }

    #[test]
    fn content_error_reported_before_avatar_error() {
        let store = StoreFixture::new().with_posts(1).build();
        let before = store.get_post("post1").unwrap().unwrap();

        let patch = PostPatch::default()
            .with_content("")
            .with_avatar("nope");
        let err = run(&store, "post1", EditRequest::new(FIXTURE_EDIT_ID, patch)).unwrap_err();

        assert_eq!(err.field(), Some("content"));
        assert_eq!(store.get_post("post1").unwrap().unwrap(), before);
    }

    #[test]
    fn authorization_is_checked_before_field_validation() {
        let store = StoreFixture::new().with_posts(1).build();
        let patch = PostPatch::default().with_alias("bad!alias");
        let err = run(&store, "post1", EditRequest::new("999999", patch)).unwrap_err();
        assert!(matches!(err, WallError::Unauthorized(_)));
    }
}
