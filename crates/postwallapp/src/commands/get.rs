use crate::commands::CmdResult;
use crate::error::{Result, WallError};
use crate::store::DataStore;
use crate::validation::validate_post_id;

pub fn run<S: DataStore>(store: &S, id: &str) -> Result<CmdResult> {
    validate_post_id(id)?;
    let post = store
        .get_post(id)?
        .ok_or_else(|| WallError::NotFound("Post not found".to_string()))?;
    Ok(CmdResult::default().with_listed_posts(vec![post]))
}
