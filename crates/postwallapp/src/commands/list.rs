use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let posts = store.list_posts()?;
    Ok(CmdResult::default().with_listed_posts(posts))
}
