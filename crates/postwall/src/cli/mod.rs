//! # CLI Behavior
//!
//! This is **one client** of the wall, next to the HTTP server. It is the only
//! place that knows about terminal output and exit codes.
//!
//! ### Naked Execution (`postwall`)
//!
//! Running `postwall` with no arguments lists the feed, same as `postwall list`.
//!
//! ### Edit Codes
//!
//! `postwall post` prints the edit code of the new post once. Nothing prints it
//! again except `list --json` and `view`, which show the stored record.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context setup and per-command handlers
//! - `print`: Terminal rendering (colors, relative times, truncation)

mod commands;
mod print;
pub mod setup;

pub use commands::run;
