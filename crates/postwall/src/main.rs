//! # Postwall Binary
//!
//! The binary is intentionally thin: it calls `cli::run()` and turns an error
//! into `Error: ...` on stderr with exit code 1. Everything it does is a client
//! of the `postwallapp` library.
//!
//! ## Workspace Structure
//!
//! - `crates/postwallapp/`: UI-agnostic core (store, commands, API facade)
//! - `crates/postwall/`: this binary, with two clients of that core
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │  cli/                        │   │  server/                     │
//! │  clap parsing, terminal      │   │  axum routes, JSON envelope, │
//! │  rendering, config wiring    │   │  status codes, CORS, tracing │
//! └──────────────────────────────┘   └──────────────────────────────┘
//!                 │                                 │
//!                 └────────────────┬────────────────┘
//!                                  ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  PostwallApi<S: DataStore>  (crates/postwallapp/src/api.rs)     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Local commands (`list`, `view`, `post`, `edit`) work directly on the data
//! directory, so they see the same posts a running `serve` with the `fs`
//! backend does.
//!
//! ## Logging
//!
//! Logs go to stderr through `tracing-subscriber`; `RUST_LOG` overrides the
//! default filter and `-v` turns on debug output.

mod cli;
mod server;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
