//! # CLI Layer
//!
//! The CLI layer is the **only** place in the binary that:
//! - Parses shell arguments
//! - Writes human-oriented output to stdout
//! - Installs the tracing subscriber
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: `setup::Cli` via clap
//! 2. **Context Setup**: Load `PostwallConfig`, apply flag overrides, open the store
//! 3. **API Dispatch**: Call the matching `PostwallApi` method
//! 4. **Output Formatting**: Render `CmdResult` through `print`
//!
//! Errors bubble up as `anyhow::Error`; `main` prints them and exits with 1.

use super::print::{print_full_post, print_messages, print_posts};
use super::setup::{Cli, Commands};
use crate::server;
use anyhow::Context;
use clap::Parser;
use postwallapp::api::PostwallApi;
use postwallapp::config::{BackendKind, PostwallConfig};
use postwallapp::model::{EditRequest, NewPost, PostPatch};
use postwallapp::store::fs::FileStore;
use postwallapp::store::memory::InMemoryStore;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: PostwallApi<FileStore>,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let serving = matches!(cli.command, Some(Commands::Serve { .. }));
    init_tracing(cli.verbose, serving);

    let config = load_config(cli.data_dir.clone())?;

    match cli.command {
        Some(Commands::Serve { bind, memory }) => handle_serve(config, bind, memory),
        Some(Commands::List { json }) => handle_list(&init_context(&config)?, json),
        Some(Commands::View { id }) => handle_view(&init_context(&config)?, &id),
        Some(Commands::Post {
            alias,
            avatar,
            edit_code,
            content,
        }) => handle_post(
            &init_context(&config)?,
            NewPost {
                alias,
                avatar,
                content: content.join(" "),
                edit_id: edit_code,
            },
        ),
        Some(Commands::Edit {
            id,
            code,
            alias,
            avatar,
            content,
        }) => handle_edit(
            &init_context(&config)?,
            &id,
            EditRequest::new(
                code,
                PostPatch {
                    alias,
                    avatar,
                    content,
                },
            ),
        ),
        None => handle_list(&init_context(&config)?, false),
    }
}

/// Logs go to stderr. The server logs at info by default; one-shot commands
/// stay quiet unless `-v` or `RUST_LOG` asks for more.
fn init_tracing(verbose: bool, serving: bool) {
    let fallback = match (verbose, serving) {
        (true, _) => "postwall=debug,postwallapp=debug,tower_http=debug",
        (false, true) => "postwall=info,postwallapp=info,tower_http=debug",
        (false, false) => "postwall=warn,postwallapp=warn",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(data_dir: Option<PathBuf>) -> anyhow::Result<PostwallConfig> {
    let file = PostwallConfig::default_file();
    let mut config =
        PostwallConfig::load(file.as_deref()).context("failed to load configuration")?;
    if data_dir.is_some() {
        config.data_dir = data_dir;
    }
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// One-shot commands always use the file store, whatever `backend` says.
fn init_context(config: &PostwallConfig) -> anyhow::Result<AppContext> {
    let root = config.data_dir()?;
    debug!(data_dir = %root.display(), "opening file store");
    Ok(AppContext {
        api: PostwallApi::new(FileStore::new(root)),
    })
}

fn handle_serve(
    mut config: PostwallConfig,
    bind: Option<String>,
    memory: bool,
) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        config.bind = bind;
    }
    let backend = if memory {
        BackendKind::Memory
    } else {
        config.backend_kind()?
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match backend {
        BackendKind::Memory => {
            info!("Using in-memory store; posts are lost on exit");
            runtime.block_on(server::serve(
                PostwallApi::new(InMemoryStore::new()),
                &config,
            ))
        }
        BackendKind::Fs => {
            let root = config.data_dir()?;
            info!("Posts stored in: {}", root.display());
            runtime.block_on(server::serve(PostwallApi::new(FileStore::new(root)), &config))
        }
    }
}

fn handle_list(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let result = ctx.api.list_posts()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result.listed_posts)?);
    } else {
        print_posts(&result.listed_posts);
    }
    Ok(())
}

fn handle_view(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let result = ctx.api.get_post(id)?;
    for post in &result.listed_posts {
        print_full_post(post);
    }
    Ok(())
}

fn handle_post(ctx: &AppContext, new_post: NewPost) -> anyhow::Result<()> {
    let result = ctx.api.create_post(new_post)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &AppContext, id: &str, request: EditRequest) -> anyhow::Result<()> {
    let result = ctx.api.update_post(id, request)?;
    print_messages(&result.messages);
    Ok(())
}
