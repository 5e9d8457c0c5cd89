//! # Postwall Architecture
//!
//! Postwall is a **UI-agnostic posting wall library**. Users publish short posts
//! under an alias and avatar, and may later edit a post by presenting the secret
//! edit code handed out when it was created. The HTTP server and the CLI in the
//! `postwall` crate are thin clients of this library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clients (postwall crate: cli/, server/)                    │
//! │  - Parse arguments or HTTP requests, render output          │
//! │  - The ONLY place that knows about stdout or status codes   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Constructed explicitly and handed to each client         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, edit-code authorization, field merging       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait, PostStore over a KvBackend              │
//! │  - MemBackend (tests, ephemeral), FsBackend (durable)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage Invariant
//!
//! Every post lives under its own key and its id appears exactly once in the
//! recency index (`postIds`, newest first). See [`store`] for the layout.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Key-value backends and the post store built on them
//! - [`model`]: `Post` and the request shapes
//! - [`validation`]: Field rules for aliases, avatars, content and codes
//! - [`ids`]: Post id and edit code generation
//! - [`config`]: Layered configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod store;
pub mod validation;

#[cfg(test)]
pub mod test_utils;
