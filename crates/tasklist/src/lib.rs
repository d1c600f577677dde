//! # Tasklist Architecture
//!
//! Tasklist is a **UI-agnostic record store** for named tasks. Two front ends, a
//! line-oriented console and a small REST controller, sit on top of the same
//! library and the same injected document-store client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Front Ends                                                 │
//! │  - dispatch.rs: one console line → Command → CmdResult      │
//! │  - http.rs: axum routes over Arc<TaskListApi>               │
//! │  - the `tasklist` binary owns stdin/stdout and exit codes   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - TaskListApi: add, mark_done, list, delete, format_tasks  │
//! │  - Holds the Datastore handle and a KeyFactory, nothing else│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One file per operation, generic over Datastore           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (datastore/)                                 │
//! │  - Datastore trait: keys, entities, queries, transactions   │
//! │  - FileDatastore (production), InMemoryDatastore (testing)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code returns [`error::Result`] values, never prints and
//! never exits. Diagnostics go through `tracing`; the binary decides where they end
//! up (see [`logging`]).
//!
//! ## Errors
//!
//! [`error::TaskListError`] separates bad input ([`error::CommandError`]) from
//! store failures ([`error::StoreError`]). The console keeps going after either;
//! the REST controller maps them to 4xx and 5xx responses.
//!
//! ## Module Overview
//!
//! - [`api`]: The record store facade
//! - [`commands`]: Logic for each operation
//! - [`datastore`]: Document-store client trait and implementations
//! - [`dispatch`]: Console command parsing and execution
//! - [`format`]: `"<id> : <name> "` rendering
//! - [`http`]: REST controller
//! - [`model`]: Keys, entities, and the `Person` record
//! - [`config`]: Configuration management
//! - [`logging`]: Subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod http;
pub mod logging;
pub mod model;
