//! # Checkstamp Architecture
//!
//! Checkstamp appends a creation stamp (`➕ YYYY-MM-DD`) to unchecked Markdown
//! checkboxes, either retroactively over a note or a whole vault, or live as a task
//! line is finished in an editor. Like any tool of this shape it is a library first;
//! the CLI is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, cli/)                         │
//! │  - Parses arguments, draws progress, prints messages        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, supplies the clock            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - document, corpus, text, live, config                     │
//! │  - Returns CmdResult with counts and user messages          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (stamp.rs, date.rs) and collaborators                 │
//! │  - Pure stamper and date policy                             │
//! │  - DocumentStore, EditorSurface, ProgressSink traits        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; user-facing text comes back as
//! [`commands::CmdMessage`]s.
//!
//! ## Module Overview
//!
//! - [`stamp`]: Line classification and the idempotent stamper
//! - [`date`]: Which date goes into a stamp
//! - [`commands`]: The three stamping modes plus config management
//! - [`api`]: The API facade
//! - [`store`]: Document storage abstraction and implementations
//! - [`editor`]: Live editor surface and an in-memory buffer
//! - [`progress`]: Progress reporting for corpus runs
//! - [`config`]: User settings
//! - [`model`]: Document identity and timestamps
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod date;
pub mod editor;
pub mod error;
pub mod model;
pub mod progress;
pub mod stamp;
pub mod store;
