//! # CLI Behavior
//!
//! This is **one possible UI client** for tasklist, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ### Naked Execution (`tasklist`)
//!
//! Running `tasklist` with no subcommand starts the console, printing the
//! banner and usage, then reading one command per line until a blank line or
//! end of input.
//!
//! ### Backend Selection
//!
//! `--memory` forces a throwaway in-memory store. Otherwise the configured
//! backend is used (`file` by default, under `--data-dir` or the OS data dir).
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-subcommand entry points
//! - `console`: The interactive read-dispatch-print loop
//! - `render`: Output formatting (colors, listing layout)
//! - `setup`: Argument parsing via clap

mod commands;
mod console;
mod render;
pub mod setup;

pub use commands::run;
