//! # Tasklist CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/tasklist/`: the UI-agnostic library (record store, dispatcher,
//!   REST controller, datastore client)
//! - `crates/tasklist-cli/`: this binary, depends on the `tasklist` library
//!
//! ## Front Ends
//!
//! ```text
//! tasklist [shell]        interactive console on stdin/stdout (default)
//! tasklist exec <words>   run one console command and exit
//! tasklist serve          REST controller on --bind / TASKLIST_BIND
//! ```
//!
//! Everything user-facing (prompt, colors, exit codes) is decided here. The
//! library only returns `CmdResult` values and errors.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
