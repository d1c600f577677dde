//! # Rendering
//!
//! Turns library results into terminal text. Functions return `String`s so the
//! console loop decides where they are written.
//!
//! Listing layout:
//!
//! ```text
//! found 2 tasks:
//! task ID : description
//! ---------------------
//! 1 : buy milk
//! 2 : call mom
//! ```

use colored::Colorize;
use tasklist::commands::{CmdMessage, CmdResult, MessageLevel};
use tasklist::dispatch::{LIST_HEADER, LIST_SEPARATOR, USAGE};
use tasklist::error::TaskListError;

pub const BANNER: &str = "Task List";
pub const PROMPT: &str = "> ";
pub const EXITING: &str = "exiting";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let line = match message.level {
                MessageLevel::Info => message.content.normal(),
                MessageLevel::Success => message.content.green(),
                MessageLevel::Warning => message.content.yellow(),
            };
            format!("{}\n", line)
        })
        .collect()
}

pub fn render_listing(rows: &[String]) -> String {
    let mut out = format!("{}\n{}\n", LIST_HEADER, LIST_SEPARATOR.dimmed());
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}

/// Messages first, then the listing when the command produced one.
pub fn render_result(result: &CmdResult) -> String {
    let mut out = render_messages(&result.messages);
    if let Some(rows) = &result.listed_tasks {
        out.push_str(&render_listing(rows));
    }
    out
}

/// Bad input is followed by the usage block, store failures are not.
pub fn render_error(err: &TaskListError) -> String {
    if err.is_validation() {
        format!("{}\n{}", err.to_string().red(), USAGE)
    } else {
        format!("{}\n", format!("store error: {}", err).red())
    }
}

pub fn render_welcome() -> String {
    format!("{}\n{}", BANNER.bold(), USAGE)
}
