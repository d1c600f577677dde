//! # Command Layer
//!
//! This module contains the **record lifecycle logic**. Each operation lives in its
//! own submodule as a plain function over a [`Datastore`](crate::datastore::Datastore)
//! and a [`KeyFactory`](crate::model::KeyFactory).
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: No stdout, stderr, or terminal concerns
//! - **Line parsing**: That's the dispatcher's job ([`crate::dispatch`])
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Command Modules
//!
//! - [`add`]: Allocate an id and store a new task
//! - [`done`]: Mark a task done inside a transaction
//! - [`list`]: Query all tasks in creation order
//! - [`delete`]: Remove a task, idempotently
//!
//! ## Structured Returns
//!
//! The dispatcher wraps command outcomes in [`CmdResult`]: a list of leveled
//! messages, the records touched, and for listings the formatted rows. Front ends
//! decide how to render it.

use crate::model::Person;
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod done;
pub mod list;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct CmdResult {
    pub affected_tasks: Vec<Person>,
    /// Formatted rows, present only when the command was a listing.
    pub listed_tasks: Option<Vec<String>>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_tasks(mut self, rows: Vec<String>) -> Self {
        self.listed_tasks = Some(rows);
        self
    }
}
