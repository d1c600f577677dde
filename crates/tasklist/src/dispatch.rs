//! # Command Dispatcher
//!
//! Turns one line of console input into a [`Command`] and runs it against a
//! [`TaskListApi`]. Parsing is stateless and single-shot.
//!
//! ## Grammar
//!
//! | Input | Command | Arity (incl. command word) |
//! |-------|---------|----------------------------|
//! | `new <text...>` | [`Command::New`] | rest of line, whitespace kept |
//! | `done <id>` | [`Command::Done`] | exactly 2 |
//! | `list` | [`Command::List`] | exactly 1 |
//! | `delete <id>` | [`Command::Delete`] | exactly 2 |
//!
//! Anything else is [`CommandError::Unrecognized`]. Ids must be positive integers.
//!
//! Parse failures are [`CommandError`]s, store failures surface as
//! [`StoreError`](crate::error::StoreError)s: callers tell them apart through
//! [`TaskListError`](crate::error::TaskListError).

use crate::api::TaskListApi;
use crate::commands::{CmdMessage, CmdResult};
use crate::datastore::Datastore;
use crate::error::{CommandError, Result};

pub const USAGE: &str = "Usage:

  new <description>  Adds a task with a description <description>
  done <task-id>     Marks a task as done
  list               Lists all tasks by creation time
  delete <task-id>   Deletes a task
";

pub const LIST_HEADER: &str = "task ID : description";
pub const LIST_SEPARATOR: &str = "---------------------";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New(String),
    Done(i64),
    List,
    Delete(i64),
}

pub fn parse(line: &str) -> std::result::Result<Command, CommandError> {
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some(&command) = args.first() else {
        return Err(CommandError::NotEnoughArgs);
    };

    match command {
        "new" => {
            let rest = line
                .trim_start()
                .strip_prefix(command)
                .unwrap_or_default()
                .trim_start();
            if rest.is_empty() {
                return Err(CommandError::MissingDescription);
            }
            Ok(Command::New(rest.to_string()))
        }
        "done" => {
            expect_args(&args, 2)?;
            Ok(Command::Done(parse_id(args[1])?))
        }
        "list" => {
            expect_args(&args, 1)?;
            Ok(Command::List)
        }
        "delete" => {
            expect_args(&args, 2)?;
            Ok(Command::Delete(parse_id(args[1])?))
        }
        other => Err(CommandError::Unrecognized(other.to_string())),
    }
}

fn expect_args(args: &[&str], expected: usize) -> std::result::Result<(), CommandError> {
    if args.len() != expected {
        return Err(CommandError::ArgCount {
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn parse_id(raw: &str) -> std::result::Result<i64, CommandError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CommandError::InvalidId(raw.to_string())),
    }
}

/// Parses and executes one console line.
pub fn handle_command_line<D: Datastore>(api: &TaskListApi<D>, line: &str) -> Result<CmdResult> {
    let command = parse(line)?;
    execute(api, command)
}

pub fn execute<D: Datastore>(api: &TaskListApi<D>, command: Command) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match command {
        Command::New(name) => {
            let task = api.add(&name)?;
            result.affected_tasks.push(task);
            result.add_message(CmdMessage::success("task added"));
        }
        Command::Done(id) => {
            if api.mark_done(id)? {
                result.add_message(CmdMessage::success("task marked done"));
            } else {
                result.add_message(CmdMessage::warning(format!(
                    "did not find a Task entity with ID {}",
                    id
                )));
            }
        }
        Command::List => {
            let rows = api.list_formatted()?;
            result.add_message(CmdMessage::info(format!("found {} tasks:", rows.len())));
            result = result.with_listed_tasks(rows);
        }
        Command::Delete(id) => {
            api.delete(id)?;
            result.add_message(CmdMessage::success("task deleted (if it existed)"));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::datastore::memory::InMemoryDatastore;
    use crate::error::TaskListError;
    use crate::model::fields;

    fn api() -> TaskListApi<InMemoryDatastore> {
        TaskListApi::new(InMemoryDatastore::new())
    }

    #[test]
    fn new_takes_rest_of_line_verbatim() {
        assert_eq!(
            parse("new buy milk").unwrap(),
            Command::New("buy milk".into())
        );
        assert_eq!(
            parse("  new   call  mom tonight").unwrap(),
            Command::New("call  mom tonight".into())
        );
    }

    #[test]
    fn new_without_description_fails() {
        assert_eq!(parse("new"), Err(CommandError::MissingDescription));
        assert_eq!(parse("new    "), Err(CommandError::MissingDescription));
    }

    #[test]
    fn done_and_delete_need_exactly_one_id() {
        assert_eq!(parse("done 7").unwrap(), Command::Done(7));
        assert_eq!(parse("delete 12").unwrap(), Command::Delete(12));
        assert_eq!(
            parse("done"),
            Err(CommandError::ArgCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            parse("delete 1 2"),
            Err(CommandError::ArgCount {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse("done abc"), Err(CommandError::InvalidId("abc".into())));
        assert_eq!(parse("delete 0"), Err(CommandError::InvalidId("0".into())));
        assert_eq!(parse("done -3"), Err(CommandError::InvalidId("-3".into())));
    }

    #[test]
    fn list_takes_no_arguments() {
        assert_eq!(parse("list").unwrap(), Command::List);
        assert_eq!(
            parse("list all"),
            Err(CommandError::ArgCount {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn unknown_and_empty_lines() {
        assert_eq!(
            parse("bogus"),
            Err(CommandError::Unrecognized("bogus".into()))
        );
        assert_eq!(parse("   "), Err(CommandError::NotEnoughArgs));
    }

    #[test]
    fn dispatch_new_adds_named_task() {
        let api = api();
        let result = handle_command_line(&api, "new buy milk").unwrap();

        assert_eq!(result.messages[0].content, "task added");
        assert_eq!(result.affected_tasks[0].name, "buy milk");
        let stored: Vec<_> = api.list().unwrap().collect();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].get_string(fields::NAME), Some("buy milk"));
    }

    #[test]
    fn dispatch_done_on_missing_id() {
        let result = handle_command_line(&api(), "done 7").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(
            result.messages[0].content,
            "did not find a Task entity with ID 7"
        );
    }

    #[test]
    fn dispatch_done_on_present_id() {
        let api = api();
        let id = api.add("laundry").unwrap().id.unwrap();
        let result = handle_command_line(&api, &format!("done {}", id)).unwrap();
        assert_eq!(result.messages[0].content, "task marked done");
    }

    #[test]
    fn dispatch_list_on_empty_store() {
        let result = handle_command_line(&api(), "list").unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].content, "found 0 tasks:");
        assert_eq!(result.listed_tasks, Some(vec![]));
    }

    #[test]
    fn dispatch_list_rows_follow_creation_order() {
        let api = api();
        handle_command_line(&api, "new first").unwrap();
        handle_command_line(&api, "new second").unwrap();

        let result = handle_command_line(&api, "list").unwrap();
        assert_eq!(result.messages[0].content, "found 2 tasks:");
        let rows = result.listed_tasks.unwrap();
        assert!(rows[0].ends_with(": first "));
        assert!(rows[1].ends_with(": second "));
    }

    #[test]
    fn dispatch_delete_is_idempotent() {
        let api = api();
        for _ in 0..2 {
            let result = handle_command_line(&api, "delete 3").unwrap();
            assert_eq!(result.messages[0].content, "task deleted (if it existed)");
        }
    }

    #[test]
    fn dispatch_bogus_is_a_validation_error() {
        let err = handle_command_line(&api(), "bogus").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "unrecognized command: bogus");
    }

    #[test]
    fn store_failures_are_not_validation_errors() {
        let api = api();
        api.store().backend().set_simulate_write_error(true);
        let err = handle_command_line(&api, "new x").unwrap_err();
        assert!(matches!(err, TaskListError::Store(_)));
    }
}
