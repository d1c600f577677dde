//! The interactive console: banner, usage, then one command per line.
//!
//! A blank line or end of input ends the session. Neither bad input nor store
//! failures end it; both are reported and the prompt comes back. Bytes that are
//! not UTF-8 are replaced, so such a line is reported like any other bad input.

use super::render::{render_error, render_result, render_welcome, EXITING, PROMPT};
use std::io::{self, BufRead, Write};
use tasklist::api::TaskListApi;
use tasklist::datastore::Datastore;
use tasklist::dispatch::handle_command_line;
use tracing::{debug, warn};

pub fn run_console<D, R, W>(api: &TaskListApi<D>, mut input: R, out: &mut W) -> io::Result<()>
where
    D: Datastore,
    R: BufRead,
    W: Write,
{
    write!(out, "{}", render_welcome())?;

    let mut buf = Vec::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            break;
        }

        let reply = match handle_command_line(api, line) {
            Ok(result) => render_result(&result),
            Err(err) if err.is_validation() => {
                debug!(error = %err, "rejected console input");
                render_error(&err)
            }
            Err(err) => {
                warn!(error = %err, "store failure in console");
                render_error(&err)
            }
        };
        write!(out, "{}", reply)?;
    }

    writeln!(out, "{}", EXITING)
}
