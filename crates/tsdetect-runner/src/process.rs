//! Spawning the detector and relaying its combined output.
//!
//! stdout and stderr share a single pipe so the relayed lines keep the order
//! in which the detector wrote them. The run blocks until the pipe reaches
//! end-of-file and the child has exited; there is no timeout.

use std::io::{self, BufRead, BufReader, PipeReader};
use std::process::{Child, Stdio};
use std::sync::Arc;

use tracing::debug;

use crate::error::RunError;
use crate::invocation::Invocation;
use crate::runner::ToolExit;

/// Tracing target for detector process operations.
const PROCESS_TARGET: &str = "tsdetect_runner::process";

/// Runs the invocation to completion, passing each output line to `on_line`.
pub(crate) fn run_to_completion(
    invocation: &Invocation,
    mut on_line: impl FnMut(&str),
) -> Result<ToolExit, RunError> {
    let (output, mut child) = spawn_combined(invocation)?;

    debug!(
        target: PROCESS_TARGET,
        pid = child.id(),
        command = %invocation,
        "detector process started"
    );

    let lines = match relay_lines(BufReader::new(output), &mut on_line) {
        Ok(lines) => lines,
        Err(source) => {
            drop(child.kill());
            drop(child.wait());
            return Err(RunError::ReadOutput {
                source: Arc::new(source),
            });
        }
    };

    let status = child.wait().map_err(|source| RunError::Wait {
        source: Arc::new(source),
    })?;

    debug!(
        target: PROCESS_TARGET,
        ?status,
        lines,
        "detector process exited"
    );

    Ok(ToolExit::new(status.code(), lines))
}

/// Spawns the child with stdout and stderr writing into one pipe.
fn spawn_combined(invocation: &Invocation) -> Result<(PipeReader, Child), RunError> {
    let launch_error = |source: io::Error| RunError::Launch {
        program: invocation.program().to_string_lossy().into_owned(),
        source: Arc::new(source),
    };

    let (reader, writer) = io::pipe().map_err(launch_error)?;
    let stderr_writer = writer.try_clone().map_err(launch_error)?;

    let mut command = invocation.command();
    command
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(stderr_writer);

    let spawned = command.spawn();
    // The command owns the parent's copies of the write end; they must be
    // closed before reading or the pipe never reaches end-of-file.
    drop(command);

    let child = spawned.map_err(launch_error)?;
    Ok((reader, child))
}

/// Feeds each line of `reader` to `sink` in arrival order.
///
/// Lines are split on `\n`; a trailing `\r` is removed and invalid UTF-8 is
/// replaced lossily. A final line without a terminator is still delivered.
/// Returns the number of lines delivered.
///
/// # Errors
///
/// Returns the first read error; lines delivered before it are not retracted.
///
/// # Example
///
/// ```
/// use tsdetect_runner::relay_lines;
///
/// let mut seen = Vec::new();
/// let count = relay_lines(&b"first\r\nsecond\nthird"[..], |line| seen.push(line.to_owned()))
///     .expect("in-memory reads cannot fail");
/// assert_eq!(count, 3);
/// assert_eq!(seen, ["first", "second", "third"]);
/// ```
pub fn relay_lines<R, F>(mut reader: R, mut sink: F) -> io::Result<usize>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut buffer = Vec::new();
    let mut lines = 0usize;
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            return Ok(lines);
        }
        sink(&String::from_utf8_lossy(trim_line_ending(&buffer)));
        lines += 1;
    }
}

fn trim_line_ending(bytes: &[u8]) -> &[u8] {
    let without_newline = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    without_newline
        .strip_suffix(b"\r")
        .unwrap_or(without_newline)
}
