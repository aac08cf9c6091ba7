//! Helpers for running external programs to completion.

use std::io::Write;
use std::process::{Command, ExitStatus, Output, Stdio};
use std::thread;

use tracing::{debug, trace};

use crate::errors::Error;
use crate::models::ToolOutput;

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;

/// Describes a command for logs and errors: the program plus its first
/// argument, which is the subcommand for `git`.
pub(crate) fn describe(command: &Command) -> String {
    let program = command.get_program().to_string_lossy().into_owned();
    match command.get_args().next() {
        Some(arg) => format!("{} {}", program, arg.to_string_lossy()),
        None => program,
    }
}

fn status_text(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status: {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn spawn_error(command: &Command, source: std::io::Error) -> Error {
    Error::SpawnFailed {
        program: command.get_program().to_string_lossy().into_owned(),
        source,
    }
}

fn into_tool_output(output: Output) -> ToolOutput {
    ToolOutput {
        success: output.status.success(),
        status: status_text(&output.status),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Runs `command`, capturing stdout and stderr, and waits for it to exit.
pub(crate) fn run(command: &mut Command) -> Result<ToolOutput, Error> {
    debug!(command = %describe(command), "running");
    let output = command
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(command, e))?;
    let output = into_tool_output(output);
    trace!(status = %output.status, "finished");
    Ok(output)
}

/// Runs `command` and returns its raw stdout, failing on a non-zero exit.
pub(crate) fn run_for_bytes(command: &mut Command) -> Result<Vec<u8>, Error> {
    debug!(command = %describe(command), "running");
    let output = command
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(command, e))?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            program: describe(command),
            status: status_text(&output.status),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output.stdout)
}

/// Runs `command` and returns its stdout as text, failing on a non-zero exit.
pub(crate) fn run_for_text(command: &mut Command) -> Result<String, Error> {
    let stdout = run_for_bytes(command)?;
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

/// Runs `command` while a writer thread feeds `input` to its stdin.
///
/// The output pipes are drained by the calling thread, so a program that
/// writes a lot before consuming all of its input cannot deadlock.
pub(crate) fn run_with_input(command: &mut Command, input: String) -> Result<ToolOutput, Error> {
    debug!(command = %describe(command), bytes = input.len(), "running with input");
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(command, e))?;

    let writer = child.stdin.take().map(|mut stdin| {
        thread::spawn(move || -> std::io::Result<()> {
            stdin.write_all(input.as_bytes())?;
            stdin.flush()
        })
    });

    let output = child.wait_with_output()?;
    if let Some(writer) = writer {
        match writer.join() {
            Ok(result) => result?,
            Err(_) => {
                return Err(Error::Io(std::io::Error::other(
                    "stdin writer thread panicked",
                )))
            }
        }
    }
    Ok(into_tool_output(output))
}
