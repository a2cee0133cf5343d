use std::io::Write;

use crate::error::ShellError;
use crate::jobs::JobTable;
use crate::report;

/// Commands handled inside the interpreter process, without spawning.
/// Only the sole stage of an unpiped line is checked against this list;
/// the same word inside a pipeline goes through normal program lookup.
const BUILTINS: &[&str] = &["cd", "pwd", "exit"];

/// What the interpreter loop should do after a builtin ran.
#[derive(Debug)]
pub enum BuiltinOutcome {
    /// The builtin finished with this exit code; report completion as for
    /// any other command.
    Code(i32),
    /// `exit` was accepted; it has already printed its farewell and
    /// completion line, and the loop should terminate with success.
    Exit,
}

/// Returns true if the command name is a shell builtin.
pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Run a builtin, writing user-visible output to the provided streams.
///
/// `command` is the line as typed, used verbatim in completion output.
/// Builtins never fork; redirection and the background marker parse fine
/// on a builtin line but have no effect on it.
pub fn run(
    command: &str,
    argv: &[String],
    jobs: &JobTable,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<BuiltinOutcome, ShellError> {
    match argv[0].as_str() {
        "exit" => builtin_exit(command, jobs, stderr),
        "cd" => Ok(BuiltinOutcome::Code(builtin_cd(argv, stderr))),
        "pwd" => Ok(BuiltinOutcome::Code(builtin_pwd(stdout))),
        other => {
            let _ = writeln!(stderr, "sshell: unknown builtin: {other}");
            Ok(BuiltinOutcome::Code(1))
        }
    }
}

/// Leave the shell, unless background jobs are still pending.
fn builtin_exit(
    command: &str,
    jobs: &JobTable,
    stderr: &mut dyn Write,
) -> Result<BuiltinOutcome, ShellError> {
    if !jobs.is_empty() {
        return Err(ShellError::ActiveJobs);
    }
    let _ = writeln!(stderr, "Bye...");
    let _ = writeln!(stderr, "{}", report::format(command, &[0]));
    Ok(BuiltinOutcome::Exit)
}

/// Change the working directory of the shell process itself, so the new
/// directory is inherited by everything spawned afterwards.
fn builtin_cd(argv: &[String], stderr: &mut dyn Write) -> i32 {
    // No argument becomes the empty path, which the OS call rejects.
    let target = argv.get(1).map(String::as_str).unwrap_or("");
    if std::env::set_current_dir(target).is_err() {
        let _ = writeln!(stderr, "Error: {}", ShellError::CannotCd);
        return 1;
    }
    0
}

fn builtin_pwd(stdout: &mut dyn Write) -> i32 {
    match std::env::current_dir() {
        Ok(path) => {
            let _ = writeln!(stdout, "{}", path.display());
            0
        }
        Err(_) => 1,
    }
}
