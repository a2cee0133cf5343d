use std::io;

use thiserror::Error;

/// Everything that can go wrong while interpreting one command line.
///
/// Each variant's display text is the exact message printed to the user,
/// behind an `Error: ` prefix added by [`ShellError::report`]. Syntax
/// errors are caught before any process is created; launch errors surface
/// after parsing succeeds. [`ShellError::Fatal`] is different in kind:
/// it means the interpreter itself can no longer make progress (a pipe
/// could not be created, a wait failed) and the main loop terminates.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Input line exceeds the fixed command-line capacity.
    #[error("command line too long")]
    LineTooLong,
    /// `&` appears anywhere other than the very end of the line, or on a
    /// multi-stage pipeline.
    #[error("mislocated background sign")]
    MislocatedBackground,
    /// A stage between pipe delimiters has no tokens.
    #[error("missing command")]
    MissingCommand,
    /// A redirection operator with nothing after it.
    #[error("no output file")]
    NoOutputFile,
    /// Output redirection on a stage that is not the final one.
    #[error("mislocated output redirection")]
    MislocatedRedirection,
    /// More pipeline stages than the shell supports.
    #[error("too many pipeline stages")]
    TooManyStages,
    /// A single stage with more tokens than the argument vector holds.
    #[error("too many process arguments")]
    TooManyArgs,
    /// `exit` refused because background jobs are still pending.
    #[error("active jobs still running")]
    ActiveJobs,
    /// `cd` target missing or not a directory.
    #[error("cannot cd into directory")]
    CannotCd,
    /// Redirection target could not be opened for writing.
    #[error("cannot open output file")]
    CannotOpenOutput,
    /// Program lookup or launch failed for a pipeline stage.
    #[error("command not found")]
    CommandNotFound,
    /// Interpreter-level failure: pipe creation or wait went wrong.
    #[error(transparent)]
    Fatal(#[from] io::Error),
}

impl ShellError {
    /// Print this diagnostic to standard error in the `Error: <text>` form
    /// every non-fatal shell message uses.
    pub fn report(&self) {
        eprintln!("Error: {}", self);
    }

    /// True when the interpreter should stop instead of prompting again.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Fatal(_))
    }
}
