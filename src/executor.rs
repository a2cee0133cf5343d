use std::fs::{File, OpenOptions};
use std::io;
use std::process::{Child, Command};

use crate::ast::{Pipeline, PipelineStage, Redirect, RedirectMode};
use crate::builtins::{self, BuiltinOutcome};
use crate::error::ShellError;
use crate::jobs::JobTable;
use crate::parser;
use crate::status;

/// What one interpreted line means for the prompt loop.
#[derive(Debug)]
pub enum LineOutcome {
    /// The line ran to completion in the foreground (or as a builtin);
    /// one exit code per pipeline stage, in stage order.
    Completed(Vec<i32>),
    /// The line went to the background; its completion line comes later,
    /// from a job sweep.
    Backgrounded,
    /// `exit` was accepted; the interpreter should terminate.
    Exit,
}

/// One interpreter session: the job registry plus the per-line dispatch
/// that parses, launches, and waits. The main loop owns exactly one.
pub struct Session {
    jobs: JobTable,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self { jobs: JobTable::new() }
    }

    /// Poll the job registry once, reporting and dropping finished jobs.
    pub fn sweep_jobs(&mut self) {
        self.jobs.sweep();
    }

    /// Interpret one normalized, non-empty command line.
    ///
    /// Syntax errors surface before any process exists; launch failures
    /// after parsing become exit codes in the returned outcome. The only
    /// `Err` values that escape a parsed line are the line-level
    /// redirection-open failure and fatal pipe/wait errors.
    pub fn interpret(&mut self, line: &str) -> Result<LineOutcome, ShellError> {
        let pipeline = parser::parse_line(line)?;

        // Builtins only dispatch as the sole stage of a line; the same
        // word inside a pipeline resolves through normal program lookup.
        // A `&` or redirection on a builtin line parses but has no effect.
        if pipeline.stages.len() == 1 && builtins::is_builtin(&pipeline.stages[0].argv[0]) {
            let outcome = builtins::run(
                line,
                &pipeline.stages[0].argv,
                &self.jobs,
                &mut io::stdout(),
                &mut io::stderr(),
            )?;
            return Ok(match outcome {
                BuiltinOutcome::Code(code) => LineOutcome::Completed(vec![code]),
                BuiltinOutcome::Exit => LineOutcome::Exit,
            });
        }

        if pipeline.background {
            // The parser guarantees background lines have a single stage.
            return self.spawn_background(line, &pipeline.stages[0]);
        }

        Ok(LineOutcome::Completed(run_foreground(&pipeline)?))
    }

    /// Launch a single-stage background command and register it.
    fn spawn_background(
        &mut self,
        line: &str,
        stage: &PipelineStage,
    ) -> Result<LineOutcome, ShellError> {
        let target = stage.redirect.as_ref().map(open_target).transpose()?;

        let mut command = Command::new(&stage.argv[0]);
        command.args(&stage.argv[1..]);
        if let Some(file) = target {
            command.stdout(file);
        }

        match command.spawn() {
            Ok(child) => {
                self.jobs.insert(line.to_string(), child);
                Ok(LineOutcome::Backgrounded)
            }
            Err(_) => {
                // Nothing to track; report and complete the line now.
                ShellError::CommandNotFound.report();
                Ok(LineOutcome::Completed(vec![1]))
            }
        }
    }
}

/// Launch every stage of a foreground pipeline, then wait for each in
/// stage order and collect the exit codes positionally.
///
/// Stage i's stdout feeds pipe i; stage i+1's stdin reads it. The parent
/// hands each child its endpoints through `Command` and drops its own
/// copies as soon as that child has spawned, so EOF propagates down the
/// chain and no descriptor outlives the wiring. A stage that fails to
/// spawn is reported, scored 1, and its endpoints drop the same way, so
/// its downstream neighbor still sees EOF.
fn run_foreground(pipeline: &Pipeline) -> Result<Vec<i32>, ShellError> {
    let count = pipeline.stages.len();

    // The redirection target opens before anything spawns; a failed open
    // abandons the line with zero processes started.
    let last = &pipeline.stages[count - 1];
    let mut redirect_target = last.redirect.as_ref().map(open_target).transpose()?;

    let mut children: Vec<Option<Child>> = Vec::with_capacity(count);
    let mut upstream: Option<os_pipe::PipeReader> = None;

    for (index, stage) in pipeline.stages.iter().enumerate() {
        let mut command = Command::new(&stage.argv[0]);
        command.args(&stage.argv[1..]);

        if let Some(reader) = upstream.take() {
            command.stdin(reader);
        }
        if index + 1 < count {
            let (reader, writer) = os_pipe::pipe()?;
            command.stdout(writer);
            upstream = Some(reader);
        } else if let Some(file) = redirect_target.take() {
            command.stdout(file);
        }

        match command.spawn() {
            Ok(child) => children.push(Some(child)),
            Err(_) => {
                ShellError::CommandNotFound.report();
                children.push(None);
            }
        }
        // `command` drops here, closing the parent's pipe endpoints.
    }

    let mut codes = Vec::with_capacity(count);
    for child in children {
        match child {
            Some(mut child) => codes.push(status::exit_code(child.wait()?)),
            None => codes.push(1),
        }
    }
    Ok(codes)
}

/// Open a redirection target for writing, creating it if needed.
fn open_target(redirect: &Redirect) -> Result<File, ShellError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true);
    match redirect.mode {
        RedirectMode::Truncate => options.truncate(true),
        RedirectMode::Append => options.append(true),
    };
    options
        .open(&redirect.target)
        .map_err(|_| ShellError::CannotOpenOutput)
}
