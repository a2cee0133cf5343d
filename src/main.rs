mod ast;
mod builtins;
mod error;
mod executor;
mod jobs;
mod parser;
mod redirect;
mod report;
mod status;

use std::io::{self, Write};

use crate::ast::MAX_LINE_BYTES;
use crate::error::ShellError;
use crate::executor::{LineOutcome, Session};

const PROMPT: &str = "sshell$ ";

fn main() {
    ctrlc::set_handler(|| {
        println!();
        let _ = io::stdout().flush();
    })
    .expect("Failed to set Ctrl-C handler");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    // When input is piped rather than typed, echo each line so the
    // transcript reads like an interactive session.
    let echo_input = !stdin_is_tty();
    let mut session = Session::new();

    loop {
        print!("{PROMPT}");
        if stdout.flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(error) => {
                eprintln!("Error reading input: {error}");
                break;
            }
        }

        let raw = input.strip_suffix('\n').unwrap_or(&input);
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if echo_input {
            println!("{raw}");
            let _ = stdout.flush();
        }

        if raw.len() > MAX_LINE_BYTES {
            ShellError::LineTooLong.report();
            session.sweep_jobs();
            continue;
        }

        let line = parser::normalize(raw);
        if line.is_empty() {
            session.sweep_jobs();
            continue;
        }

        match session.interpret(line) {
            Ok(LineOutcome::Completed(codes)) => {
                // Finished background jobs report before the foreground
                // completion line, matching the order things ended.
                session.sweep_jobs();
                report::emit(line, &codes);
            }
            Ok(LineOutcome::Backgrounded) => session.sweep_jobs(),
            Ok(LineOutcome::Exit) => return,
            Err(error) if error.is_fatal() => {
                eprintln!("sshell: {error}");
                std::process::exit(1);
            }
            Err(error) => {
                error.report();
                session.sweep_jobs();
            }
        }
    }
}

#[cfg(unix)]
fn stdin_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

#[cfg(not(unix))]
fn stdin_is_tty() -> bool {
    true
}
