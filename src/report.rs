use std::fmt::Write as _;

/// Build the completion line for a finished command: the text the user
/// typed in single quotes, then one bracketed exit code per stage, in
/// pipeline order.
pub fn format(command: &str, codes: &[i32]) -> String {
    let mut line = format!("+ completed '{command}' ");
    for code in codes {
        let _ = write!(line, "[{code}]");
    }
    line
}

/// Print a completion line to standard error, where all shell-generated
/// output goes so it never mixes with command output.
pub fn emit(command: &str, codes: &[i32]) {
    eprintln!("{}", format(command, codes));
}
