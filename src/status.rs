/// Convert an OS process status into shell-style exit code semantics.
///
/// A process killed by a signal has no exit code of its own; those map
/// to `128 + signal` so every completion line can show a plain number.
pub fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
