/// Longest accepted command line, in bytes, newline excluded.
pub const MAX_LINE_BYTES: usize = 512;
/// Most stages one pipeline may have (four `|` delimiters).
pub const MAX_STAGES: usize = 5;
/// Most tokens one stage may carry, program name included.
pub const MAX_ARGS: usize = 16;

/// How the final stage's standard output is rebound to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>` — create the target or truncate what is already there.
    Truncate,
    /// `>>` — create the target or extend what is already there.
    Append,
}

/// An output redirection carried by the final pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    pub mode: RedirectMode,
}

/// One command between pipe delimiters: its tokens (the first is the
/// program name) plus, on the final stage only, an optional redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStage {
    pub argv: Vec<String>,
    pub redirect: Option<Redirect>,
}

/// A fully validated command line, ready to launch.
///
/// `stages` is never empty. Each parsed line produces a fresh value that
/// is dropped at the end of the loop iteration; nothing here is shared
/// with the job registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub stages: Vec<PipelineStage>,
    /// True when the line ended with `&`. Only single-stage pipelines may
    /// set this; the parser rejects the combination otherwise.
    pub background: bool,
}
