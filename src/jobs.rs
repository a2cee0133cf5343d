use std::collections::HashMap;
use std::process::Child;

use crate::report;
use crate::status;

/// A single tracked background job. The registry owns the child handle;
/// `command` is the line as the user typed it, background marker
/// included, and is what the completion line shows at reap time.
struct Job {
    command: String,
    child: Child,
}

/// The shell's background-job registry, keyed by process id.
///
/// Only the interpreter loop touches it: one insert when a line is sent
/// to the background, one removal when a sweep observes the exit. A job
/// is reaped exactly once.
pub struct JobTable {
    jobs: HashMap<u32, Job>,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}

impl JobTable {
    pub fn new() -> Self {
        Self { jobs: HashMap::new() }
    }

    /// Track a freshly spawned background job. Returns its process id.
    pub fn insert(&mut self, command: String, child: Child) -> u32 {
        let pid = child.id();
        self.jobs.insert(pid, Job { command, child });
        pid
    }

    /// True when no background job is pending. `exit` requires this.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Non-blocking poll of every tracked job. Jobs whose process has
    /// exited get their completion line printed (a single bracketed code)
    /// and leave the registry; the rest stay untouched.
    pub fn sweep(&mut self) {
        let mut done = Vec::new();

        for (pid, job) in self.jobs.iter_mut() {
            match job.child.try_wait() {
                Ok(Some(status)) => {
                    report::emit(&job.command, &[status::exit_code(status)]);
                    done.push(*pid);
                }
                Ok(None) => {} // still running
                // A failed probe leaves the job pending for the next sweep.
                Err(_) => {}
            }
        }

        for pid in done {
            self.jobs.remove(&pid);
        }
    }
}
