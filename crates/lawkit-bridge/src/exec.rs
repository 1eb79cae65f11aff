use lawkit_core::{LawkitError, Result};
use serde::Serialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

/// Exit code reported when the child was terminated without one (by a signal).
pub const NO_EXIT_CODE: i32 = -1;

/// Captured result of one child process run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl ExecutionOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `program` with `args` and capture its output.
///
/// Arguments are passed as an argv vector, never through a shell. Stdin is
/// closed. Both pipes are drained concurrently, so a chatty child cannot
/// block on a full pipe. The child is killed if the returned future is
/// dropped before it exits.
///
/// A non-zero exit is not an error here; only failing to start the process
/// or to collect its output is.
pub async fn run(program: &Path, args: &[String]) -> Result<ExecutionOutcome> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    configure_no_window(&mut cmd);

    debug!(program = %program.display(), ?args, "spawning lawkit");
    let started = Instant::now();

    let child = cmd.spawn().map_err(spawn_failed(program))?;
    let output = child
        .wait_with_output()
        .await
        .map_err(spawn_failed(program))?;

    let outcome = ExecutionOutcome {
        exit_code: output.status.code().unwrap_or(NO_EXIT_CODE),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        duration_ms: started.elapsed().as_millis() as u64,
    };

    debug!(
        exit_code = outcome.exit_code,
        duration_ms = outcome.duration_ms,
        "lawkit finished"
    );
    Ok(outcome)
}

/// Starting the child and collecting its output fail the same way.
fn spawn_failed(program: &Path) -> impl FnOnce(std::io::Error) -> LawkitError + '_ {
    move |source| LawkitError::SpawnFailed {
        path: program.to_path_buf(),
        source,
    }
}

/// Keep a console window from flashing up on Windows.
fn configure_no_window(cmd: &mut Command) {
    #[cfg(windows)]
    {
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    #[cfg(not(windows))]
    let _ = cmd;
}
