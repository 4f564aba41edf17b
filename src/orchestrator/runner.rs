//! Sequential update runner
//!
//! One child process per database, stdout/stderr inherited, each waited on
//! before the next starts. The blocking wait polls the SIGINT counter:
//! first interrupt forwards SIGINT to the child, second kills it and aborts
//! the whole run.

use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::Duration;

use super::interrupt::InterruptState;

/// Where the child's logfile flag points: the runner's own stdout.
const LOG_DESTINATION: &str = "/proc/self/fd/1";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The resolved update invocation, minus the per-database arguments.
pub struct UpdateCommand {
    pub binary: PathBuf,
    pub config_path: String,
    pub extra_args: Vec<String>,
}

/// Terminal state of one supervised child.
#[derive(Debug)]
pub enum WaitOutcome {
    Exited(ExitStatus),
    ForceKilled,
}

/// How the whole run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Aborted,
}

/// Run the update binary once per target, strictly in order.
///
/// A non-zero exit from one database does not stop the loop; a forced kill
/// does.
pub fn run_updates(
    command: &UpdateCommand,
    targets: &[String],
    interrupts: &InterruptState,
) -> Result<RunOutcome> {
    for db in targets {
        let args = build_args(command, db);
        let mut child = Command::new(&command.binary)
            .args(&args)
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to launch {} for database {db}",
                    command.binary.display()
                )
            })?;

        println!("\nRunning : {}\n", render_command_line(&command.binary, &args));

        match supervise(&mut child, interrupts)? {
            WaitOutcome::Exited(status) if !status.success() => {
                tracing::warn!(database = %db, %status, "update invocation failed");
            }
            WaitOutcome::Exited(_) => {}
            WaitOutcome::ForceKilled => return Ok(RunOutcome::Aborted),
        }
    }
    Ok(RunOutcome::Completed)
}

fn build_args(command: &UpdateCommand, db: &str) -> Vec<String> {
    let mut args = vec![
        "-c".to_string(),
        command.config_path.clone(),
        "--db-filter".to_string(),
        db.to_string(),
        "-d".to_string(),
        db.to_string(),
        "--logfile".to_string(),
        LOG_DESTINATION.to_string(),
        "--stop-after-init".to_string(),
    ];
    args.extend(command.extra_args.iter().cloned());
    args
}

fn render_command_line(binary: &Path, args: &[String]) -> String {
    let mut line = binary.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Block until the child reaches a terminal state.
///
/// The SIGINT counter is read relative to its value at entry, so an
/// interrupt consumed by a previous invocation does not leak into this one.
pub fn supervise(child: &mut Child, interrupts: &InterruptState) -> io::Result<WaitOutcome> {
    let base = interrupts.hits();
    let mut stop_requested = false;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(WaitOutcome::Exited(status));
        }
        let delta = interrupts.hits().saturating_sub(base);
        if delta >= 2 {
            let _ = child.kill();
            let _ = child.wait();
            eprintln!("W: Forced exit. Program stops here.");
            return Ok(WaitOutcome::ForceKilled);
        }
        if delta == 1 && !stop_requested {
            request_graceful_stop(child);
            eprintln!("W: Exiting, press CTRL-C again to force the shutdown.");
            stop_requested = true;
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn request_graceful_stop(child: &Child) {
    // A failed kill(2) means the child is already gone; the next try_wait
    // picks up its status.
    unsafe {
        libc::kill(child.id() as libc::pid_t, libc::SIGINT);
    }
}
