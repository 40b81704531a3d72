// src/utils/command.rs

use std::{
    process::{Command, Stdio},
    thread,
    time::Duration,
};

use anyhow::Context;
use crossbeam::channel::{self, RecvTimeoutError};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = windows::Win32::System::Threading::CREATE_NO_WINDOW.0;

/// Runs `program` with `args` and waits at most `timeout` for it to exit.
///
/// A non-zero exit code is an error carrying the process' stderr. If the process
/// is still running after `timeout` a warning is logged and the call returns `Ok`;
/// the child keeps running in the background.
pub fn run_command(program: &str, args: &[&str], timeout: Duration) -> anyhow::Result<()> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        command.creation_flags(CREATE_NO_WINDOW);
    }

    let child = command
        .spawn()
        .with_context(|| format!("Failed to start '{}'", program))?;
    let pid = child.id();

    let (sender, receiver) = channel::bounded(1);
    thread::spawn(move || {
        // The receiver is gone once the caller stopped waiting.
        let _ = sender.send(child.wait_with_output());
    });

    match receiver.recv_timeout(timeout) {
        Ok(output) => {
            let output =
                output.with_context(|| format!("Failed to wait for '{}' (pid {})", program, pid))?;
            if output.status.success() {
                tracing::debug!("'{} {}' finished", program, args.join(" "));
                Ok(())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                anyhow::bail!(
                    "'{} {}' exited with {}: {}",
                    program,
                    args.join(" "),
                    output.status,
                    stderr.trim()
                )
            }
        }
        Err(RecvTimeoutError::Timeout) => {
            tracing::warn!(
                "'{}' (pid {}) still running after {:?}, continuing without it",
                program,
                pid,
                timeout
            );
            Ok(())
        }
        Err(RecvTimeoutError::Disconnected) => {
            anyhow::bail!("Lost track of '{}' (pid {})", program, pid)
        }
    }
}
