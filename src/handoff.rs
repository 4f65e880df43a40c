//! Hands the process over to the post-completion command.
//!
//! On unix the command replaces this process (`exec`), so it inherits the
//! terminal and the pid, and clti never returns. Elsewhere it runs as a child
//! and its status becomes ours.

use std::io;
use std::process::Command;

use log::info;

/// The command line wrapped in the platform shell.
fn shell_command(command: &str) -> Command {
    let mut shell = if cfg!(unix) {
        let mut c = Command::new("/bin/sh");
        c.arg("-c");
        c
    } else {
        let mut c = Command::new("cmd");
        c.arg("/C");
        c
    };
    shell.arg(command);
    shell
}

/// Replaces the current process with `sh -c <command>`.
///
/// Only returns if the exec failed.
#[cfg(unix)]
pub fn exec_command(command: &str) -> io::Error {
    use std::os::unix::process::CommandExt;

    info!("Handing off to post-command: {}", command);
    log::logger().flush();
    shell_command(command).exec()
}

/// Runs `cmd /C <command>` and exits with its status.
///
/// Only returns if the command could not be started.
#[cfg(not(unix))]
pub fn exec_command(command: &str) -> io::Error {
    info!("Running post-command: {}", command);
    match shell_command(command).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => e,
    }
}
