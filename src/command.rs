//! Shell command execution

use crate::exceptions::{CommandError, Result};
use crate::exit_codes::EXIT_ERROR;
use log::{debug, error};
use std::process::{self, Command};

/// Captured output of a successful command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Everything the command wrote to stdout
    pub stdout: String,
    /// Everything the command wrote to stderr
    pub stderr: String,
}

/// Build a `Command` that hands `command` to the host shell
fn shell_command(command: &str) -> Command {
    #[cfg(windows)]
    let cmd = {
        use std::os::windows::process::CommandExt;

        let shell = std::env::var("ComSpec").unwrap_or_else(|_| "cmd.exe".to_string());
        debug!("🐚 Using shell: {shell}");
        let mut cmd = Command::new(shell);
        cmd.args(["/d", "/s", "/c"]).raw_arg(format!("\"{command}\""));
        cmd
    };

    #[cfg(not(windows))]
    let cmd = {
        let shell = which::which("sh")
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_else(|_| "sh".to_string());
        debug!("🐚 Using shell: {shell}");
        let mut cmd = Command::new(shell);
        cmd.arg("-c").arg(command);
        cmd
    };

    cmd
}

/// Run a shell command synchronously and capture its output.
///
/// A non-zero exit status or a spawn failure becomes a [`CommandError`]
/// carrying the command text and whatever the process printed.
pub fn run_command(command: &str) -> Result<CommandOutput> {
    Ok(run_shell(command)?)
}

fn run_shell(command: &str) -> std::result::Result<CommandOutput, CommandError> {
    debug!("🏃 Running: {command}");

    let output = shell_command(command).output().map_err(|e| CommandError {
        command: command.to_string(),
        code: None,
        output: e.to_string(),
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(CommandError {
            command: command.to_string(),
            code: output.status.code(),
            output: format!("{stdout}{stderr}"),
        });
    }

    if !stdout.is_empty() {
        debug!("Command stdout:\n{stdout}");
    }
    if !stderr.is_empty() {
        debug!("Command stderr:\n{stderr}");
    }

    Ok(CommandOutput { stdout, stderr })
}

/// Run a shell command, terminating the process with exit status 1 if it fails.
///
/// The failing command and its captured output are written to stderr first.
pub fn run_command_or_exit(command: &str) -> CommandOutput {
    match run_shell(command) {
        Ok(output) => output,
        Err(e) => {
            error!("❌ {e}");
            eprintln!("Error executing command '{command}': {}", e.output);
            process::exit(EXIT_ERROR);
        }
    }
}
