//! Host collaborator interface, and a local shell-backed implementation.

use std::process::Command;

use crate::core::error::{Error, Result};

/// The narrow surface the runtime needs from the surrounding CLI: a command
/// interpreter, a coding session, and two console sinks.
///
/// The engine only ever invokes methods on the host; it never replaces it.
pub trait Host {
    /// Execute a host command line (shell, code-edit, or slash-command) and
    /// return its result.
    fn run_command(&mut self, line: &str) -> Result<Option<String>>;

    /// Forward a prompt to the active coding session and return the
    /// assistant's reply.
    fn send_prompt(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Write a line to the console. Never reaches the language model.
    fn tool_output(&mut self, text: &str);

    /// Write an error line to the console.
    fn tool_error(&mut self, text: &str);
}

/// A standalone host backed by the local shell, used by the `macrorun`
/// binary. `!` commands run through `sh -c`; slash-commands and prompts have
/// no interpreter or coding session to go to and degrade to console notices.
#[derive(Debug, Default)]
pub struct ShellHost;

impl ShellHost {
    pub fn new() -> Self {
        Self
    }

    fn execute(&mut self, command: &str) -> Result<Option<String>> {
        #[cfg(windows)]
        let output = Command::new("cmd").args(["/C", command]).output();

        #[cfg(not(windows))]
        let output = Command::new("sh").args(["-c", command]).output();

        let output = output.map_err(|e| Error::Host(format!("{}: {}", command, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !stdout.trim_end().is_empty() {
            self.tool_output(stdout.trim_end());
        }
        if !stderr.trim_end().is_empty() {
            self.tool_error(stderr.trim_end());
        }

        Ok(Some(stdout))
    }
}

impl Host for ShellHost {
    fn run_command(&mut self, line: &str) -> Result<Option<String>> {
        if let Some(command) = line.strip_prefix('!') {
            return self.execute(command.trim_start());
        }
        // No host command interpreter is attached in standalone mode.
        self.tool_error(&format!("unsupported host command: {}", line));
        Ok(None)
    }

    fn send_prompt(&mut self, _prompt: &str) -> Result<Option<String>> {
        self.tool_error("no coding session attached; prompt dropped");
        Ok(None)
    }

    fn tool_output(&mut self, text: &str) {
        println!("{}", text);
    }

    fn tool_error(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}
