//! Subprocess execution
//!
//! Commands run with inherited standard streams, an explicit environment and
//! an explicit working directory. Failing to start a process is reported as
//! an `ExecError`, separately from a process that ran and exited non-zero.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

use super::ProcessEnvironment;

/// Exit code reported when a command could not be started at all
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// A fully resolved command: program, arguments, environment and directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: ProcessEnvironment,
    pub current_dir: PathBuf,
}

impl CommandSpec {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        env: ProcessEnvironment,
        current_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            env,
            current_dir: current_dir.into(),
        }
    }

    /// Program followed by its arguments
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .argv()
            .into_iter()
            .map(|token| {
                if token.is_empty() || token.contains(char::is_whitespace) {
                    format!("\"{}\"", token)
                } else {
                    token.to_string()
                }
            })
            .collect();
        f.write_str(&rendered.join(" "))
    }
}

/// Result of a command that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code
    pub exit_code: i32,

    /// Execution duration
    pub duration: Duration,
}

impl ExecutionResult {
    /// Create an ExecutionResult from an exit status
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: exit_code_of(status),
            duration,
        }
    }
}

/// Exit code for a finished process, including signal terminations on Unix
fn exit_code_of(status: ExitStatus) -> i32 {
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

/// A command that never ran
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl ExecError {
    pub fn program(&self) -> &str {
        match self {
            ExecError::Spawn { program, .. } => program,
        }
    }

    /// Whether the program was not found at all
    pub fn is_not_found(&self) -> bool {
        match self {
            ExecError::Spawn { source, .. } => source.kind() == io::ErrorKind::NotFound,
        }
    }
}

/// Something that can execute a `CommandSpec`
pub trait Runner {
    fn run(&mut self, spec: &CommandSpec) -> Result<ExecutionResult, ExecError>;
}

/// Runs commands as real child processes
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<ExecutionResult, ExecError> {
        let start = Instant::now();

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .env_clear()
            .envs(spec.env.iter())
            .current_dir(&spec.current_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!(command = %spec, dir = %spec.current_dir.display(), "spawning");

        let status = cmd.status().map_err(|source| {
            warn!(program = %spec.program, error = %source, "could not start");
            ExecError::Spawn {
                program: spec.program.clone(),
                source,
            }
        })?;

        let result = ExecutionResult::from_status(status, start.elapsed());
        if result.success {
            debug!(program = %spec.program, elapsed = ?result.duration, "finished");
        } else {
            debug!(
                program = %spec.program,
                exit_code = result.exit_code,
                "ran and failed"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn spec(program: &str, args: &[&str]) -> CommandSpec {
        CommandSpec::new(
            program,
            args.iter().map(|a| a.to_string()).collect(),
            ProcessEnvironment::capture(),
            std::env::current_dir().unwrap(),
        )
    }

    #[test]
    fn test_display_quotes_whitespace() {
        let spec = spec("go", &["build", "-ldflags", "-s -w", "./cmd/app"]);
        assert_eq!(spec.to_string(), "go build -ldflags \"-s -w\" ./cmd/app");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = SystemRunner
            .run(&spec("gomk-definitely-not-a-real-tool", &[]))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.program(), "gomk-definitely-not-a-real-tool");
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_success() {
        let result = SystemRunner.run(&spec("sh", &["-c", "exit 0"])).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_failure() {
        let result = SystemRunner.run(&spec("sh", &["-c", "exit 1"])).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);

        let result = SystemRunner.run(&spec("sh", &["-c", "exit 42"])).unwrap();
        assert_eq!(result.exit_code, 42);
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_termination() {
        let result = SystemRunner
            .run(&spec("sh", &["-c", "kill -9 $$"]))
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, 128 + 9);
    }

    #[cfg(unix)]
    #[test]
    fn test_child_sees_given_environment_only() {
        let path = std::env::var_os("PATH").unwrap_or_default();
        let env: ProcessEnvironment = [("PATH", path), ("GOMK_PROBE", OsString::from("expected"))]
            .into_iter()
            .collect();
        let spec = CommandSpec::new(
            "sh",
            vec![
                "-c".to_string(),
                "[ \"$GOMK_PROBE\" = expected ] && [ -z \"$HOME\" ]".to_string(),
            ],
            env,
            std::env::current_dir().unwrap(),
        );

        let result = SystemRunner.run(&spec).unwrap();
        assert!(result.success);
    }
}
