//! Error types and helpers for user-friendly error messages
//!
//! Every failure the tool can report maps to one process exit code. Tool
//! failures pass the child's own code through unchanged.

use thiserror::Error;

use crate::exec::{ExecError, SPAWN_FAILURE_EXIT_CODE};

/// Exit code for usage and configuration errors
pub const USAGE_EXIT_CODE: i32 = 1;

/// Errors surfaced by the dispatcher as the process exit status
#[derive(Error, Debug)]
pub enum GomkError {
    /// The verb is not in the action registry
    #[error("unknown command '{verb}'")]
    InvalidArgument { verb: String },

    /// An external tool ran and exited non-zero
    #[error("{step} failed: `{program}` exited with code {exit_code}")]
    ToolFailed {
        step: String,
        program: String,
        exit_code: i32,
    },

    /// An external tool could not be started
    #[error("{step} failed: {source}")]
    ToolNotStarted {
        step: String,
        #[source]
        source: ExecError,
    },

    /// A step failed while later steps of the same plan were still pending
    #[error("{step} aborted, skipped: {}", .skipped.join(", "))]
    SequenceAbort {
        step: String,
        skipped: Vec<String>,
        #[source]
        source: Box<GomkError>,
    },

    /// Configuration file errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },
}

impl GomkError {
    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// The process exit code this error maps to
    pub fn exit_code(&self) -> i32 {
        match self {
            GomkError::InvalidArgument { .. } | GomkError::Config { .. } => USAGE_EXIT_CODE,
            GomkError::ToolFailed { exit_code, .. } => *exit_code,
            GomkError::ToolNotStarted { .. } => SPAWN_FAILURE_EXIT_CODE,
            GomkError::SequenceAbort { source, .. } => source.exit_code(),
        }
    }

    /// The innermost error, skipping sequence wrappers
    pub fn root(&self) -> &GomkError {
        match self {
            GomkError::SequenceAbort { source, .. } => source.root(),
            other => other,
        }
    }

    /// Installation or usage hint for this error, if any
    pub fn hint(&self) -> Option<String> {
        match self {
            GomkError::Config { hint, .. } => hint.clone(),
            GomkError::ToolNotStarted { step, source } if source.is_not_found() => {
                Some(hints::for_program(source.program(), step).to_string())
            }
            GomkError::ToolNotStarted { source, .. } => Some(format!(
                "Check that `{}` is executable by the current user",
                source.program()
            )),
            GomkError::SequenceAbort { source, .. } => source.hint(),
            GomkError::InvalidArgument { .. } => Some(hints::usage().to_string()),
            GomkError::ToolFailed { .. } => None,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("{}: {}", style("error").red().bold(), self.root());

        if let GomkError::SequenceAbort { skipped, .. } = self {
            eprintln!("  {} {}", style("skipped:").dim(), skipped.join(", "));
        }

        if let GomkError::Config {
            source: Some(cause),
            ..
        } = self.root()
        {
            eprintln!("  {} {:#}", style("caused by:").dim(), cause);
        }

        if let Some(hint) = self.hint() {
            eprintln!("{}: {}", style("hint").yellow().bold(), hint);
        }
    }
}

/// Common error hints
pub mod hints {
    /// Hint for a program that could not be started
    pub fn for_program(program: &str, step: &str) -> &'static str {
        match program {
            "go" => go(),
            "golangci-lint" => golangci_lint(),
            _ if step == "run" => binary_not_built(),
            _ => "Install this tool and ensure it's in your PATH",
        }
    }

    /// Get hint for missing Go toolchain
    pub fn go() -> &'static str {
        "Install Go from https://go.dev/dl/ or use your package manager:\n\
         • macOS: brew install go\n\
         • Ubuntu: sudo apt install golang-go\n\
         • Windows: winget install GoLang.Go"
    }

    /// Get hint for missing golangci-lint
    pub fn golangci_lint() -> &'static str {
        "Install golangci-lint from https://golangci-lint.run/welcome/install/:\n\
         • macOS: brew install golangci-lint\n\
         • Any platform: go install github.com/golangci/golangci-lint/cmd/golangci-lint@latest"
    }

    /// Get hint for running before building
    pub fn binary_not_built() -> &'static str {
        "The binary has not been built yet. Run: gomk build"
    }

    /// Get hint for an unknown verb
    pub fn usage() -> &'static str {
        "Run `gomk help` to list available commands"
    }

    /// Get hint for invalid gomk.toml
    pub fn invalid_gomk_toml() -> &'static str {
        "gomk.toml is invalid. Common issues:\n\
         • Invalid TOML syntax (check quotes, brackets, commas)\n\
         • Unknown section or key (allowed: [project], [tools], [test], [build])\n\
         • Empty lists for tools.lint or test.packages"
    }
}
