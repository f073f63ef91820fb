//! Action registry
//!
//! Every verb the tool accepts is one row of `ACTIONS`. A row names the verb,
//! its kind, an optional pinned target OS, a usage summary and the function
//! that turns the project configuration into a command plan.

pub mod build;
pub mod check;
pub mod help;
pub mod lint;
pub mod run;

use std::path::Path;

use crate::build::target::TargetOs;
use crate::config::{GomkConfig, Project};
use crate::exec::{CommandSpec, Plan, ProcessEnvironment};
use crate::utils::git_version::BuildStamp;

/// The closed set of things an action can do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Test,
    Help,
    Build,
    Run,
    Lint,
    Check,
}

/// Produces the command plan for an action
pub type PlanFn = fn(&Action, &ActionContext<'_>) -> Plan;

/// A registered verb
pub struct Action {
    /// Verb as typed on the command line
    pub name: &'static str,
    pub kind: ActionKind,
    /// Target OS for cross-compiling build verbs
    pub target: Option<TargetOs>,
    /// One-line description for usage text
    pub summary: &'static str,
    /// Not called for actions that don't need the project (`help`); the
    /// dispatcher prints usage for those without planning
    planner: PlanFn,
}

impl Action {
    /// Build the command plan for this action
    pub fn plan(&self, ctx: &ActionContext<'_>) -> Plan {
        (self.planner)(self, ctx)
    }

    /// Whether the child environment gets target overrides
    pub fn augments_environment(&self) -> bool {
        self.target.is_some()
    }

    /// Whether the action needs the project configuration
    pub fn needs_project(&self) -> bool {
        self.kind != ActionKind::Help
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// All registered actions, in usage order
pub static ACTIONS: &[Action] = &[
    Action {
        name: "test",
        kind: ActionKind::Test,
        target: None,
        summary: "Run the test suite once, failing after the configured timeout",
        planner: test::plan,
    },
    Action {
        name: "build",
        kind: ActionKind::Build,
        target: None,
        summary: "Build the binary for the host platform",
        planner: build::plan,
    },
    Action {
        name: "linux",
        kind: ActionKind::Build,
        target: Some(TargetOs::Linux),
        summary: "Cross-compile the binary for linux/amd64",
        planner: build::plan,
    },
    Action {
        name: "windows",
        kind: ActionKind::Build,
        target: Some(TargetOs::Windows),
        summary: "Cross-compile the binary for windows/amd64",
        planner: build::plan,
    },
    Action {
        name: "darwin",
        kind: ActionKind::Build,
        target: Some(TargetOs::Darwin),
        summary: "Cross-compile the binary for darwin/arm64",
        planner: build::plan,
    },
    Action {
        name: "run",
        kind: ActionKind::Run,
        target: None,
        summary: "Run the built binary with the configuration directory",
        planner: run::plan,
    },
    Action {
        name: "lint",
        kind: ActionKind::Lint,
        target: None,
        summary: "Run the linter over the project",
        planner: lint::plan,
    },
    Action {
        name: "check",
        kind: ActionKind::Check,
        target: None,
        summary: "Run lint, then test; stop at the first failure",
        planner: check::plan,
    },
    Action {
        name: "help",
        kind: ActionKind::Help,
        target: None,
        summary: "Display this help message",
        planner: help::plan,
    },
];

/// Find the action registered under `name` (exact, case-sensitive)
pub fn lookup(name: &str) -> Option<&'static Action> {
    ACTIONS.iter().find(|action| action.name == name)
}

/// Inputs shared by every planner
#[derive(Debug)]
pub struct ActionContext<'a> {
    pub project: &'a Project,
    /// Environment snapshot taken once per invocation
    pub base_env: ProcessEnvironment,
    /// Preset build stamp; collected from the project when `None`
    pub stamp: Option<BuildStamp>,
}

impl<'a> ActionContext<'a> {
    pub fn new(project: &'a Project, base_env: ProcessEnvironment) -> Self {
        Self {
            project,
            base_env,
            stamp: None,
        }
    }

    pub fn config(&self) -> &GomkConfig {
        &self.project.config
    }

    pub fn root(&self) -> &Path {
        &self.project.root
    }

    /// Build stamp for linker flags, if stamping is enabled
    pub fn build_stamp(&self) -> Option<BuildStamp> {
        if !self.config().build.stamp_version {
            return None;
        }
        Some(
            self.stamp
                .clone()
                .unwrap_or_else(|| BuildStamp::collect(self.root())),
        )
    }

    /// A command run in the project root with the base environment
    pub fn command(&self, program: impl Into<String>, args: Vec<String>) -> CommandSpec {
        CommandSpec::new(program, args, self.base_env.clone(), self.root())
    }
}

/// `./`-prefixed package path with forward slashes, as the Go tool expects
pub(crate) fn package_path(path: &Path) -> String {
    let rendered = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if rendered.starts_with("./") || rendered.starts_with("../") {
        rendered
    } else {
        format!("./{}", rendered)
    }
}
