//! Command dispatch
//!
//! The tool takes a single positional verb. Anything after it is ignored and
//! no flags are interpreted, so `--help` is just another unknown verb.

use std::io::Write;

use clap::Parser;
use tracing::debug;

use crate::commands::{self, help, ActionContext};
use crate::config::Project;
use crate::error::GomkError;
use crate::exec::{ProcessEnvironment, Runner, SystemRunner};
use crate::utils::terminal;

/// gomk - build orchestration for a single Go binary project
#[derive(Parser, Debug)]
#[command(name = "gomk")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Command to run (see `gomk help`)
    #[arg(allow_hyphen_values = true)]
    pub verb: Option<String>,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub rest: Vec<String>,
}

impl Cli {
    /// Parse process arguments; unparseable input counts as an unknown verb
    pub fn parse_args() -> Result<Self, GomkError> {
        Self::try_parse().map_err(|e| {
            debug!(error = %e, "argument parsing failed");
            GomkError::InvalidArgument {
                verb: std::env::args_os()
                    .nth(1)
                    .map(|a| a.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            }
        })
    }

    /// Execute the selected action and return the process exit code
    pub fn execute(self) -> i32 {
        if !self.rest.is_empty() {
            debug!(ignored = ?self.rest, "extra arguments ignored");
        }
        let mut runner = SystemRunner;
        let mut stdout = std::io::stdout();
        dispatch(self.verb.as_deref(), &mut runner, &mut stdout, Project::discover)
    }
}

/// Report an argument error the same way as an unknown verb
pub fn reject(err: GomkError) -> i32 {
    let mut stdout = std::io::stdout();
    fail_with_usage(err, &mut stdout)
}

/// Resolve `verb`, run its plan, and map the outcome to an exit code
///
/// Usage text goes to `out`; errors go to standard error. The project is
/// only loaded once the verb is known to spawn commands.
pub fn dispatch<L>(
    verb: Option<&str>,
    runner: &mut dyn Runner,
    out: &mut dyn Write,
    load_project: L,
) -> i32
where
    L: FnOnce() -> Result<Project, GomkError>,
{
    let Some(verb) = verb else {
        write_usage(out);
        return 0;
    };

    let Some(action) = commands::lookup(verb) else {
        return fail_with_usage(
            GomkError::InvalidArgument {
                verb: verb.to_string(),
            },
            out,
        );
    };

    debug!(
        ?action,
        augments_environment = action.augments_environment(),
        "dispatching"
    );
    if !action.needs_project() {
        write_usage(out);
        return 0;
    }

    let project = match load_project() {
        Ok(project) => project,
        Err(err) => return fail(err),
    };

    let ctx = ActionContext::new(&project, ProcessEnvironment::capture());
    let plan = action.plan(&ctx);
    debug!(steps = plan.steps().len(), root = %project.root.display(), "planned");
    match plan.execute(runner) {
        Ok(()) => {
            terminal::print_success(&format!("{} finished", action.name));
            0
        }
        Err(err) => fail(err),
    }
}

fn write_usage(out: &mut dyn Write) {
    // write errors are ignored; the exit code comes from the action
    let _ = out.write_all(help::usage().as_bytes());
    let _ = out.flush();
}

fn fail_with_usage(err: GomkError, out: &mut dyn Write) -> i32 {
    err.display_with_hints();
    write_usage(out);
    err.exit_code()
}

fn fail(err: GomkError) -> i32 {
    err.display_with_hints();
    err.exit_code()
}
