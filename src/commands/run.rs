//! Run command implementation
//!
//! Runs the binary produced by `build` from the output directory, pointing it
//! at the project's configuration directory.

use super::{Action, ActionContext};
use crate::exec::{Plan, Step};

pub fn plan(action: &Action, ctx: &ActionContext<'_>) -> Plan {
    let binary = ctx.project.binary_path();
    let args = vec![
        "-config".to_string(),
        ctx.config().project.config_dir.display().to_string(),
    ];
    Plan::single(Step::new(
        action.name,
        ctx.command(binary.display().to_string(), args),
    ))
}
