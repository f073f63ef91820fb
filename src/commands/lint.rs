//! Lint command implementation

use super::{Action, ActionContext};
use crate::exec::{CommandSpec, Plan, Step};

pub fn plan(action: &Action, ctx: &ActionContext<'_>) -> Plan {
    Plan::single(Step::new(action.name, command(ctx)))
}

/// The configured linter invocation (`golangci-lint run` by default)
pub fn command(ctx: &ActionContext<'_>) -> CommandSpec {
    let lint = &ctx.config().tools.lint;
    // empty lists are rejected when gomk.toml is loaded
    let (program, args) = match lint.split_first() {
        Some((program, args)) => (program.as_str(), args.to_vec()),
        None => ("golangci-lint", vec!["run".to_string()]),
    };
    ctx.command(program, args)
}
