//! Check command implementation
//!
//! Lint followed by test in one plan. The plan executor stops at the first
//! failing step, so a failing lint never reaches the test run.

use super::{lint, test, Action, ActionContext};
use crate::exec::{Plan, Step};

pub fn plan(_action: &Action, ctx: &ActionContext<'_>) -> Plan {
    let mut plan = Plan::new();
    plan.push(Step::new("lint", lint::command(ctx)));
    plan.push(Step::new("test", test::command(ctx)));
    plan
}
