//! Help command implementation
//!
//! Usage text is generated from the action registry.

use super::{Action, ActionContext, ACTIONS};
use crate::exec::Plan;

/// Help runs no external commands
///
/// The dispatcher prints usage for `help` before any plan is built, so this
/// planner only fills the registry row.
pub fn plan(_action: &Action, _ctx: &ActionContext<'_>) -> Plan {
    Plan::new()
}

/// Usage text listing every registered verb
pub fn usage() -> String {
    let width = ACTIONS.iter().map(|a| a.name.len()).max().unwrap_or(0);

    let mut text = String::from("Usage: gomk <command>\n\nCommands:\n");
    for action in ACTIONS {
        text.push_str(&format!(
            "  {:<width$}  {}\n",
            action.name,
            action.summary,
            width = width
        ));
    }
    text
}
