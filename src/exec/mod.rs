//! External command execution
//!
//! - `env` - per-invocation environment snapshots
//! - `subprocess` - spawning and exit-status reporting
//! - `plan` - fail-fast ordered command sequences

pub mod env;
pub mod plan;
pub mod subprocess;

pub use env::ProcessEnvironment;
pub use plan::{Plan, Step};
pub use subprocess::{CommandSpec, ExecError, Runner, SystemRunner, SPAWN_FAILURE_EXIT_CODE};
