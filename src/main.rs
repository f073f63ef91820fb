//! gomk - build orchestration for a single Go binary project
//!
//! One verb per invocation selects an action. Actions become command plans
//! that run the Go toolchain, the linter, or the built binary, and the first
//! failing command decides the exit status.
//!
//! ## Architecture
//!
//! ```text
//! cli (dispatch) → commands (registry, plans) → build::target (GOOS/GOARCH)
//!                                             → exec (subprocess runner)
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod utils;

use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "GOMK_LOG";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let code = match Cli::parse_args() {
        Ok(cli) => cli.execute(),
        Err(err) => cli::reject(err),
    };
    std::process::exit(code);
}
