//! Build command implementation
//!
//! `build` compiles for the host with the parent environment untouched. The
//! per-platform verbs compile the same package with `GOOS`/`GOARCH` set from
//! the pinned `BuildTarget`.

use tracing::info;

use super::{package_path, Action, ActionContext};
use crate::build::target::BuildTarget;
use crate::config::GomkConfig;
use crate::exec::{CommandSpec, Plan, Step};
use crate::utils::git_version::BuildStamp;

/// Plan a single `go build` step for `action`
pub fn plan(action: &Action, ctx: &ActionContext<'_>) -> Plan {
    let config = ctx.config();
    let env = match action.target {
        Some(os) => {
            let target = BuildTarget::for_os(os);
            info!(%target, "cross-compiling");
            target.environment(&ctx.base_env)
        }
        None => ctx.base_env.clone(),
    };

    let args = build_args(config, ctx.build_stamp().as_ref());
    let command = CommandSpec::new(config.tools.go.clone(), args, env, ctx.root());
    Plan::single(Step::new(action.name, command))
}

/// Arguments for `go build`
///
/// Output goes into the output directory (the Go tool picks the file name,
/// adding `.exe` for Windows targets).
pub fn build_args(config: &GomkConfig, stamp: Option<&BuildStamp>) -> Vec<String> {
    let mut args = vec![
        "build".to_string(),
        "-o".to_string(),
        output_dir_arg(config),
    ];

    let ldflags = ldflags(config, stamp);
    if !ldflags.is_empty() {
        args.push("-ldflags".to_string());
        args.push(ldflags);
    }

    args.push(package_path(&config.project.entry()));
    args
}

/// Linker flags: stripping plus version stamps
pub fn ldflags(config: &GomkConfig, stamp: Option<&BuildStamp>) -> String {
    let mut flags: Vec<String> = Vec::new();
    if config.build.strip {
        flags.push("-s".to_string());
        flags.push("-w".to_string());
    }
    if let Some(stamp) = stamp {
        flags.extend(stamp.ldflags());
    }
    flags.join(" ")
}

/// The output directory with a trailing separator so `go build` treats it
/// as a directory
fn output_dir_arg(config: &GomkConfig) -> String {
    let dir = config.project.output_dir.display().to_string();
    if dir.ends_with('/') || dir.ends_with(std::path::MAIN_SEPARATOR) {
        dir
    } else {
        format!("{}/", dir)
    }
}
