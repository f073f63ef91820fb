//! gomk.toml configuration parsing
//!
//! Every field is optional. A project without `gomk.toml` gets the defaults
//! below, which describe the `go-proxy` layout:
//!
//! ```toml
//! [project]
//! name = "go-proxy"
//! entry = "cmd/go-proxy"
//! output_dir = "dist"
//! config_dir = "./configs"
//!
//! [tools]
//! go = "go"
//! lint = ["golangci-lint", "run"]
//!
//! [test]
//! timeout_secs = 60
//! packages = ["./..."]
//! race = false
//!
//! [build]
//! strip = true
//! stamp_version = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Configuration file name searched for from the current directory upwards
pub const CONFIG_FILE_NAME: &str = "gomk.toml";

/// Root configuration from gomk.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GomkConfig {
    pub project: ProjectConfig,
    pub tools: ToolsConfig,
    pub test: TestConfig,
    pub build: BuildConfig,
}

/// Project layout from [project]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Binary name
    pub name: String,

    /// Main package directory, relative to the project root (default: cmd/<name>)
    pub entry: Option<PathBuf>,

    /// Directory the compiled binary is written to
    pub output_dir: PathBuf,

    /// Directory passed to the binary as `-config` by `run`
    pub config_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "go-proxy".to_string(),
            entry: None,
            output_dir: PathBuf::from("dist"),
            config_dir: PathBuf::from("./configs"),
        }
    }
}

impl ProjectConfig {
    /// Main package directory
    pub fn entry(&self) -> PathBuf {
        self.entry
            .clone()
            .unwrap_or_else(|| Path::new("cmd").join(&self.name))
    }

    /// Binary file name for the host platform
    pub fn binary_name(&self) -> String {
        format!("{}{}", self.name, std::env::consts::EXE_SUFFIX)
    }
}

/// External tools from [tools]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Go toolchain executable
    pub go: String,

    /// Linter program followed by its arguments
    pub lint: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            go: "go".to_string(),
            lint: vec!["golangci-lint".to_string(), "run".to_string()],
        }
    }
}

/// Test options from [test]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestConfig {
    /// Passed to `go test -timeout`
    pub timeout_secs: u64,

    /// Package patterns to test
    pub packages: Vec<String>,

    /// Enable the race detector
    pub race: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            packages: vec!["./...".to_string()],
            race: false,
        }
    }
}

/// Build options from [build]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Strip the symbol table and debug info (`-ldflags "-s -w"`)
    pub strip: bool,

    /// Inject version, commit and date through `-X main.<Var>=...`
    pub stamp_version: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            strip: true,
            stamp_version: true,
        }
    }
}

impl GomkConfig {
    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse gomk.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no command could be built from
    pub fn validate(&self) -> Result<()> {
        let name = &self.project.name;
        if name.trim().is_empty() {
            bail!("project.name must not be empty");
        }
        if name.contains(['/', '\\']) {
            bail!("project.name must be a file name, got '{}'", name);
        }
        if self.project.entry.as_ref().is_some_and(|entry| entry.is_absolute()) {
            bail!("project.entry must be relative to the project root");
        }
        if self.tools.go.trim().is_empty() {
            bail!("tools.go must not be empty");
        }
        if self.tools.lint.first().map_or(true, |p| p.trim().is_empty()) {
            bail!("tools.lint must name a program");
        }
        if self.test.timeout_secs == 0 {
            bail!("test.timeout_secs must be positive");
        }
        if self.test.packages.is_empty() {
            bail!("test.packages must list at least one package pattern");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_describe_go_proxy() {
        let config = GomkConfig::default();
        assert_eq!(config.project.name, "go-proxy");
        assert_eq!(config.project.entry(), Path::new("cmd").join("go-proxy"));
        assert_eq!(config.project.output_dir, PathBuf::from("dist"));
        assert_eq!(config.project.config_dir, PathBuf::from("./configs"));
        assert_eq!(config.tools.go, "go");
        assert_eq!(config.tools.lint, vec!["golangci-lint", "run"]);
        assert_eq!(config.test.timeout_secs, 60);
        assert_eq!(config.test.packages, vec!["./..."]);
        assert!(!config.test.race);
        assert!(config.build.strip);
        assert!(config.build.stamp_version);
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_empty_file() {
        assert_eq!(GomkConfig::parse("").unwrap(), GomkConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[project]
name = "edge"

[test]
race = true
timeout_secs = 120
"#;

        let config = GomkConfig::parse(toml).unwrap();
        assert_eq!(config.project.name, "edge");
        assert_eq!(config.project.entry(), Path::new("cmd").join("edge"));
        assert_eq!(config.project.output_dir, PathBuf::from("dist"));
        assert!(config.test.race);
        assert_eq!(config.test.timeout_secs, 120);
        assert_eq!(config.test.packages, vec!["./..."]);
    }

    #[test]
    fn test_parse_explicit_entry_and_tools() {
        let toml = r#"
[project]
name = "proxy"
entry = "app/main"

[tools]
go = "go1.22"
lint = ["staticcheck", "./..."]
"#;

        let config = GomkConfig::parse(toml).unwrap();
        assert_eq!(config.project.entry(), PathBuf::from("app/main"));
        assert_eq!(config.tools.go, "go1.22");
        assert_eq!(config.tools.lint, vec!["staticcheck", "./..."]);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(GomkConfig::parse("[project]\nnmae = \"x\"\n").is_err());
        assert!(GomkConfig::parse("[release]\n").is_err());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(GomkConfig::parse("[project]\nname = \"\"\n").is_err());
        assert!(GomkConfig::parse("[project]\nname = \"a/b\"\n").is_err());
        assert!(GomkConfig::parse("[project]\nentry = \"/abs/cmd\"\n").is_err());
        assert!(GomkConfig::parse("[tools]\nlint = []\n").is_err());
        assert!(GomkConfig::parse("[test]\ntimeout_secs = 0\n").is_err());
        assert!(GomkConfig::parse("[test]\npackages = []\n").is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = GomkConfig::parse("[project\nname = 1").unwrap_err();
        assert!(err.to_string().contains("gomk.toml"));
    }
}
