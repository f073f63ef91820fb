// Build stamp collection
// Fills the `main.Version`, `main.Commit`, `main.ShortCommit` and `main.Date`
// variables of the Go binary through linker flags.

use std::path::Path;
use std::process::{Command, Stdio};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

/// File at the project root holding the release version
pub const VERSION_FILE: &str = "VERSION";

/// Version metadata injected into the binary at link time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStamp {
    /// First line of the VERSION file (e.g., "1.4.0")
    pub version: String,
    /// Full commit hash, with "-dirty" for uncommitted changes
    pub commit: String,
    /// Short commit hash, with "-dirty" for uncommitted changes
    pub short_commit: String,
    /// Build time in RFC 3339
    pub date: String,
}

impl BuildStamp {
    /// Collect stamp values from the project root
    ///
    /// Missing files, a missing git binary, or a directory outside a
    /// repository all yield empty values rather than errors.
    pub fn collect(project_root: &Path) -> Self {
        Self::collect_at(project_root, Utc::now())
    }

    fn collect_at(project_root: &Path, now: DateTime<Utc>) -> Self {
        let version = read_version_file(project_root);
        let dirty = is_git_dirty(project_root);
        let commit = git_output(project_root, &["rev-parse", "HEAD"])
            .map(|c| with_dirty_suffix(c, dirty))
            .unwrap_or_default();
        let short_commit = git_output(project_root, &["rev-parse", "--short", "HEAD"])
            .map(|c| with_dirty_suffix(c, dirty))
            .unwrap_or_default();

        let stamp = Self {
            version,
            commit,
            short_commit,
            date: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        debug!(?stamp, "collected build stamp");
        stamp
    }

    /// `-X` linker flags for every non-empty value
    pub fn ldflags(&self) -> Vec<String> {
        [
            ("main.Version", &self.version),
            ("main.Commit", &self.commit),
            ("main.ShortCommit", &self.short_commit),
            ("main.Date", &self.date),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .flat_map(|(var, value)| {
            let assignment = format!("{}={}", var, value);
            let assignment = if assignment.contains(char::is_whitespace) {
                format!("'{}'", assignment)
            } else {
                assignment
            };
            ["-X".to_string(), assignment]
        })
        .collect()
    }
}

/// Read the first line of the VERSION file
fn read_version_file(project_root: &Path) -> String {
    std::fs::read_to_string(project_root.join(VERSION_FILE))
        .ok()
        .and_then(|content| content.lines().next().map(|l| l.trim().to_string()))
        .unwrap_or_default()
}

/// Run a git command in the project root and return its trimmed stdout
fn git_output(project_root: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(project_root)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Check if working directory has uncommitted changes
fn is_git_dirty(project_root: &Path) -> bool {
    git_output(project_root, &["status", "--porcelain"]).is_some()
}

fn with_dirty_suffix(commit: String, dirty: bool) -> String {
    if dirty {
        format!("{}-dirty", commit)
    } else {
        commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ldflags_skip_empty_values() {
        let stamp = BuildStamp {
            version: "1.2.0".to_string(),
            commit: String::new(),
            short_commit: "1a2b3c4".to_string(),
            date: "2026-10-15T08:30:00Z".to_string(),
        };

        assert_eq!(
            stamp.ldflags(),
            vec![
                "-X",
                "main.Version=1.2.0",
                "-X",
                "main.ShortCommit=1a2b3c4",
                "-X",
                "main.Date=2026-10-15T08:30:00Z",
            ]
        );
    }

    #[test]
    fn test_ldflags_quote_whitespace() {
        let stamp = BuildStamp {
            version: "1.0 rc".to_string(),
            ..Default::default()
        };
        assert_eq!(stamp.ldflags(), vec!["-X", "'main.Version=1.0 rc'"]);
    }

    #[test]
    fn test_dirty_suffix() {
        assert_eq!(with_dirty_suffix("abc".to_string(), true), "abc-dirty");
        assert_eq!(with_dirty_suffix("abc".to_string(), false), "abc");
    }

    #[test]
    fn test_collect_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(VERSION_FILE), "2.3.1\nnotes\n").unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 8, 30, 0).unwrap();

        let stamp = BuildStamp::collect_at(dir.path(), now);
        assert_eq!(stamp.version, "2.3.1");
        assert_eq!(stamp.date, "2026-10-15T08:30:00Z");
    }
}
