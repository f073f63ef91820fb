//! Per-invocation process environment
//!
//! A `ProcessEnvironment` is a snapshot of variables handed to a child
//! process. It is copied from the parent once and then derived, never
//! written back to the real process environment.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// Variables passed to a spawned command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessEnvironment {
    vars: BTreeMap<OsString, OsString>,
}

impl ProcessEnvironment {
    /// Copy the current process environment
    pub fn capture() -> Self {
        std::env::vars_os().collect()
    }

    /// Look up a variable by name
    #[cfg(test)]
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    /// Return a copy with `key` set to `value`
    pub fn with_var(&self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        let mut vars = self.vars.clone();
        vars.insert(key.into(), value.into());
        Self { vars }
    }

    /// Iterate variables in name order
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ProcessEnvironment
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_with_var_leaves_original_untouched() {
        let base: ProcessEnvironment = [("PATH", "/usr/bin"), ("HOME", "/home/dev")]
            .into_iter()
            .collect();

        let derived = base.with_var("PATH", "/opt/bin");

        assert_eq!(base.get("PATH"), Some(OsStr::new("/usr/bin")));
        assert_eq!(derived.get("PATH"), Some(OsStr::new("/opt/bin")));
        assert_eq!(derived.get("HOME"), Some(OsStr::new("/home/dev")));
        assert_eq!(derived.iter().count(), 2);
    }

    #[test]
    #[serial]
    fn test_capture_matches_process_environment() {
        let env = ProcessEnvironment::capture();
        for (key, value) in std::env::vars_os() {
            assert_eq!(env.get(&key), Some(value.as_os_str()));
        }
    }

    #[test]
    #[serial]
    fn test_capture_is_a_snapshot() {
        std::env::set_var("GOMK_CAPTURE_PROBE", "before");
        let env = ProcessEnvironment::capture();
        std::env::set_var("GOMK_CAPTURE_PROBE", "after");

        assert_eq!(env.get("GOMK_CAPTURE_PROBE"), Some(OsStr::new("before")));
        std::env::remove_var("GOMK_CAPTURE_PROBE");
    }
}
