//! Cross-compilation targets
//!
//! Each supported OS is built for exactly one architecture. The pairing is
//! fixed here and cannot be overridden from the command line or `gomk.toml`.

use std::fmt;
use std::str::FromStr;

use crate::exec::ProcessEnvironment;

/// Environment variable selecting the Go target operating system
pub const GOOS: &str = "GOOS";

/// Environment variable selecting the Go target architecture
pub const GOARCH: &str = "GOARCH";

/// Operating systems the binary can be cross-compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOs {
    Linux,
    Windows,
    Darwin,
}

impl TargetOs {
    /// All supported operating systems, in usage order
    pub const ALL: [TargetOs; 3] = [TargetOs::Linux, TargetOs::Windows, TargetOs::Darwin];

    /// The `GOOS` value, which is also the verb name
    pub fn as_str(self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Windows => "windows",
            TargetOs::Darwin => "darwin",
        }
    }

    /// The architecture pinned to this OS
    pub fn arch(self) -> Arch {
        match self {
            TargetOs::Darwin => Arch::Arm64,
            TargetOs::Linux | TargetOs::Windows => Arch::Amd64,
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetOs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetOs::ALL
            .into_iter()
            .find(|os| os.as_str() == s)
            .ok_or_else(|| format!("unsupported target OS: {}", s))
    }
}

/// CPU architectures used by the pinning rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// x86-64
    Amd64,
    /// 64-bit ARM
    Arm64,
}

impl Arch {
    /// The `GOARCH` value
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An (OS, architecture) pair to cross-compile for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildTarget {
    pub os: TargetOs,
    pub arch: Arch,
}

impl BuildTarget {
    /// Resolve the target for an OS using the fixed architecture pinning
    pub fn for_os(os: TargetOs) -> Self {
        Self { os, arch: os.arch() }
    }

    /// Derive the child environment for this target from `base`
    ///
    /// Only `GOOS` and `GOARCH` differ from `base`; `base` itself is not
    /// modified.
    pub fn environment(&self, base: &ProcessEnvironment) -> ProcessEnvironment {
        base.with_var(GOOS, self.os.as_str())
            .with_var(GOARCH, self.arch.as_str())
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn base_env() -> ProcessEnvironment {
        [
            ("PATH", "/usr/local/go/bin:/usr/bin"),
            ("HOME", "/home/dev"),
            ("GOOS", "plan9"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_arch_pinning() {
        assert_eq!(BuildTarget::for_os(TargetOs::Darwin).arch, Arch::Arm64);
        assert_eq!(BuildTarget::for_os(TargetOs::Linux).arch, Arch::Amd64);
        assert_eq!(BuildTarget::for_os(TargetOs::Windows).arch, Arch::Amd64);
    }

    #[test]
    fn test_environment_overrides_only_target_keys() {
        let base = base_env();

        for os in TargetOs::ALL {
            let target = BuildTarget::for_os(os);
            let env = target.environment(&base);

            assert_eq!(env.get(GOOS), Some(OsStr::new(os.as_str())));
            assert_eq!(env.get(GOARCH), Some(OsStr::new(target.arch.as_str())));
            assert_eq!(env.get("PATH"), base.get("PATH"));
            assert_eq!(env.get("HOME"), base.get("HOME"));
            assert_eq!(env.iter().count(), base.iter().count() + 1);
        }

        // The base snapshot keeps its original value
        assert_eq!(base.get(GOOS), Some(OsStr::new("plan9")));
        assert_eq!(base.get(GOARCH), None);
    }

    #[test]
    fn test_windows_environment() {
        let env = BuildTarget::for_os(TargetOs::Windows).environment(&base_env());
        assert_eq!(env.get(GOOS), Some(OsStr::new("windows")));
        assert_eq!(env.get(GOARCH), Some(OsStr::new("amd64")));
    }

    #[test]
    fn test_darwin_environment() {
        let env = BuildTarget::for_os(TargetOs::Darwin).environment(&base_env());
        assert_eq!(env.get(GOOS), Some(OsStr::new("darwin")));
        assert_eq!(env.get(GOARCH), Some(OsStr::new("arm64")));
    }

    #[test]
    fn test_parse_target_os() {
        assert_eq!("linux".parse::<TargetOs>(), Ok(TargetOs::Linux));
        assert_eq!("darwin".parse::<TargetOs>(), Ok(TargetOs::Darwin));
        assert!("Darwin".parse::<TargetOs>().is_err());
        assert!("macos".parse::<TargetOs>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(BuildTarget::for_os(TargetOs::Darwin).to_string(), "darwin/arm64");
    }
}
