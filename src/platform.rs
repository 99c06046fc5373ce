//! Host platform and architecture detection
//!
//! Packaging ships a handful of prebuilt artifact variants, so many host
//! identifiers collapse onto a few normalized tags. The tables below are the
//! source of truth and must not be "corrected": several architectures map to
//! the closest artifact that exists, not the one that actually matches.

use crate::utils::env_non_empty;
use log::debug;
use serde::Serialize;
use std::env;
use std::fmt;

/// Overrides the host OS identifier used for detection
pub const HOST_OS_ENV: &str = "PACKAGING_HOST_OS";
/// Overrides the host architecture identifier used for detection
pub const HOST_ARCH_ENV: &str = "PACKAGING_HOST_ARCH";

/// Normalized platform tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux and the other Unix-likes that share its artifacts
    Linux,
    /// macOS
    Darwin,
    /// Windows
    Win32,
}

impl Platform {
    /// Tag as used in artifact names
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
            Platform::Win32 => "win32",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized architecture tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 64-bit ARM artifacts
    Arm64,
    /// x86-64 artifacts
    X64,
}

impl Arch {
    /// Tag as used in artifact names
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64",
            Arch::X64 => "x64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host OS identifier -> platform tag
pub const PLATFORM_TABLE: &[(&str, Platform)] = &[
    ("aix", Platform::Linux),
    ("alpine", Platform::Linux),
    ("darwin", Platform::Darwin),
    ("freebsd", Platform::Linux),
    ("linux", Platform::Linux),
    ("openbsd", Platform::Linux),
    ("sunos", Platform::Linux),
    ("win32", Platform::Win32),
];

/// Host architecture identifier -> architecture tag
pub const ARCH_TABLE: &[(&str, Arch)] = &[
    ("arm", Arch::Arm64),
    ("armhf", Arch::Arm64),
    ("arm64", Arch::Arm64),
    ("ia32", Arch::X64),
    ("loong64", Arch::Arm64),
    ("mips", Arch::Arm64),
    ("mipsel", Arch::Arm64),
    ("ppc", Arch::X64),
    ("ppc64", Arch::X64),
    ("riscv64", Arch::Arm64),
    ("s390", Arch::X64),
    ("s390x", Arch::X64),
    ("x64", Arch::X64),
];

/// Look up a host OS identifier
pub fn lookup_platform(os: &str) -> Option<Platform> {
    PLATFORM_TABLE
        .iter()
        .find(|(key, _)| *key == os)
        .map(|(_, platform)| *platform)
}

/// Look up a host architecture identifier
pub fn lookup_arch(arch: &str) -> Option<Arch> {
    ARCH_TABLE
        .iter()
        .find(|(key, _)| *key == arch)
        .map(|(_, arch)| *arch)
}

/// Raw host identifiers in the vocabulary of the lookup tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentifiers {
    /// OS key, e.g. `darwin` or `win32`
    pub os: String,
    /// Architecture key, e.g. `x64` or `arm64`
    pub arch: String,
}

impl HostIdentifiers {
    /// Identifiers of the host this crate was compiled for
    pub fn current() -> Self {
        Self {
            os: host_os_name(env::consts::OS).to_string(),
            arch: host_arch_name(env::consts::ARCH, cfg!(target_endian = "little")).to_string(),
        }
    }

    /// Like [`HostIdentifiers::current`], with `PACKAGING_HOST_OS` and
    /// `PACKAGING_HOST_ARCH` taking precedence when set
    pub fn from_env() -> Self {
        let mut ids = Self::current();
        if let Some(os) = env_non_empty(HOST_OS_ENV) {
            debug!("🔧 Host OS overridden by {HOST_OS_ENV}: {os}");
            ids.os = os;
        }
        if let Some(arch) = env_non_empty(HOST_ARCH_ENV) {
            debug!("🔧 Host arch overridden by {HOST_ARCH_ENV}: {arch}");
            ids.arch = arch;
        }
        ids
    }
}

/// Translate a Rust `target_os` name to a table key
pub fn host_os_name(rust_os: &str) -> &str {
    match rust_os {
        "macos" => "darwin",
        "windows" => "win32",
        "solaris" | "illumos" => "sunos",
        other => other,
    }
}

/// Translate a Rust `target_arch` name to a table key
pub fn host_arch_name(rust_arch: &str, little_endian: bool) -> &str {
    match rust_arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc" => "ppc",
        "powerpc64" => "ppc64",
        "mips" if little_endian => "mipsel",
        other => other,
    }
}

/// Look up explicit host identifiers, platform first
pub fn detect_from(os: &str, arch: &str) -> (Option<Platform>, Option<Arch>) {
    (lookup_platform(os), lookup_arch(arch))
}

/// Detect the normalized platform and architecture of this host.
///
/// Either slot is `None` when the host identifier is not in its table;
/// deciding what to do then is up to the caller.
pub fn detect_platform_and_arch() -> (Option<Platform>, Option<Arch>) {
    let ids = HostIdentifiers::from_env();
    let detected = detect_from(&ids.os, &ids.arch);
    debug!(
        "🔍 Host {}/{} detected as {:?}/{:?}",
        ids.os, ids.arch, detected.0, detected.1
    );
    detected
}

#[cfg(test)]
mod tests {
    use super::*;

    const OVERRIDE_HARNESS_ENV: &str = "PACKAGING_UTIL_OVERRIDE_HARNESS";

    #[test]
    fn test_platform_table() {
        let expected = [
            ("aix", Platform::Linux),
            ("alpine", Platform::Linux),
            ("darwin", Platform::Darwin),
            ("freebsd", Platform::Linux),
            ("linux", Platform::Linux),
            ("openbsd", Platform::Linux),
            ("sunos", Platform::Linux),
            ("win32", Platform::Win32),
        ];
        for (os, platform) in expected {
            assert_eq!(lookup_platform(os), Some(platform), "os {os}");
        }
        assert_eq!(PLATFORM_TABLE.len(), expected.len());
    }

    #[test]
    fn test_arch_collapses_many_to_one() {
        // Both 32-bit ARM flavors ship the arm64 artifact
        assert_eq!(lookup_arch("arm"), Some(Arch::Arm64));
        assert_eq!(lookup_arch("armhf"), Some(Arch::Arm64));
        assert_eq!(lookup_arch("arm64"), Some(Arch::Arm64));
        assert_eq!(lookup_arch("loong64"), Some(Arch::Arm64));
        assert_eq!(lookup_arch("mips"), Some(Arch::Arm64));
        assert_eq!(lookup_arch("mipsel"), Some(Arch::Arm64));
        assert_eq!(lookup_arch("riscv64"), Some(Arch::Arm64));

        assert_eq!(lookup_arch("ia32"), Some(Arch::X64));
        assert_eq!(lookup_arch("ppc"), Some(Arch::X64));
        assert_eq!(lookup_arch("ppc64"), Some(Arch::X64));
        assert_eq!(lookup_arch("s390"), Some(Arch::X64));
        assert_eq!(lookup_arch("s390x"), Some(Arch::X64));
        assert_eq!(lookup_arch("x64"), Some(Arch::X64));

        assert_eq!(ARCH_TABLE.len(), 13);
    }

    #[test]
    fn test_unknown_identifiers() {
        assert_eq!(lookup_platform("macos"), None);
        assert_eq!(lookup_platform("haiku"), None);
        assert_eq!(lookup_platform(""), None);
        assert_eq!(lookup_arch("x86_64"), None);
        assert_eq!(lookup_arch("sparc64"), None);

        assert_eq!(detect_from("plan9", "x64"), (None, Some(Arch::X64)));
        assert_eq!(detect_from("darwin", "wasm32"), (Some(Platform::Darwin), None));
        assert_eq!(detect_from("plan9", "wasm32"), (None, None));
    }

    #[test]
    fn test_rust_names_translate_to_table_keys() {
        assert_eq!(host_os_name("macos"), "darwin");
        assert_eq!(host_os_name("windows"), "win32");
        assert_eq!(host_os_name("illumos"), "sunos");
        assert_eq!(host_os_name("linux"), "linux");

        assert_eq!(host_arch_name("x86_64", true), "x64");
        assert_eq!(host_arch_name("x86", true), "ia32");
        assert_eq!(host_arch_name("aarch64", true), "arm64");
        assert_eq!(host_arch_name("powerpc64", false), "ppc64");
        assert_eq!(host_arch_name("mips", true), "mipsel");
        assert_eq!(host_arch_name("mips", false), "mips");
        assert_eq!(host_arch_name("s390x", false), "s390x");
    }

    #[test]
    fn test_current_host_is_consistent() {
        let ids = HostIdentifiers::current();
        assert!(!ids.os.is_empty() && !ids.arch.is_empty());

        #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
        assert!(lookup_platform(&ids.os).is_some(), "unmapped os {}", ids.os);
        #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
        assert!(lookup_arch(&ids.arch).is_some(), "unmapped arch {}", ids.arch);

        #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
        assert_eq!(
            detect_from(&ids.os, &ids.arch),
            (Some(Platform::Linux), Some(Arch::X64))
        );
        #[cfg(all(target_os = "macos", target_arch = "aarch64"))]
        assert_eq!(
            detect_from(&ids.os, &ids.arch),
            (Some(Platform::Darwin), Some(Arch::Arm64))
        );
    }

    /// Only does work when re-executed by the override tests below
    #[test]
    fn host_override_child() {
        if std::env::var_os(OVERRIDE_HARNESS_ENV).is_none() {
            return;
        }
        let ids = HostIdentifiers::from_env();
        let (platform, arch) = detect_platform_and_arch();
        println!("HOST os={} arch={} detected={platform:?}/{arch:?}", ids.os, ids.arch);
    }

    fn run_override_child(os: Option<&str>, arch: Option<&str>) -> String {
        let exe = std::env::current_exe().unwrap();
        let mut cmd = std::process::Command::new(exe);
        cmd.args([
            "--exact",
            "platform::tests::host_override_child",
            "--nocapture",
            "--test-threads=1",
        ])
        .env(OVERRIDE_HARNESS_ENV, "1")
        .env_remove(HOST_OS_ENV)
        .env_remove(HOST_ARCH_ENV);
        if let Some(os) = os {
            cmd.env(HOST_OS_ENV, os);
        }
        if let Some(arch) = arch {
            cmd.env(HOST_ARCH_ENV, arch);
        }

        let output = cmd.output().unwrap();
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    #[test]
    fn test_env_overrides_host_identifiers() {
        let stdout = run_override_child(Some("win32"), Some("armhf"));
        assert!(stdout.contains("HOST os=win32 arch=armhf"), "{stdout}");
        assert!(stdout.contains("detected=Some(Win32)/Some(Arm64)"), "{stdout}");
    }

    #[test]
    fn test_blank_override_falls_back_to_host() {
        let current = HostIdentifiers::current();
        let stdout = run_override_child(Some("   "), None);
        assert!(
            stdout.contains(&format!("HOST os={} arch={} ", current.os, current.arch)),
            "{stdout}"
        );
    }

    #[test]
    fn test_tags_serialize_as_strings() {
        assert_eq!(serde_json::to_string(&Platform::Win32).unwrap(), "\"win32\"");
        assert_eq!(serde_json::to_string(&Arch::Arm64).unwrap(), "\"arm64\"");
        assert_eq!(Platform::Darwin.to_string(), "darwin");
        assert_eq!(Arch::X64.to_string(), "x64");
    }
}
