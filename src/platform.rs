//! Platform identification supplied to the sequencer.
//!
//! The host installer framework knows what platform it is running on; the
//! sequencer only ever sees an explicit [`PlatformInfo`] value. This keeps
//! every platform branch injectable and trivially testable — there is no
//! hidden global to stub out.

use serde::{Deserialize, Serialize};

/// Operating system family of the machine being installed to.
///
/// # Extensibility
///
/// This enum is marked `#[non_exhaustive]` so new families can be added
/// without a breaking release. Always include a wildcard arm when matching.
///
/// # Example
///
/// ```rust
/// use sdk_installer_hooks::OsFamily;
///
/// let os = OsFamily::Linux;
/// assert_eq!(os.display_name(), "Linux");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[non_exhaustive]
pub enum OsFamily {
    /// Windows (any version the host installer supports).
    Windows,
    /// Linux distributions.
    Linux,
    /// macOS.
    MacOs,
    /// Anything else; the sequencer fails closed rather than guess.
    Other,
}

impl OsFamily {
    /// Human-readable name suitable for dialog text and error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
            Self::Other => "unknown OS",
        }
    }
}

/// CPU architecture of the target machine.
///
/// Only x86-64 has IDE installer builds in the download matrix; everything
/// else is grouped as [`Arch::Other`] and rejected by the download stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[non_exhaustive]
pub enum Arch {
    /// 64-bit x86.
    X86_64,
    /// Any other architecture.
    Other,
}

impl Arch {
    /// Human-readable name suitable for error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Other => "unknown architecture",
        }
    }
}

/// Immutable platform facts supplied once per planning call.
///
/// # Example
///
/// ```rust
/// use sdk_installer_hooks::{Arch, OsFamily, PlatformInfo};
///
/// // Inject a platform explicitly (e.g. in tests)
/// let platform = PlatformInfo {
///     os: OsFamily::Linux,
///     arch: Arch::X86_64,
/// };
/// assert_eq!(platform.os, OsFamily::Linux);
///
/// // Or detect the build platform
/// let here = PlatformInfo::current();
/// println!("running on {}", here.os.display_name());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Operating system family.
    pub os: OsFamily,
    /// CPU architecture.
    pub arch: Arch,
}

impl PlatformInfo {
    /// Platform facts for the machine this crate was compiled for.
    ///
    /// Hosts embedding the planner in-process can use this directly; hosts
    /// planning for a different machine construct [`PlatformInfo`] by hand.
    pub fn current() -> Self {
        let os = if cfg!(target_os = "windows") {
            OsFamily::Windows
        } else if cfg!(target_os = "linux") {
            OsFamily::Linux
        } else if cfg!(target_os = "macos") {
            OsFamily::MacOs
        } else {
            OsFamily::Other
        };

        let arch = if cfg!(target_arch = "x86_64") {
            Arch::X86_64
        } else {
            Arch::Other
        };

        Self { os, arch }
    }
}
