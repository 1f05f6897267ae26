//! Case-sensitivity remediation for debug-tool config files.
//!
//! The bundled OpenOCD target configs were authored with inconsistent case,
//! and downstream tooling references the uppercase form. On a case-sensitive
//! filesystem those lookups miss, so the installer plants uppercase symlink
//! aliases next to the canonical lowercase files. Windows and macOS default
//! to case-insensitive filesystems and need nothing.

use crate::operation::Operation;

/// Subdirectory of the install tree holding the debug-tool target configs.
pub(crate) const TARGET_CFG_SUBDIR: &str = "Tools/OpenOCD/scripts/target";

/// Device identifiers whose config files need an uppercase alias.
///
/// Canonical file is `<lower>.cfg`, alias is `<UPPER>.cfg`.
pub(crate) const CASE_ALIAS_DEVICES: [&str; 14] = [
    "max32520",
    "max32570",
    "max32650",
    "max32655",
    "max32660",
    "max32662",
    "max32665",
    "max32670",
    "max32672",
    "max32675",
    "max32680",
    "max32690",
    "max78000",
    "max78002",
];

/// Symlink operations planting the uppercase aliases.
///
/// The links are independent of each other but all require the target
/// directory to exist, so they are planned after the host has laid down
/// the install tree.
pub(crate) fn symlink_operations(target_dir: &str) -> Vec<Operation> {
    let dir = format!("{}/{}", target_dir.trim_end_matches('/'), TARGET_CFG_SUBDIR);
    CASE_ALIAS_DEVICES
        .iter()
        .map(|device| Operation::RunCommand {
            program: "ln".to_string(),
            args: vec![
                "-sf".to_string(),
                format!("{dir}/{device}.cfg"),
                format!("{dir}/{}.cfg", device.to_uppercase()),
            ],
        })
        .collect()
}
