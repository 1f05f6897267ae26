//! IDE installer download URL and command construction.
//!
//! The download matrix only has builds for a few (os, arch) pairs. Anything
//! outside the matrix fails closed with [`PlanError::UnsupportedPlatform`]
//! instead of producing a command around a malformed URL.

use crate::config::SequencerConfig;
use crate::errors::PlanError;
use crate::operation::Operation;
use crate::platform::{Arch, OsFamily, PlatformInfo};

/// Platform-specific URL segment for the IDE download matrix.
///
/// `win32-x64-user/stable` on 64-bit Windows, `linux-x64/stable` on 64-bit
/// Linux, `darwin/stable` on macOS (any architecture).
pub(crate) fn platform_segment(platform: PlatformInfo) -> Result<&'static str, PlanError> {
    match (platform.os, platform.arch) {
        (OsFamily::Windows, Arch::X86_64) => Ok("win32-x64-user/stable"),
        (OsFamily::Linux, Arch::X86_64) => Ok("linux-x64/stable"),
        (OsFamily::MacOs, _) => Ok("darwin/stable"),
        (os, arch) => Err(PlanError::UnsupportedPlatform {
            os,
            arch,
            fix: format!(
                "No IDE installer build exists for {} / {}. Download and install the IDE manually.",
                os.display_name(),
                arch.display_name()
            ),
        }),
    }
}

/// Full download URL for the configured IDE version on this platform.
pub(crate) fn download_url(
    platform: PlatformInfo,
    config: &SequencerConfig,
) -> Result<String, PlanError> {
    let segment = platform_segment(platform)?;
    Ok(format!(
        "{}{}/{}",
        config.download_base_url, config.ide_version, segment
    ))
}

/// The single download-and-run operation for this platform.
///
/// Download, synchronous launch, and cleanup are one command string on
/// purpose: if the launch were a separate operation it could start before
/// the file is fully written. The shell chain (`&&` on POSIX, sequential
/// statements with `-Wait` in PowerShell) is the completion barrier.
pub(crate) fn download_and_run_operation(platform: PlatformInfo, url: &str) -> Operation {
    match platform.os {
        OsFamily::Windows => Operation::RunCommand {
            program: "powershell".to_string(),
            // SilentlyContinue suppresses the progress bar, which slows the
            // download down dramatically.
            args: vec![
                "-Command".to_string(),
                format!(
                    "$ProgressPreference = 'SilentlyContinue'; \
                     Invoke-WebRequest \"{url}\" -OutFile vscode-installer.exe; \
                     Start-Process vscode-installer.exe -Wait; \
                     Remove-Item vscode-installer.exe"
                ),
            ],
        },
        _ => Operation::RunCommand {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                format!(
                    "wget -q \"{url}\" -O vscode-installer && \
                     chmod +x vscode-installer && \
                     ./vscode-installer && \
                     rm vscode-installer"
                ),
            ],
        },
    }
}
