//! Error types for planning and plan execution.
//!
//! Each variant carries a `fix` field with an actionable suggestion, so a
//! host can show users what to do next instead of a bare failure message.
//! Declined dialogs are never errors; they are ordinary branches of the
//! plan.

use crate::platform::{Arch, OsFamily};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while planning operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlanError {
    /// No IDE installer build exists for this (os, arch) combination.
    ///
    /// The sequencer fails closed here rather than emit a download command
    /// with a malformed URL.
    #[error("No IDE installer build for {} / {}", .os.display_name(), .arch.display_name())]
    UnsupportedPlatform {
        /// Operating system family that was requested.
        os: OsFamily,
        /// Architecture that was requested.
        arch: Arch,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The confirm callback could not present a dialog (headless host).
    ///
    /// A missing answer is a hard failure, never an implicit default.
    #[error("Cannot present dialog '{dialog_id}': no UI available")]
    DialogUnavailable {
        /// Identifier of the dialog that could not be shown.
        dialog_id: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },
}

impl PlanError {
    /// Get an actionable suggestion for fixing this error.
    pub fn fix_suggestion(&self) -> &str {
        match self {
            Self::UnsupportedPlatform { fix, .. } => fix,
            Self::DialogUnavailable { fix, .. } => fix,
        }
    }
}

/// Errors that can occur while executing a plan.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecuteError {
    /// The program named by an operation was not found on PATH.
    #[error("Program not found: {program}")]
    ProgramNotFound {
        /// Program that could not be located.
        program: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// Spawning or waiting on a process failed at the OS level.
    #[error("I/O error while executing {program}: {source}")]
    Io {
        /// Program being executed.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The command's output looks like a network failure.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
        /// Standard error output from the failed command, if available.
        stderr: Option<String>,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// Permission was denied executing an operation.
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Description of what permission was denied.
        message: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// An operation did not complete within the configured timeout.
    #[error("Operation timed out after {duration:?}")]
    Timeout {
        /// How long the operation was allowed to run.
        duration: Duration,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// A command exited with a non-zero status.
    #[error("Command failed: {message}")]
    CommandFailed {
        /// Description of the failure.
        message: String,
        /// Exit code, if available.
        exit_code: Option<i32>,
        /// Standard output, if captured.
        stdout: Option<String>,
        /// Standard error, if captured.
        stderr: Option<String>,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// A `ShowDialog` operation reached the executor.
    ///
    /// Dialogs belong to the host UI; the reference executor cannot render
    /// them.
    #[error("Cannot execute dialog '{dialog_id}' without a UI")]
    DialogUnsupported {
        /// Identifier of the dialog operation.
        dialog_id: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },
}

impl ExecuteError {
    /// Get an actionable suggestion for fixing this error.
    pub fn fix_suggestion(&self) -> &str {
        match self {
            Self::ProgramNotFound { fix, .. } => fix,
            Self::Io { fix, .. } => fix,
            Self::Network { fix, .. } => fix,
            Self::PermissionDenied { fix, .. } => fix,
            Self::Timeout { fix, .. } => fix,
            Self::CommandFailed { fix, .. } => fix,
            Self::DialogUnsupported { fix, .. } => fix,
        }
    }
}
