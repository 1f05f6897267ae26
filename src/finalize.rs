//! Post-install finalization.
//!
//! The host's finish hook calls [`plan_post_install_notice`] exactly once
//! per session. On a successful fresh install (or component modification)
//! the user is pointed at the readme, since some manual setup remains; on a
//! successful update they are pointed at the release notes. Failures plan
//! nothing — the host already surfaced them.

use crate::config::{ReadmeLocation, SequencerConfig};
use crate::errors::PlanError;
use crate::operation::{DialogButton, DialogSpec, Operation, UserDecision};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the installer session was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum InstallMode {
    /// First-time installation.
    FreshInstall,
    /// "Add/remove components" on an existing installation.
    PackageManagerModify,
    /// Update of an existing installation.
    Update,
}

/// Overall outcome reported by the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallOutcome {
    /// All operations applied.
    Success,
    /// The session failed or was rolled back.
    Failure,
}

/// Session facts supplied by the host at finalize time. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallContext {
    /// How the session was invoked.
    pub mode: InstallMode,
    /// Whether the session succeeded.
    pub outcome: InstallOutcome,
    /// Install target directory.
    pub target_dir: String,
}

/// The planned notice: an open-document operation plus the warning to show
/// if opening fails.
///
/// The host executes `open`; only if that fails does it execute `fallback`,
/// which names the exact path for the user to open manually. An open
/// failure is never fatal to the overall install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeAction {
    /// Open the readme or release notes.
    pub open: Operation,
    /// Warning dialog with manual instructions, for when `open` fails.
    pub fallback: Operation,
}

/// Plan the post-install notice for one session.
///
/// Returns `Ok(None)` when there is nothing to show: failed sessions for
/// every mode, and sessions where the user answered Cancel (the documents
/// remain available for later).
///
/// # Example
///
/// ```rust
/// use sdk_installer_hooks::{
///     plan_post_install_notice, DialogButton, InstallContext, InstallMode, InstallOutcome,
///     SequencerConfig,
/// };
///
/// let context = InstallContext {
///     mode: InstallMode::FreshInstall,
///     outcome: InstallOutcome::Success,
///     target_dir: "/opt/MaximSDK".to_string(),
/// };
/// let config = SequencerConfig::default();
///
/// let notice = plan_post_install_notice(&context, &config, |_spec| Ok(DialogButton::Ok))
///     .unwrap()
///     .expect("fresh install plans a notice");
/// println!("{:?}", notice.open);
/// ```
pub fn plan_post_install_notice<F>(
    context: &InstallContext,
    config: &SequencerConfig,
    mut confirm: F,
) -> Result<Option<NoticeAction>, PlanError>
where
    F: FnMut(&DialogSpec) -> Result<UserDecision, PlanError>,
{
    if context.outcome != InstallOutcome::Success {
        debug!(mode = ?context.mode, "session failed, no notice planned");
        return Ok(None);
    }

    let (dialog, action) = match context.mode {
        InstallMode::FreshInstall | InstallMode::PackageManagerModify => {
            (readme_dialog(context), readme_action(context, config))
        }
        InstallMode::Update => (release_notes_dialog(config), release_notes_action(config)),
    };

    match confirm(&dialog)? {
        DialogButton::Ok => Ok(Some(action)),
        decision => {
            debug!(?decision, "user declined the post-install notice");
            Ok(None)
        }
    }
}

fn readme_dialog(context: &InstallContext) -> DialogSpec {
    DialogSpec {
        id: "vscode-maxim.finished".to_string(),
        title: "SDK Installer".to_string(),
        body: format!(
            "You have installed Visual Studio Code support for the SDK (VSCode-Maxim). \
             Some minor manual setup is required to complete the installation.\n\n\
             The VSCode-Maxim readme will now be opened. Please follow the installation \
             instructions in that document.\n\n\
             If you select 'Cancel', the readme will not be opened. Please complete the \
             installation instructions at a later time. The readme can be found at \
             {}/{}.",
            context.target_dir.trim_end_matches('/'),
            crate::config::LOCAL_README_RELATIVE_PATH
        ),
        buttons: vec![DialogButton::Ok, DialogButton::Cancel],
        default_cancel: true,
    }
}

fn readme_action(context: &InstallContext, config: &SequencerConfig) -> NoticeAction {
    let local_path = format!(
        "{}/{}",
        context.target_dir.trim_end_matches('/'),
        crate::config::LOCAL_README_RELATIVE_PATH
    );
    let url = match config.readme_location {
        ReadmeLocation::Remote => config.remote_readme_url(),
        ReadmeLocation::Local => local_path.clone(),
    };
    NoticeAction {
        open: Operation::OpenUrl { url },
        fallback: Operation::ShowDialog(DialogSpec {
            id: "vscode-maxim.readmefail".to_string(),
            title: "SDK Installer".to_string(),
            body: format!(
                "Failed to open the readme.\n\nPlease open this file manually: {local_path}"
            ),
            buttons: vec![DialogButton::Ok],
            default_cancel: false,
        }),
    }
}

fn release_notes_dialog(config: &SequencerConfig) -> DialogSpec {
    DialogSpec {
        id: "vscode-maxim.finished".to_string(),
        title: "SDK Installer".to_string(),
        body: format!(
            "Visual Studio Code support for the SDK (VSCode-Maxim) has been updated to {}.\n\n\
             The release notes for this update will now be opened.",
            config.release_tag
        ),
        buttons: vec![DialogButton::Ok, DialogButton::Cancel],
        default_cancel: true,
    }
}

fn release_notes_action(config: &SequencerConfig) -> NoticeAction {
    NoticeAction {
        open: Operation::OpenUrl {
            url: config.release_notes_url(),
        },
        fallback: Operation::ShowDialog(DialogSpec {
            id: "vscode-maxim.releasefail".to_string(),
            title: "SDK Installer".to_string(),
            body: format!(
                "Failed to open the online release notes.\n\nThey are available at {}.",
                config.release_notes_url()
            ),
            buttons: vec![DialogButton::Ok],
            default_cancel: false,
        }),
    }
}
