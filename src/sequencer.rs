//! The installation action sequencer.
//!
//! [`plan_install_operations`] is the host framework's `createOperations`
//! hook re-expressed as a pure function: given platform facts, configuration,
//! and a synchronous confirm callback, it returns the ordered operation list
//! for the host to execute plus a control signal. Nothing here performs side
//! effects, which is what makes every branch testable by injection.

use crate::config::SequencerConfig;
use crate::download::{download_and_run_operation, download_url};
use crate::errors::PlanError;
use crate::operation::{
    ControlSignal, DialogButton, DialogSpec, EnvVarScope, InstallPlan, Operation, UserDecision,
};
use crate::platform::{OsFamily, PlatformInfo};
use crate::{packages, remediation};
use tracing::{debug, warn};

/// Plan the install-time operations for one installer session.
///
/// Stages, in order (each optional stage gated by
/// [`StageToggles`](crate::StageToggles)):
///
/// 1. IDE download: build the platform download URL (failing closed on
///    unsupported platforms), ask Yes/No, and on Yes emit a single atomic
///    download-launch-cleanup command.
/// 2. Unconditionally advertise the install location through a user-scope
///    environment variable.
/// 3. On Linux, plant uppercase symlink aliases for the debug-tool configs.
/// 4. On macOS, offer to provision native library dependencies through the
///    platform package manager; 'Open' and 'Cancel' abort the remaining
///    stages while keeping everything already planned.
///
/// The `confirm` callback represents the host's modal dialog service. It
/// blocks until the user answers; a host that cannot present UI returns
/// `Err`, which is a hard failure — there are no implicit default answers.
///
/// Planning is stateless: the same inputs always produce the same plan.
///
/// # Example
///
/// ```rust
/// use sdk_installer_hooks::{
///     plan_install_operations, Arch, DialogButton, OsFamily, PlatformInfo, SequencerConfig,
/// };
///
/// let platform = PlatformInfo { os: OsFamily::Linux, arch: Arch::X86_64 };
/// let config = SequencerConfig {
///     target_dir: "/opt/MaximSDK".to_string(),
///     ..Default::default()
/// };
///
/// // Decline every prompt: still a valid plan, just without the optional work.
/// let plan = plan_install_operations(platform, &config, |_spec| Ok(DialogButton::No)).unwrap();
/// assert!(!plan.operations.is_empty()); // env var is always planned
/// ```
pub fn plan_install_operations<F>(
    platform: PlatformInfo,
    config: &SequencerConfig,
    mut confirm: F,
) -> Result<InstallPlan, PlanError>
where
    F: FnMut(&DialogSpec) -> Result<UserDecision, PlanError>,
{
    let mut plan = InstallPlan::default();

    // Stage 1: IDE download.
    if config.stages.download_ide {
        let url = download_url(platform, config)?;
        let dialog = download_dialog(&url);
        match confirm(&dialog)? {
            DialogButton::Yes => {
                debug!(%url, "user accepted IDE download");
                plan.operations
                    .push(download_and_run_operation(platform, &url));
            }
            decision => {
                // Declining is a valid terminal outcome for this stage.
                debug!(?decision, "user declined IDE download");
            }
        }
    }

    // Stage 2: advertise the install location. User scope keeps this free
    // of elevation and discoverable by downstream tooling.
    plan.operations.push(Operation::DefineEnvVar {
        name: config.env_var_name.clone(),
        value: config.target_dir.clone(),
        scope: EnvVarScope::User,
    });

    // Stage 3: case-sensitivity remediation, Linux only.
    if config.stages.symlink_remediation && platform.os == OsFamily::Linux {
        plan.operations
            .extend(remediation::symlink_operations(&config.target_dir));
    }

    // Stage 4: native dependency provisioning, macOS only.
    if config.stages.package_dependency_prompt && platform.os == OsFamily::MacOs {
        let dialog = packages::dependency_dialog();
        match confirm(&dialog)? {
            DialogButton::Yes => {
                plan.operations.push(packages::brew_install_operation());
            }
            DialogButton::Open => {
                // Send the user to the package manager's homepage and stop;
                // everything planned so far stays valid.
                plan.operations.push(packages::homebrew_homepage_operation());
                plan.control = ControlSignal::Abort;
            }
            DialogButton::Cancel => {
                warn!("user cancelled setup at the dependency prompt");
                plan.control = ControlSignal::Abort;
            }
            decision => {
                debug!(?decision, "user skipped dependency install");
            }
        }
    }

    debug!(
        operations = plan.operations.len(),
        control = ?plan.control,
        "install plan complete"
    );
    Ok(plan)
}

/// Yes/No prompt naming the exact download URL.
fn download_dialog(url: &str) -> DialogSpec {
    DialogSpec {
        id: "vscode.question".to_string(),
        title: "SDK Installer".to_string(),
        body: format!(
            "This installer will now download and install Visual Studio Code from the \
             following URL:\n{url}\nIs this OK?\nIf you select 'No', please download and \
             install Visual Studio Code manually."
        ),
        buttons: vec![DialogButton::Yes, DialogButton::No],
        default_cancel: false,
    }
}
