//! Planned operations, dialogs, and the install plan itself.
//!
//! The sequencer never performs side effects; it produces [`Operation`]
//! values in the exact order the host must execute them, together with a
//! [`ControlSignal`] telling the host whether to keep going. Operations are
//! serde-serializable so hosts can persist or inspect a plan before applying
//! it.

use serde::{Deserialize, Serialize};

/// Scope at which an environment variable is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvVarScope {
    /// Per-user persistence; no elevation needed. The sequencer only ever
    /// emits this scope.
    User,
    /// Machine-wide persistence; requires elevation.
    System,
}

/// Buttons a dialog can offer, and equally the decision a user can return.
///
/// The same enum serves both roles: a [`DialogSpec`] lists the buttons it
/// offers, and the confirm callback answers with the one that was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum DialogButton {
    /// Affirmative answer to a yes/no question.
    Yes,
    /// Negative answer to a yes/no question; a valid branch, not an error.
    No,
    /// Acknowledgement.
    Ok,
    /// Decline / abort.
    Cancel,
    /// "Open the linked page instead" (used by the dependency prompt).
    Open,
}

/// The user's answer to a [`DialogSpec`], consumed immediately by the branch
/// that issued the dialog.
pub type UserDecision = DialogButton;

/// A modal prompt for the host UI to render.
///
/// # Example
///
/// ```rust
/// use sdk_installer_hooks::{DialogButton, DialogSpec};
///
/// let spec = DialogSpec {
///     id: "ide.download".to_string(),
///     title: "SDK Installer".to_string(),
///     body: "Download the IDE now?".to_string(),
///     buttons: vec![DialogButton::Yes, DialogButton::No],
///     default_cancel: false,
/// };
/// assert!(spec.offers(DialogButton::Yes));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSpec {
    /// Stable identifier for the dialog (e.g. `"vscode.question"`), usable
    /// by hosts for scripted/unattended answers.
    pub id: String,

    /// Window title.
    pub title: String,

    /// Message body.
    pub body: String,

    /// Buttons offered, in display order.
    pub buttons: Vec<DialogButton>,

    /// Whether dismissing the dialog (Esc / close) maps to Cancel.
    pub default_cancel: bool,
}

impl DialogSpec {
    /// Whether this dialog offers the given button.
    pub fn offers(&self, button: DialogButton) -> bool {
        self.buttons.contains(&button)
    }
}

/// A single planned side-effecting action for the host framework to carry
/// out.
///
/// Operations are produced in execution order and never mutated. Ordering
/// matters: a downloaded installer must be fetched before it is launched,
/// and symlinks must come after the target directory exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Persist an environment variable.
    DefineEnvVar {
        /// Variable name (e.g. `MAXIM_PATH`).
        name: String,
        /// Variable value; for the install-path variable this is the target
        /// directory.
        value: String,
        /// Persistence scope.
        scope: EnvVarScope,
    },

    /// Execute a program with ordinary privileges.
    RunCommand {
        /// Program to execute (e.g. `powershell`, `sh`, `ln`).
        program: String,
        /// Arguments, in order.
        args: Vec<String>,
    },

    /// Execute a program with elevated privileges (e.g. a system package
    /// installation).
    RunElevatedCommand {
        /// Program to execute.
        program: String,
        /// Arguments, in order.
        args: Vec<String>,
    },

    /// Open a URL (or local document) in the user's default handler.
    OpenUrl {
        /// Target URL or absolute file path.
        url: String,
    },

    /// Display a dialog. Plans only carry this as a fallback (e.g. the
    /// "open the readme manually" warning); interactive questions go
    /// through the confirm callback at planning time instead.
    ShowDialog(DialogSpec),
}

impl Operation {
    /// Whether executing this operation requires elevated privileges.
    pub fn requires_elevation(&self) -> bool {
        matches!(
            self,
            Self::RunElevatedCommand { .. }
                | Self::DefineEnvVar {
                    scope: EnvVarScope::System,
                    ..
                }
        )
    }
}

/// Whether the host should keep executing stages after this plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlSignal {
    /// Proceed normally.
    Continue,
    /// Stop processing further planned operations. Operations already in
    /// the plan are still valid and must be kept.
    Abort,
}

/// The sequencer's output: an ordered operation list plus the control
/// outcome.
///
/// # Example
///
/// ```rust
/// use sdk_installer_hooks::{ControlSignal, InstallPlan};
///
/// let plan = InstallPlan::default();
/// assert!(plan.operations.is_empty());
/// assert_eq!(plan.control, ControlSignal::Continue);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallPlan {
    /// Operations in the exact order they must execute.
    pub operations: Vec<Operation>,
    /// Whether the host should continue past this plan.
    pub control: ControlSignal,
}

impl Default for InstallPlan {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
            control: ControlSignal::Continue,
        }
    }
}
