//! # sdk-installer-hooks
//!
//! Install-time planning hooks for the IDE-integration component of an
//! embedded SDK installer.
//!
//! A host installer framework drives this crate at two lifecycle points:
//!
//! - **Operation planning** ([`plan_install_operations`]): given platform
//!   facts, configuration, and a modal-dialog callback, produce the ordered
//!   list of side-effecting [`Operation`]s (IDE installer download,
//!   install-path environment variable, debug-tool config symlinks, native
//!   dependency provisioning) plus a [`ControlSignal`] telling the host
//!   whether to continue.
//! - **Finalization** ([`plan_post_install_notice`]): after a successful
//!   install or update, plan the readme / release-notes notice, including
//!   the fallback warning shown when opening the document fails.
//!
//! Planning is pure: no side effects, no global state, identical inputs
//! give identical plans. The host executes the returned operations with its
//! own engine; a reference serial executor ([`execute_plan`]) is included
//! for consumers without one.
//!
//! ## Example
//!
//! ```rust
//! use sdk_installer_hooks::{
//!     plan_install_operations, DialogButton, PlatformInfo, SequencerConfig,
//! };
//!
//! let config = SequencerConfig {
//!     target_dir: "/opt/MaximSDK".to_string(),
//!     ..Default::default()
//! };
//!
//! // Accept every prompt; in a real host, `confirm` renders a modal dialog.
//! let plan = plan_install_operations(PlatformInfo::current(), &config, |_spec| {
//!     Ok(DialogButton::Yes)
//! });
//!
//! match plan {
//!     Ok(plan) => println!("{} operations planned", plan.operations.len()),
//!     Err(e) => eprintln!("{}. Fix: {}", e, e.fix_suggestion()),
//! }
//! ```

mod config;
mod download;
mod errors;
mod executor;
mod finalize;
mod operation;
mod packages;
mod platform;
mod remediation;
mod sequencer;

pub use config::{ReadmeLocation, SequencerConfig, StageToggles};
pub use errors::{ExecuteError, PlanError};
pub use executor::{execute_plan, ExecuteOptions, ExecuteProgress};
pub use finalize::{
    plan_post_install_notice, InstallContext, InstallMode, InstallOutcome, NoticeAction,
};
pub use operation::{
    ControlSignal, DialogButton, DialogSpec, EnvVarScope, InstallPlan, Operation, UserDecision,
};
pub use platform::{Arch, OsFamily, PlatformInfo};
pub use sequencer::plan_install_operations;
