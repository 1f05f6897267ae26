//! Sequencer configuration.
//!
//! Historically this logic shipped as four near-identical installer scripts
//! differing only in which optional stages they performed. That duplication
//! collapses into one implementation parameterized by [`StageToggles`], with
//! the version strings and URLs that used to be inline constants exposed as
//! [`SequencerConfig`] fields.

use serde::{Deserialize, Serialize};

/// Default IDE version fetched when the IDE is not yet present.
pub const DEFAULT_IDE_VERSION: &str = "1.65.2";

/// Default base URL for IDE installer downloads.
pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://update.code.visualstudio.com/";

/// Default environment variable advertising the install location.
pub const DEFAULT_ENV_VAR_NAME: &str = "MAXIM_PATH";

/// Default release tag for readme / release-notes links.
pub const DEFAULT_RELEASE_TAG: &str = "v1.4.0";

/// Default repository URL the readme and release notes live under.
pub const DEFAULT_REPO_URL: &str = "https://github.com/MaximIntegratedTechSupport/VSCode-Maxim";

/// Readme location under the install tree, relative to the target directory.
pub const LOCAL_README_RELATIVE_PATH: &str = "Tools/VSCode-Maxim/readme.md";

/// Which optional stages the sequencer performs.
///
/// All stages default to enabled; hosts building a reduced installer variant
/// turn individual stages off instead of shipping a separate script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageToggles {
    /// Offer to download and launch the IDE installer.
    pub download_ide: bool,
    /// Create uppercase symlink aliases for debug-tool config files (Linux).
    pub symlink_remediation: bool,
    /// Prompt to install native library dependencies (macOS).
    pub package_dependency_prompt: bool,
}

impl Default for StageToggles {
    fn default() -> Self {
        Self {
            download_ide: true,
            symlink_remediation: true,
            package_dependency_prompt: true,
        }
    }
}

/// Where the post-install notice sends the user for the readme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadmeLocation {
    /// Open the readme on the repository page for the configured tag.
    Remote,
    /// Open the local copy under the target directory.
    Local,
}

/// Configuration for both planning entry points.
///
/// [`Default`] reproduces the constants the production installer ships with;
/// hosts override fields for staging servers, pinned IDE versions, or
/// reduced installer variants.
///
/// # Example
///
/// ```rust
/// use sdk_installer_hooks::{SequencerConfig, StageToggles};
///
/// // Variant without the IDE download stage
/// let config = SequencerConfig {
///     stages: StageToggles {
///         download_ide: false,
///         ..Default::default()
///     },
///     target_dir: "/opt/sdk".to_string(),
///     ..Default::default()
/// };
/// assert!(!config.stages.download_ide);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Which optional stages are active.
    pub stages: StageToggles,

    /// IDE version to fetch when the download stage runs.
    pub ide_version: String,

    /// Base URL the download URL is built from. Must end with `/`.
    pub download_base_url: String,

    /// Name of the environment variable that advertises the install path.
    pub env_var_name: String,

    /// Install target directory. The host substitutes its own target-dir
    /// token before calling the planner.
    pub target_dir: String,

    /// Release tag referenced by the post-install readme and release notes.
    pub release_tag: String,

    /// Repository URL the readme and release notes live under.
    pub repo_url: String,

    /// Whether the post-install notice opens the remote or local readme.
    pub readme_location: ReadmeLocation,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            stages: StageToggles::default(),
            ide_version: DEFAULT_IDE_VERSION.to_string(),
            download_base_url: DEFAULT_DOWNLOAD_BASE_URL.to_string(),
            env_var_name: DEFAULT_ENV_VAR_NAME.to_string(),
            target_dir: String::new(),
            release_tag: DEFAULT_RELEASE_TAG.to_string(),
            repo_url: DEFAULT_REPO_URL.to_string(),
            readme_location: ReadmeLocation::Remote,
        }
    }
}

impl SequencerConfig {
    /// Remote readme URL for the configured tag.
    pub fn remote_readme_url(&self) -> String {
        format!(
            "{}/tree/{}/readme.md#vscode-maxim",
            self.repo_url, self.release_tag
        )
    }

    /// Release-notes URL for the configured tag.
    pub fn release_notes_url(&self) -> String {
        format!("{}/releases/tag/{}", self.repo_url, self.release_tag)
    }

    /// Absolute path of the local readme copy under the target directory.
    pub fn local_readme_path(&self) -> String {
        format!(
            "{}/{}",
            self.target_dir.trim_end_matches('/'),
            LOCAL_README_RELATIVE_PATH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_constants() {
        let config = SequencerConfig::default();
        assert_eq!(config.ide_version, "1.65.2");
        assert_eq!(
            config.download_base_url,
            "https://update.code.visualstudio.com/"
        );
        assert_eq!(config.env_var_name, "MAXIM_PATH");
        assert_eq!(config.release_tag, "v1.4.0");
        assert!(config.stages.download_ide);
        assert!(config.stages.symlink_remediation);
        assert!(config.stages.package_dependency_prompt);
        assert_eq!(config.readme_location, ReadmeLocation::Remote);
    }

    #[test]
    fn test_remote_readme_url() {
        let config = SequencerConfig::default();
        assert_eq!(
            config.remote_readme_url(),
            "https://github.com/MaximIntegratedTechSupport/VSCode-Maxim/tree/v1.4.0/readme.md#vscode-maxim"
        );
    }

    #[test]
    fn test_release_notes_url() {
        let config = SequencerConfig::default();
        assert_eq!(
            config.release_notes_url(),
            "https://github.com/MaximIntegratedTechSupport/VSCode-Maxim/releases/tag/v1.4.0"
        );
    }

    #[test]
    fn test_local_readme_path_strips_trailing_slash() {
        let config = SequencerConfig {
            target_dir: "/opt/MaximSDK/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.local_readme_path(),
            "/opt/MaximSDK/Tools/VSCode-Maxim/readme.md"
        );
    }
}
