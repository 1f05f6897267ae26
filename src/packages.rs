//! Native library dependency provisioning (macOS).
//!
//! The debug tool links against libraries that macOS does not ship. The
//! installer offers to pull them in through Homebrew; users without Homebrew
//! can jump to its homepage instead, which also aborts the remaining stages
//! so they can come back after installing it.

use crate::operation::{DialogButton, DialogSpec, Operation};

/// Homebrew packages the debug tool needs at runtime.
pub(crate) const BREW_PACKAGES: [&str; 4] = ["libusb-compat", "libftdi", "hidapi", "libusb"];

/// Homebrew homepage, offered when the user wants to install it first.
pub(crate) const HOMEBREW_URL: &str = "https://brew.sh";

/// The 4-way dependency prompt.
pub(crate) fn dependency_dialog() -> DialogSpec {
    DialogSpec {
        id: "deps.question".to_string(),
        title: "SDK Installer".to_string(),
        body: format!(
            "The debug tools require the following Homebrew packages: {}.\n\n\
             Select 'Yes' to install them now (administrator privileges are required).\n\
             Select 'Open' to open the Homebrew homepage and exit setup; run the installer \
             again once Homebrew is available.\n\
             Select 'No' to skip and install the packages manually later.",
            BREW_PACKAGES.join(", ")
        ),
        buttons: vec![
            DialogButton::Yes,
            DialogButton::Open,
            DialogButton::No,
            DialogButton::Cancel,
        ],
        default_cancel: true,
    }
}

/// Elevated Homebrew install operation covering all required packages.
pub(crate) fn brew_install_operation() -> Operation {
    let mut args = vec!["install".to_string()];
    args.extend(BREW_PACKAGES.iter().map(|p| p.to_string()));
    Operation::RunElevatedCommand {
        program: "brew".to_string(),
        args,
    }
}

/// Open-homepage operation for the 'Open' branch.
pub(crate) fn homebrew_homepage_operation() -> Operation {
    Operation::OpenUrl {
        url: HOMEBREW_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_offers_all_four_choices() {
        let spec = dependency_dialog();
        assert!(spec.offers(DialogButton::Yes));
        assert!(spec.offers(DialogButton::Open));
        assert!(spec.offers(DialogButton::No));
        assert!(spec.offers(DialogButton::Cancel));
        assert!(spec.default_cancel);
    }

    #[test]
    fn test_dialog_names_every_package() {
        let spec = dependency_dialog();
        for package in BREW_PACKAGES {
            assert!(spec.body.contains(package), "missing {package}");
        }
    }

    #[test]
    fn test_brew_install_lists_all_packages_in_one_command() {
        match brew_install_operation() {
            Operation::RunElevatedCommand { program, args } => {
                assert_eq!(program, "brew");
                assert_eq!(args[0], "install");
                assert_eq!(&args[1..], BREW_PACKAGES.map(String::from));
            }
            other => panic!("expected RunElevatedCommand, got {other:?}"),
        }
    }

    #[test]
    fn test_homepage_operation() {
        match homebrew_homepage_operation() {
            Operation::OpenUrl { url } => assert_eq!(url, "https://brew.sh"),
            other => panic!("expected OpenUrl, got {other:?}"),
        }
    }
}
