//! Integration tests for the full planning flow.
//!
//! These exercise both lifecycle entry points end to end, including scripted
//! dialog answers the way an unattended host would provide them.

use sdk_installer_hooks::{
    plan_install_operations, plan_post_install_notice, Arch, ControlSignal, DialogButton,
    DialogSpec, InstallContext, InstallMode, InstallOutcome, Operation, OsFamily, PlanError,
    PlatformInfo, SequencerConfig, StageToggles, UserDecision,
};

fn config() -> SequencerConfig {
    SequencerConfig {
        target_dir: "/opt/MaximSDK".to_string(),
        ..Default::default()
    }
}

/// Scripted dialog answers keyed by dialog id, like an unattended install.
fn scripted(
    answers: Vec<(&'static str, DialogButton)>,
) -> impl FnMut(&DialogSpec) -> Result<UserDecision, PlanError> {
    let mut answers = answers.into_iter();
    move |spec| {
        let (expected_id, decision) = answers
            .next()
            .unwrap_or_else(|| panic!("unexpected dialog: {}", spec.id));
        assert_eq!(spec.id, expected_id);
        assert!(spec.offers(decision), "{} does not offer {decision:?}", spec.id);
        Ok(decision)
    }
}

#[test]
fn full_linux_install_accepting_everything() {
    let platform = PlatformInfo {
        os: OsFamily::Linux,
        arch: Arch::X86_64,
    };
    let plan = plan_install_operations(
        platform,
        &config(),
        scripted(vec![("vscode.question", DialogButton::Yes)]),
    )
    .unwrap();

    assert_eq!(plan.control, ControlSignal::Continue);
    // 1 download + 1 env var + 14 symlinks
    assert_eq!(plan.operations.len(), 16);

    // Download comes first and names the Linux build
    match &plan.operations[0] {
        Operation::RunCommand { program, args } => {
            assert_eq!(program, "sh");
            assert!(args[1].contains("linux-x64/stable"));
        }
        other => panic!("expected download command first, got {other:?}"),
    }

    // Env var before the symlinks
    assert!(matches!(
        &plan.operations[1],
        Operation::DefineEnvVar { name, .. } if name == "MAXIM_PATH"
    ));

    // The uppercase aliases cover the known worst case
    let links: Vec<_> = plan.operations[2..]
        .iter()
        .filter_map(|op| match op {
            Operation::RunCommand { program, args } if program == "ln" => Some(args),
            _ => None,
        })
        .collect();
    assert_eq!(links.len(), 14);
    assert!(links
        .iter()
        .any(|args| args[1].ends_with("max32520.cfg") && args[2].ends_with("MAX32520.cfg")));
}

#[test]
fn full_macos_install_via_homebrew_detour() {
    let platform = PlatformInfo {
        os: OsFamily::MacOs,
        arch: Arch::X86_64,
    };
    let plan = plan_install_operations(
        platform,
        &config(),
        scripted(vec![
            ("vscode.question", DialogButton::No),
            ("deps.question", DialogButton::Open),
        ]),
    )
    .unwrap();

    // Abort, but the env var planned before the prompt is kept
    assert_eq!(plan.control, ControlSignal::Abort);
    assert_eq!(plan.operations.len(), 2);
    assert!(matches!(&plan.operations[0], Operation::DefineEnvVar { .. }));
    assert!(matches!(
        &plan.operations[1],
        Operation::OpenUrl { url } if url == "https://brew.sh"
    ));
}

#[test]
fn windows_install_with_download_only() {
    let platform = PlatformInfo {
        os: OsFamily::Windows,
        arch: Arch::X86_64,
    };
    let plan = plan_install_operations(
        platform,
        &config(),
        scripted(vec![("vscode.question", DialogButton::Yes)]),
    )
    .unwrap();

    // Download + env var, nothing platform-conditional
    assert_eq!(plan.operations.len(), 2);
    match &plan.operations[0] {
        Operation::RunCommand { program, args } => {
            assert_eq!(program, "powershell");
            assert!(args[1].contains("win32-x64-user/stable"));
        }
        other => panic!("expected powershell download, got {other:?}"),
    }
}

#[test]
fn reduced_variant_with_all_stages_off_plans_only_the_env_var() {
    let platform = PlatformInfo {
        os: OsFamily::MacOs,
        arch: Arch::Other,
    };
    let config = SequencerConfig {
        stages: StageToggles {
            download_ide: false,
            symlink_remediation: false,
            package_dependency_prompt: false,
        },
        ..config()
    };
    let plan = plan_install_operations(platform, &config, scripted(vec![])).unwrap();
    assert_eq!(plan.operations.len(), 1);
    assert!(matches!(&plan.operations[0], Operation::DefineEnvVar { .. }));
}

#[test]
fn unsupported_arch_fails_before_any_dialog() {
    let platform = PlatformInfo {
        os: OsFamily::Windows,
        arch: Arch::Other,
    };
    let err = plan_install_operations(platform, &config(), scripted(vec![])).unwrap_err();
    assert!(matches!(err, PlanError::UnsupportedPlatform { .. }));
}

#[test]
fn finalize_flow_per_mode_and_outcome() {
    let config = config();

    // Failure: nothing, ever
    for mode in [
        InstallMode::FreshInstall,
        InstallMode::PackageManagerModify,
        InstallMode::Update,
    ] {
        let context = InstallContext {
            mode,
            outcome: InstallOutcome::Failure,
            target_dir: "/opt/MaximSDK".to_string(),
        };
        let notice =
            plan_post_install_notice(&context, &config, scripted(vec![])).unwrap();
        assert!(notice.is_none());
    }

    // Fresh install, Ok: readme with a manual-path fallback
    let context = InstallContext {
        mode: InstallMode::FreshInstall,
        outcome: InstallOutcome::Success,
        target_dir: "/opt/MaximSDK".to_string(),
    };
    let notice = plan_post_install_notice(
        &context,
        &config,
        scripted(vec![("vscode-maxim.finished", DialogButton::Ok)]),
    )
    .unwrap()
    .expect("readme notice expected");
    assert!(matches!(
        &notice.open,
        Operation::OpenUrl { url } if url.contains("readme.md")
    ));
    assert!(matches!(&notice.fallback, Operation::ShowDialog(_)));

    // Update, Cancel: nothing
    let context = InstallContext {
        mode: InstallMode::Update,
        outcome: InstallOutcome::Success,
        target_dir: "/opt/MaximSDK".to_string(),
    };
    let notice = plan_post_install_notice(
        &context,
        &config,
        scripted(vec![("vscode-maxim.finished", DialogButton::Cancel)]),
    )
    .unwrap();
    assert!(notice.is_none());
}

#[test]
fn plans_serialize_for_host_inspection() {
    let platform = PlatformInfo {
        os: OsFamily::Linux,
        arch: Arch::X86_64,
    };
    let plan = plan_install_operations(
        platform,
        &config(),
        scripted(vec![("vscode.question", DialogButton::No)]),
    )
    .unwrap();

    let json = serde_json::to_string_pretty(&plan).unwrap();
    let back: sdk_installer_hooks::InstallPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(plan, back);
}
