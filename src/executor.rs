//! Reference serial executor for install plans.
//!
//! Production hosts have their own operation engine with retry and rollback
//! policies; this executor exists for consumers embedding the planner
//! without a full installer framework. It applies a plan's operations
//! strictly in order, one at a time, with a per-operation timeout.
//!
//! `ShowDialog` operations are not executable here. Dialogs belong to the
//! host UI, and plans produced by this crate only carry them as fallbacks.

use crate::errors::ExecuteError;
use crate::operation::{DialogSpec, EnvVarScope, InstallPlan, Operation};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Options for controlling plan execution.
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Maximum time any single operation may run.
    ///
    /// Default: 5 minutes. The IDE installer download dominates; everything
    /// else finishes in seconds.
    pub timeout: Duration,

    /// Shell profile file that user-scope environment variables are
    /// appended to on Unix. Defaults to `$HOME/.profile`.
    pub profile_path: Option<PathBuf>,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            profile_path: None,
        }
    }
}

/// Progress stages reported while executing a plan.
#[derive(Debug, Clone)]
pub enum ExecuteProgress {
    /// Execution has started.
    Started {
        /// Number of operations in the plan.
        total: usize,
    },

    /// An operation is about to execute.
    Executing {
        /// Zero-based position in the plan.
        index: usize,
        /// Short description of the operation.
        description: String,
    },

    /// An operation finished successfully.
    Completed {
        /// Zero-based position in the plan.
        index: usize,
    },

    /// Every operation in the plan has been applied.
    Finished,
}

/// Execute a plan's operations serially, in order.
///
/// Stops at the first failure; operations already applied are not rolled
/// back (rollback is host-framework territory). The plan's control signal
/// is not interpreted here — by construction a plan only contains the
/// operations that were committed before any abort.
///
/// # Example
///
/// ```rust,no_run
/// use sdk_installer_hooks::{execute_plan, ExecuteOptions, InstallPlan};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let plan = InstallPlan::default();
///     let result = execute_plan(&plan, ExecuteOptions::default(), |progress| {
///         println!("{:?}", progress);
///     })
///     .await;
///
///     match result {
///         Ok(()) => println!("plan applied"),
///         Err(e) => println!("failed: {}. Fix: {}", e, e.fix_suggestion()),
///     }
/// }
/// ```
pub async fn execute_plan<F>(
    plan: &InstallPlan,
    options: ExecuteOptions,
    on_progress: F,
) -> Result<(), ExecuteError>
where
    F: Fn(ExecuteProgress) + Send + Sync,
{
    on_progress(ExecuteProgress::Started {
        total: plan.operations.len(),
    });

    for (index, operation) in plan.operations.iter().enumerate() {
        on_progress(ExecuteProgress::Executing {
            index,
            description: describe(operation),
        });
        execute_operation(operation, &options).await?;
        on_progress(ExecuteProgress::Completed { index });
    }

    on_progress(ExecuteProgress::Finished);
    Ok(())
}

/// Short human-readable description of an operation for progress reporting.
fn describe(operation: &Operation) -> String {
    match operation {
        Operation::DefineEnvVar { name, .. } => format!("set environment variable {name}"),
        Operation::RunCommand { program, .. } => format!("run {program}"),
        Operation::RunElevatedCommand { program, .. } => format!("run {program} (elevated)"),
        Operation::OpenUrl { url } => format!("open {url}"),
        Operation::ShowDialog(spec) => format!("show dialog {}", spec.id),
    }
}

async fn execute_operation(
    operation: &Operation,
    options: &ExecuteOptions,
) -> Result<(), ExecuteError> {
    match operation {
        Operation::RunCommand { program, args } => {
            run_checked(program, args, options.timeout).await
        }
        Operation::RunElevatedCommand { program, args } => {
            run_elevated(program, args, options.timeout).await
        }
        Operation::OpenUrl { url } => {
            let (program, args) = opener_command(url);
            run_checked(&program, &args, options.timeout).await
        }
        Operation::DefineEnvVar { name, value, scope } => {
            persist_env_var(name, value, *scope, options).await
        }
        Operation::ShowDialog(spec) => Err(dialog_unsupported(spec)),
    }
}

fn dialog_unsupported(spec: &DialogSpec) -> ExecuteError {
    ExecuteError::DialogUnsupported {
        dialog_id: spec.id.clone(),
        fix: "Present dialogs through the host UI; the reference executor cannot render them."
            .to_string(),
    }
}

/// Platform command that opens a URL or document in the default handler.
fn opener_command(url: &str) -> (String, Vec<String>) {
    #[cfg(target_os = "windows")]
    {
        (
            "cmd".to_string(),
            vec!["/C".to_string(), "start".to_string(), String::new(), url.to_string()],
        )
    }
    #[cfg(target_os = "macos")]
    {
        ("open".to_string(), vec![url.to_string()])
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        ("xdg-open".to_string(), vec![url.to_string()])
    }
}

/// Run `program` with elevation.
///
/// Unix wraps the command in `sudo`; Windows relaunches it through
/// PowerShell with the RunAs verb.
async fn run_elevated(
    program: &str,
    args: &[String],
    duration: Duration,
) -> Result<(), ExecuteError> {
    ensure_available(program)?;

    #[cfg(not(target_os = "windows"))]
    {
        let mut sudo_args = vec![program.to_string()];
        sudo_args.extend_from_slice(args);
        run_checked("sudo", &sudo_args, duration).await
    }

    #[cfg(target_os = "windows")]
    {
        let arg_list = args
            .iter()
            .map(|a| format!("'{}'", a.replace('\'', "''")))
            .collect::<Vec<_>>()
            .join(",");
        let script = format!("Start-Process '{program}' -ArgumentList {arg_list} -Verb RunAs -Wait");
        run_checked(
            "powershell",
            &["-Command".to_string(), script],
            duration,
        )
        .await
    }
}

fn ensure_available(program: &str) -> Result<(), ExecuteError> {
    which::which(program).map_err(|_| ExecuteError::ProgramNotFound {
        program: program.to_string(),
        fix: format!("Install {program} or make sure it is on PATH"),
    })?;
    Ok(())
}

/// Run a command with a timeout, classifying failures.
async fn run_checked(
    program: &str,
    args: &[String],
    duration: Duration,
) -> Result<(), ExecuteError> {
    ensure_available(program)?;

    let mut command = Command::new(program);
    command
        .args(args)
        .kill_on_drop(true)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!(program, ?args, "executing operation");

    let output = match timeout(duration, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                return Err(ExecuteError::PermissionDenied {
                    message: e.to_string(),
                    fix: "Re-run with appropriate permissions".to_string(),
                });
            }
            return Err(ExecuteError::Io {
                program: program.to_string(),
                source: e,
                fix: "Check the command and try again".to_string(),
            });
        }
        Err(_) => {
            return Err(ExecuteError::Timeout {
                duration,
                fix: format!(
                    "Operation timed out after {duration:?}. Try a longer timeout or check the network."
                ),
            });
        }
    };

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let is_network = stderr.contains("network")
            || stderr.contains("connection")
            || stderr.contains("resolve")
            || stderr.contains("ETIMEDOUT")
            || stderr.contains("ENOTFOUND");

        if is_network {
            return Err(ExecuteError::Network {
                message: format!("Network error while running {program}"),
                stderr: Some(stderr),
                fix: "Check your internet connection and try again".to_string(),
            });
        }

        return Err(ExecuteError::CommandFailed {
            message: format!("{program} exited with code {:?}", output.status.code()),
            exit_code: output.status.code(),
            stdout: Some(stdout),
            stderr: Some(stderr),
            fix: "See command output for details".to_string(),
        });
    }

    Ok(())
}

/// Persist an environment variable.
///
/// User scope uses `setx` on Windows and a profile-file append on Unix.
/// System scope needs the host framework's elevation machinery and is
/// rejected here.
async fn persist_env_var(
    name: &str,
    value: &str,
    scope: EnvVarScope,
    options: &ExecuteOptions,
) -> Result<(), ExecuteError> {
    if scope == EnvVarScope::System {
        return Err(ExecuteError::PermissionDenied {
            message: format!("system-scope environment variable {name}"),
            fix: "System-scope variables must be written by the host framework's elevated engine"
                .to_string(),
        });
    }

    #[cfg(target_os = "windows")]
    {
        run_checked(
            "setx",
            &[name.to_string(), value.to_string()],
            options.timeout,
        )
        .await
    }

    #[cfg(not(target_os = "windows"))]
    {
        let profile = match &options.profile_path {
            Some(path) => path.clone(),
            None => default_profile_path()?,
        };
        append_export_line(&profile, name, value).map_err(|e| ExecuteError::Io {
            program: "profile append".to_string(),
            source: e,
            fix: format!("Check that {} is writable", profile.display()),
        })?;
        warn!(
            name,
            profile = %profile.display(),
            "environment variable appended to profile; takes effect in new shells"
        );
        Ok(())
    }
}

#[cfg(not(target_os = "windows"))]
fn default_profile_path() -> Result<PathBuf, ExecuteError> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".profile"))
        .ok_or_else(|| ExecuteError::PermissionDenied {
            message: "HOME is not set".to_string(),
            fix: "Set HOME, or pass an explicit profile_path in ExecuteOptions".to_string(),
        })
}

#[cfg(not(target_os = "windows"))]
fn append_export_line(profile: &std::path::Path, name: &str, value: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(profile)?;
    writeln!(file, "export {name}=\"{value}\"")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{ControlSignal, DialogButton};
    use std::sync::{Arc, Mutex};

    fn plan(operations: Vec<Operation>) -> InstallPlan {
        InstallPlan {
            operations,
            control: ControlSignal::Continue,
        }
    }

    #[tokio::test]
    async fn test_empty_plan_reports_started_and_finished() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let stages_clone = stages.clone();

        execute_plan(&plan(vec![]), ExecuteOptions::default(), move |progress| {
            stages_clone.lock().unwrap().push(format!("{progress:?}"));
        })
        .await
        .unwrap();

        let stages = stages.lock().unwrap();
        assert_eq!(stages.len(), 2);
        assert!(stages[0].contains("Started"));
        assert!(stages[1].contains("Finished"));
    }

    #[tokio::test]
    async fn test_run_command_success() {
        let operations = vec![Operation::RunCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "true".to_string()],
        }];
        let result = execute_plan(&plan(operations), ExecuteOptions::default(), |_| {}).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_missing_program_is_program_not_found() {
        let operations = vec![Operation::RunCommand {
            program: "definitely_not_a_real_program_xyz123".to_string(),
            args: vec![],
        }];
        let err = execute_plan(&plan(operations), ExecuteOptions::default(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, ExecuteError::ProgramNotFound { .. }));
        assert!(!err.fix_suggestion().is_empty());
    }

    #[tokio::test]
    async fn test_failing_command_stops_execution() {
        let executed_second = Arc::new(Mutex::new(false));
        let executed_second_clone = executed_second.clone();

        let operations = vec![
            Operation::RunCommand {
                program: "sh".to_string(),
                args: vec!["-c".to_string(), "exit 3".to_string()],
            },
            Operation::RunCommand {
                program: "sh".to_string(),
                args: vec!["-c".to_string(), "true".to_string()],
            },
        ];
        let err = execute_plan(&plan(operations), ExecuteOptions::default(), move |progress| {
            if let ExecuteProgress::Executing { index: 1, .. } = progress {
                *executed_second_clone.lock().unwrap() = true;
            }
        })
        .await
        .unwrap_err();

        match err {
            ExecuteError::CommandFailed { exit_code, .. } => assert_eq!(exit_code, Some(3)),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
        assert!(!*executed_second.lock().unwrap());
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let operations = vec![Operation::RunCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "sleep 5".to_string()],
        }];
        let options = ExecuteOptions {
            timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let err = execute_plan(&plan(operations), options, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, ExecuteError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_show_dialog_is_unsupported() {
        let operations = vec![Operation::ShowDialog(DialogSpec {
            id: "warn".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            buttons: vec![DialogButton::Ok],
            default_cancel: false,
        })];
        let err = execute_plan(&plan(operations), ExecuteOptions::default(), |_| {})
            .await
            .unwrap_err();
        match err {
            ExecuteError::DialogUnsupported { dialog_id, .. } => assert_eq!(dialog_id, "warn"),
            other => panic!("expected DialogUnsupported, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_system_scope_env_var_is_rejected() {
        let operations = vec![Operation::DefineEnvVar {
            name: "X".to_string(),
            value: "1".to_string(),
            scope: EnvVarScope::System,
        }];
        let err = execute_plan(&plan(operations), ExecuteOptions::default(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, ExecuteError::PermissionDenied { .. }));
    }

    #[cfg(not(target_os = "windows"))]
    #[tokio::test]
    async fn test_user_env_var_appends_export_line() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join(".profile");
        let operations = vec![Operation::DefineEnvVar {
            name: "MAXIM_PATH".to_string(),
            value: "/opt/MaximSDK".to_string(),
            scope: EnvVarScope::User,
        }];
        let options = ExecuteOptions {
            profile_path: Some(profile.clone()),
            ..Default::default()
        };
        execute_plan(&plan(operations), options, |_| {})
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&profile).unwrap();
        assert_eq!(contents, "export MAXIM_PATH=\"/opt/MaximSDK\"\n");
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_append_export_line_appends_not_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join(".profile");
        std::fs::write(&profile, "# existing\n").unwrap();
        append_export_line(&profile, "A", "1").unwrap();
        append_export_line(&profile, "B", "2").unwrap();
        let contents = std::fs::read_to_string(&profile).unwrap();
        assert_eq!(contents, "# existing\nexport A=\"1\"\nexport B=\"2\"\n");
    }

    #[test]
    fn test_describe_operations() {
        assert_eq!(
            describe(&Operation::OpenUrl {
                url: "https://brew.sh".to_string()
            }),
            "open https://brew.sh"
        );
        assert_eq!(
            describe(&Operation::RunElevatedCommand {
                program: "brew".to_string(),
                args: vec![]
            }),
            "run brew (elevated)"
        );
    }
}
