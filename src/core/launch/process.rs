// ─── Process Invoker ───
// Runs the compiler command and waits for it, sharing this process's
// stdin/stdout/stderr.

use std::ffi::OsString;
use std::process::{Command, ExitStatus, Stdio};

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};

/// How the child process is started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationMode {
    /// Spawn the program directly with an argument vector. No quoting involved.
    #[default]
    Spawn,
    /// Compatibility shim: hand one quoted command string to the platform
    /// shell, as `system(3)` does. Backslashes and other shell
    /// metacharacters inside arguments are not escaped, and bytes that are
    /// not Unicode are replaced.
    Shell,
}

impl std::str::FromStr for InvocationMode {
    type Err = LauncherError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "spawn" => Ok(InvocationMode::Spawn),
            "shell" => Ok(InvocationMode::Shell),
            other => Err(LauncherError::Config(format!(
                "unknown invocation mode {:?} (expected \"spawn\" or \"shell\")",
                other
            ))),
        }
    }
}

/// Wrap `arg` in double quotes, escaping embedded double quotes.
pub fn quote_arg(arg: &str) -> String {
    format!("\"{}\"", arg.replace('"', "\\\""))
}

/// Single shell command string for `args`.
pub fn construct_command<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| quote_arg(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `args` (program first) to completion and return its exit code.
pub fn execute(args: &[OsString], mode: InvocationMode) -> LauncherResult<i32> {
    let Some((program, rest)) = args.split_first() else {
        return Err(LauncherError::JavaExecution("empty command".into()));
    };

    let command_line = construct_command(
        &args
            .iter()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>(),
    );

    let mut cmd = match mode {
        InvocationMode::Spawn => {
            let mut cmd = Command::new(program);
            cmd.args(rest);
            cmd
        }
        InvocationMode::Shell => shell_command(&command_line),
    };

    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    info!("Launching compiler ({:?}): {:?}", mode, program);
    debug!("Command (copy/paste): {}", command_line);

    let status = cmd.status().map_err(|e| {
        LauncherError::JavaExecution(format!("{}: {}", program.to_string_lossy(), e))
    })?;

    let code = exit_code(status);
    debug!("Compiler exited with {}", code);
    Ok(code)
}

/// `cmd` parses its own command line, so the already-quoted string is
/// appended verbatim instead of being quoted a second time. With `/S`, cmd
/// strips exactly the outer pair of quotes added here.
#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    let mut cmd = Command::new("cmd");
    cmd.args(["/S", "/C"]).raw_arg(format!("\"{}\"", command_line));
    cmd
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

/// Exit code of a finished child. A Unix child killed by a signal reports
/// `128 + signal`, like a shell does.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os_args(raw: &[&str]) -> Vec<OsString> {
        raw.iter().map(OsString::from).collect()
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        assert_eq!(quote_arg(r#"say "hi""#), r#""say \"hi\"""#);
    }

    #[test]
    fn tokens_are_quoted_and_space_joined() {
        let command = construct_command(&["java", "-cp", "a b.jar", ""]);
        assert_eq!(command, r#""java" "-cp" "a b.jar" """#);
    }

    #[test]
    fn invocation_mode_parses_case_insensitively() {
        assert_eq!("Shell".parse::<InvocationMode>().unwrap(), InvocationMode::Shell);
        assert_eq!(" spawn ".parse::<InvocationMode>().unwrap(), InvocationMode::Spawn);
        assert!("exec".parse::<InvocationMode>().is_err());
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = execute(&[], InvocationMode::Spawn).unwrap_err();
        assert!(matches!(err, LauncherError::JavaExecution(_)));
    }

    #[cfg(unix)]
    #[test]
    fn spawned_exit_status_is_passed_through() {
        let args = os_args(&["sh", "-c", "exit 7"]);
        assert_eq!(execute(&args, InvocationMode::Spawn).unwrap(), 7);
    }

    #[cfg(unix)]
    #[test]
    fn shell_mode_passes_exit_status_through() {
        let args = os_args(&["sh", "-c", "exit 3"]);
        assert_eq!(execute(&args, InvocationMode::Shell).unwrap(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn shell_mode_keeps_quoted_arguments_intact() {
        let quoted = r#"say "hi" to a b"#;
        let same = os_args(&["test", quoted, "=", quoted]);
        assert_eq!(execute(&same, InvocationMode::Shell).unwrap(), 0);

        let different = os_args(&["test", quoted, "=", "say hi to a b"]);
        assert_eq!(execute(&different, InvocationMode::Shell).unwrap(), 1);
    }

    #[cfg(windows)]
    #[test]
    fn shell_mode_runs_quoted_line_through_cmd() {
        let args = os_args(&["cmd", "/C", "exit 5"]);
        assert_eq!(execute(&args, InvocationMode::Shell).unwrap(), 5);
    }

    #[cfg(windows)]
    #[test]
    fn shell_command_line_is_not_requoted() {
        let line = construct_command(&["java", "-jar", "x.jar"]);
        let cmd = shell_command(&line);

        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args.len(), 3);
        assert_eq!(args[2], std::ffi::OsStr::new(r#"""java" "-jar" "x.jar"""#));
    }

    #[cfg(unix)]
    #[test]
    fn spawn_mode_forwards_non_unicode_arguments() {
        use std::os::unix::ffi::OsStrExt;

        let token = std::ffi::OsStr::from_bytes(b"F\xff.java").to_os_string();
        let mut args = os_args(&["sh", "-c", r#"test "$1" = "$(printf 'F\377.java')""#, "sh"]);
        args.push(token);
        assert_eq!(execute(&args, InvocationMode::Spawn).unwrap(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn missing_program_is_an_execution_error() {
        let args = os_args(&["/nonexistent/bin/java"]);
        let err = execute(&args, InvocationMode::Spawn).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bin/java"));
    }
}
