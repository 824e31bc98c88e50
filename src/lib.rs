pub mod core;

use std::ffi::{OsStr, OsString};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::core::config::LauncherConfig;
use crate::core::error::LauncherResult;
use crate::core::install::InstallLayout;
use crate::core::java::{detect_runtime_version, java_command};
use crate::core::launch::{execute, parse_args, LaunchPlan};

const LOG_ENV: &str = "CHECKER_LAUNCHER_LOG";

/// Entry point of the `checker-javac` binary. Returns the process exit code:
/// the compiler's own status, or 1 when the launcher itself fails.
pub fn run() -> i32 {
    // Logs go to stderr so the compiler's stdout stays clean.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    let outcome = LauncherConfig::load().and_then(|config| {
        let env_classpath = std::env::var_os("CLASSPATH");
        launch(&config, args, env_classpath.as_deref())
    });

    match outcome {
        Ok(code) => code,
        Err(err) => {
            error!("Launcher failed: {:?}", err);
            eprintln!("checker-javac: {}", err);
            1
        }
    }
}

/// Resolve everything the compiler run needs, without running it.
pub fn plan_launch(
    config: &LauncherConfig,
    args: Vec<OsString>,
    env_classpath: Option<&OsStr>,
) -> LauncherResult<LaunchPlan> {
    let java = java_command(config.java_home.as_deref());
    let version = detect_runtime_version(&java, config.java_version.as_deref())?;

    let layout =
        InstallLayout::from_location(&config.self_archive_location()?, &config.search_paths)?;
    let support = layout.resolve_support_files(&config.compiler_archive, version)?;

    let args = parse_args(args, env_classpath);

    info!(
        "Runtime {} -> compiler {:?}, jdk {:?}",
        version, support.compiler_archive, support.jdk_archive
    );

    Ok(LaunchPlan {
        java,
        self_archive: layout.self_archive().to_path_buf(),
        support,
        args,
    })
}

/// Build the compiler command and run it to completion.
pub fn launch(
    config: &LauncherConfig,
    args: Vec<OsString>,
    env_classpath: Option<&OsStr>,
) -> LauncherResult<i32> {
    let plan = plan_launch(config, args, env_classpath)?;
    let command = plan.build_command()?;
    execute(&command, config.invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LauncherError;
    use crate::core::launch::get_classpath_separator;
    use std::path::{Path, PathBuf};

    fn fake_install(tag: &str, files: &[&str]) -> PathBuf {
        let root = std::env::temp_dir().join(format!("launcher-test-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("binary")).unwrap();
        std::fs::write(root.join("checkers.jar"), b"checkers").unwrap();
        for file in files {
            std::fs::write(root.join("binary").join(file), b"jar").unwrap();
        }
        root
    }

    fn config_for(root: &Path, version: &str) -> LauncherConfig {
        LauncherConfig {
            self_archive: Some(root.join("checkers.jar").to_string_lossy().to_string()),
            java_home: Some(root.join("jdk")),
            java_version: Some(version.into()),
            ..LauncherConfig::default()
        }
    }

    fn args(raw: &[&str]) -> Vec<OsString> {
        raw.iter().map(OsString::from).collect()
    }

    #[cfg(unix)]
    fn fake_java(root: &Path, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let bin = root.join("jdk").join("bin");
        std::fs::create_dir_all(&bin).unwrap();

        let java = bin.join("java");
        std::fs::write(&java, script).unwrap();
        let mut perms = std::fs::metadata(&java).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&java, perms).unwrap();
    }

    #[test]
    fn plan_places_own_archive_first_and_forwards_the_rest() {
        let root = fake_install("plan", &["javac.jar", "jdk6.jar"]);
        let config = config_for(&root, "1.6.0_45");

        let plan = plan_launch(
            &config,
            args(&["-cp", "user.jar", "-J-Xmx512m", "Foo.java"]),
            Some(OsStr::new("ignored.jar")),
        )
        .unwrap();
        let command = plan.build_command().unwrap();

        let classpath_index = command.iter().position(|t| t == "-classpath").unwrap();
        let classpath = &command[classpath_index + 1];
        assert_eq!(
            classpath,
            &OsString::from(format!(
                "{}{}user.jar",
                root.join("checkers.jar").display(),
                get_classpath_separator()
            ))
        );
        assert!(command.iter().any(|t| t == "-Xmx512m"));
        assert_eq!(command.last(), Some(&OsString::from("Foo.java")));
        assert!(command[1].to_string_lossy().contains("jdk6.jar"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn unsupported_runtime_stops_the_launch() {
        let root = fake_install("unsupported", &["javac.jar", "jdk6.jar", "jdk7.jar"]);
        let config = config_for(&root, "1.9.0");

        let err = plan_launch(&config, args(&["Foo.java"]), None).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported JRE version: 1.9");

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn unparsable_runtime_version_stops_the_launch() {
        let root = fake_install("unparsable", &["javac.jar", "jdk7.jar"]);
        let config = config_for(&root, "17.0.2");

        let err = plan_launch(&config, args(&["Foo.java"]), None).unwrap_err();
        assert!(matches!(err, LauncherError::UnparsableRuntimeVersion(_)));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_archives_are_all_reported() {
        let root = fake_install("missing", &[]);
        let config = config_for(&root, "1.7.0_80");

        let err = plan_launch(&config, args(&["Foo.java"]), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following files could not be located: javac.jar, jdk7.jar"
        );

        let _ = std::fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn compiler_exit_status_becomes_launcher_result() {
        let root = fake_install("exit-status", &["javac.jar", "jdk7.jar"]);
        fake_java(&root, "#!/bin/sh\nexit 4\n");

        let config = config_for(&root, "1.7.0_80");
        let code = launch(&config, args(&["Foo.java"]), None).unwrap();
        assert_eq!(code, 4);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_source_file_reaches_compiler_unchanged() {
        use std::os::unix::ffi::OsStrExt;

        let root = fake_install("non-unicode", &["javac.jar", "jdk7.jar"]);
        let received = root.join("received-args");
        fake_java(
            &root,
            &format!("#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\n", received.display()),
        );

        let source = OsStr::from_bytes(b"F\xff.java").to_os_string();
        let config = config_for(&root, "1.7.0_80");
        let code = launch(
            &config,
            vec![OsString::from("-J-Xmx1g"), source],
            Some(OsStr::new("env.jar")),
        )
        .unwrap();
        assert_eq!(code, 0);

        let output = std::fs::read(&received).unwrap();
        let lines: Vec<&[u8]> = output.split(|b| *b == b'\n').filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.last(), Some(&&b"F\xff.java"[..]));
        assert!(lines.contains(&&b"-Xmx1g"[..]));

        let _ = std::fs::remove_dir_all(&root);
    }
}
