// ─── Java Runtime ───
// Locates the `java` executable and reads the version it reports.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};

fn java_exe() -> &'static str {
    if cfg!(windows) {
        "java.exe"
    } else {
        "java"
    }
}

/// Java executable for the given home directory.
///
/// Without a home the bare `java` name is returned and resolved through `PATH`
/// when the child is spawned.
pub fn java_command(java_home: Option<&Path>) -> PathBuf {
    match java_home {
        Some(home) => home.join("bin").join(java_exe()),
        None => PathBuf::from(java_exe()),
    }
}

/// Run `<java> -version` and return the quoted version string it prints,
/// e.g. `1.7.0_80` from `java version "1.7.0_80"`.
pub fn read_java_version(java: &Path) -> LauncherResult<String> {
    let output = Command::new(java)
        .arg("-version")
        .output()
        .map_err(|e| LauncherError::JavaExecution(format!("{}: {}", java.display(), e)))?;

    // The JVM writes its banner to stderr; some wrappers use stdout.
    let banner = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stderr),
        String::from_utf8_lossy(&output.stdout)
    );
    debug!("java -version output: {:?}", banner);

    extract_quoted_version(&banner).ok_or_else(|| {
        LauncherError::UnparsableRuntimeVersion(banner.lines().next().unwrap_or("").to_string())
    })
}

fn extract_quoted_version(banner: &str) -> Option<String> {
    banner.lines().find_map(|line| {
        let start = line.find('"')?;
        let end = line[start + 1..].find('"')?;
        Some(line[start + 1..start + 1 + end].to_string())
    })
}
