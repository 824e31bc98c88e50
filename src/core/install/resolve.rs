// ─── Support File Resolution ───
// Finds the compiler and annotated-JDK archives in the install search path.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::java::RuntimeVersion;

/// Annotated JDK archive for each supported runtime version.
const SUPPORT_ARCHIVES: &[(RuntimeVersion, &str)] = &[
    (RuntimeVersion::new(1, 4), "jdk6.jar"),
    (RuntimeVersion::new(1, 5), "jdk6.jar"),
    (RuntimeVersion::new(1, 6), "jdk6.jar"),
    (RuntimeVersion::new(1, 7), "jdk7.jar"),
];

/// A file looked up in a search path.
///
/// When the file was not found anywhere, `path` still points at the name
/// inside the last searched directory so callers can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub exists: bool,
}

impl ResolvedFile {
    /// File name for error reports.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}

/// Name of the annotated JDK archive matching `version`.
pub fn support_archive_for(version: RuntimeVersion) -> LauncherResult<&'static str> {
    SUPPORT_ARCHIVES
        .iter()
        .find(|(supported, _)| *supported == version)
        .map(|(_, name)| *name)
        .ok_or_else(|| LauncherError::UnsupportedRuntimeVersion(version.to_string()))
}

/// Search directories for an install: each configured entry relative to
/// `parent_dir`, in configured order.
pub fn search_directories(parent_dir: &Path, search_paths: &[String]) -> Vec<PathBuf> {
    search_paths
        .iter()
        .map(|entry| parent_dir.join(entry))
        .collect()
}

/// Find `file_name` in the first directory that contains it.
pub fn find_file_in_directories(
    file_name: &str,
    directories: &[PathBuf],
) -> LauncherResult<ResolvedFile> {
    let Some(last) = directories.last() else {
        return Err(LauncherError::EmptyPathSet);
    };

    for dir in directories {
        let candidate = dir.join(file_name);
        if candidate.exists() {
            debug!("Resolved {} -> {:?}", file_name, candidate);
            return Ok(ResolvedFile {
                path: candidate,
                exists: true,
            });
        }
    }

    warn!("{} not found in {:?}", file_name, directories);
    Ok(ResolvedFile {
        path: last.join(file_name),
        exists: false,
    })
}

/// Fail with one error naming every file that does not exist, in order.
pub fn ensure_files_exist(files: &[&ResolvedFile]) -> LauncherResult<()> {
    let missing: Vec<String> = files
        .iter()
        .filter(|file| !file.exists)
        .map(|file| file.name())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LauncherError::MissingFiles(missing))
    }
}
