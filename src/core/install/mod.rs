pub mod locate;
pub mod resolve;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::java::RuntimeVersion;

pub use locate::locate_self_archive;
pub use resolve::{
    ensure_files_exist, find_file_in_directories, search_directories, support_archive_for,
    ResolvedFile,
};

/// Where the launcher is installed, computed once at startup.
#[derive(Debug, Clone)]
pub struct InstallLayout {
    self_archive: PathBuf,
    search_dirs: Vec<PathBuf>,
}

/// The two archives the compiler needs on its boot class path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportFiles {
    pub compiler_archive: PathBuf,
    pub jdk_archive: PathBuf,
}

impl InstallLayout {
    pub fn from_location(location: &str, search_paths: &[String]) -> LauncherResult<Self> {
        let self_archive = locate_self_archive(location)?;
        let parent_dir = self_archive
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| LauncherError::UnrecognizedLocation(location.to_string()))?;
        let search_dirs = search_directories(&parent_dir, search_paths);

        debug!(
            "Install layout: archive={:?} search={:?}",
            self_archive, search_dirs
        );

        Ok(Self {
            self_archive,
            search_dirs,
        })
    }

    pub fn self_archive(&self) -> &Path {
        &self.self_archive
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Locate the compiler archive and the annotated JDK for `version`.
    ///
    /// Fails if the version is unsupported, or with a single error listing
    /// every archive that could not be found.
    pub fn resolve_support_files(
        &self,
        compiler_archive: &str,
        version: RuntimeVersion,
    ) -> LauncherResult<SupportFiles> {
        let jdk_name = support_archive_for(version)?;

        let compiler = find_file_in_directories(compiler_archive, &self.search_dirs)?;
        let jdk = find_file_in_directories(jdk_name, &self.search_dirs)?;
        ensure_files_exist(&[&compiler, &jdk])?;

        Ok(SupportFiles {
            compiler_archive: compiler.path,
            jdk_archive: jdk.path,
        })
    }
}
