// ─── Command Builder ───
// Assembles the JVM command line that runs the type-annotations compiler.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::install::SupportFiles;

use super::args::ParsedArgs;

/// Assertions stay enabled for the compiler's own packages.
const COMPILER_ASSERTIONS_FLAG: &str = "-ea:com.sun.tools...";

/// Platform-specific Java class path separator.
pub fn get_classpath_separator() -> &'static str {
    if cfg!(target_os = "windows") {
        ";"
    } else {
        ":"
    }
}

/// Join the absolute paths of `files`, then `previous` if given.
pub fn prep_file_path(previous: Option<&str>, files: &[&Path]) -> LauncherResult<String> {
    if files.is_empty() {
        return Err(LauncherError::EmptyPathSet);
    }

    let mut entries = files
        .iter()
        .map(|file| absolute_path_str(file))
        .collect::<LauncherResult<Vec<_>>>()?;
    if let Some(previous) = previous {
        entries.push(previous.to_string());
    }

    Ok(entries.join(get_classpath_separator()))
}

fn absolute_path(path: &Path) -> LauncherResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|source| LauncherError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(path))
}

fn absolute_path_str(path: &Path) -> LauncherResult<String> {
    Ok(absolute_path(path)?.to_string_lossy().to_string())
}

/// Everything needed to produce the final command line.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub java: PathBuf,
    pub self_archive: PathBuf,
    pub support: SupportFiles,
    pub args: ParsedArgs,
}

impl LaunchPlan {
    /// Boot class path: annotated JDK, then the compiler, then user prepends.
    pub fn boot_classpath(&self) -> LauncherResult<String> {
        let user_entries = if self.args.boot_classpath.is_empty() {
            None
        } else {
            Some(self.args.boot_classpath.join(get_classpath_separator()))
        };

        prep_file_path(
            user_entries.as_deref(),
            &[
                self.support.jdk_archive.as_path(),
                self.support.compiler_archive.as_path(),
            ],
        )
    }

    /// Compiler class path with the launcher's own archive always first.
    /// User entries are kept as given, including bytes that are not Unicode.
    pub fn classpath(&self) -> LauncherResult<OsString> {
        let mut classpath = absolute_path(&self.self_archive)?.into_os_string();
        for entry in &self.args.classpath {
            classpath.push(get_classpath_separator());
            classpath.push(entry);
        }
        Ok(classpath)
    }

    /// Final token sequence. Order is significant: JVM flags, `-jar`, the
    /// compiler class path, then the untouched user arguments.
    pub fn build_command(&self) -> LauncherResult<Vec<OsString>> {
        let mut command: Vec<OsString> =
            Vec::with_capacity(self.args.jvm_opts.len() + self.args.tool_opts.len() + 7);

        command.push(self.java.clone().into_os_string());
        command.push(format!("-Xbootclasspath/p:{}", self.boot_classpath()?).into());
        command.push(COMPILER_ASSERTIONS_FLAG.into());
        command.extend(self.args.jvm_opts.iter().map(OsString::from));

        command.push("-jar".into());
        command.push(absolute_path(&self.support.compiler_archive)?.into_os_string());

        command.push("-classpath".into());
        command.push(self.classpath()?);

        command.extend(self.args.tool_opts.iter().cloned());

        debug!("Built command with {} tokens", command.len());
        Ok(command)
    }
}
