use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::InvocationMode;

const APP_DIR_NAME: &str = "checker-launcher";
const CONFIG_FILE: &str = "launcher.json";
const DEFAULT_SELF_ARCHIVE: &str = "checkers.jar";

pub const ENV_CONFIG: &str = "CHECKER_LAUNCHER_CONFIG";
pub const ENV_SELF_ARCHIVE: &str = "CHECKER_LAUNCHER_SELF_ARCHIVE";
pub const ENV_JAVA_VERSION: &str = "CHECKER_LAUNCHER_JAVA_VERSION";
pub const ENV_INVOCATION: &str = "CHECKER_LAUNCHER_INVOCATION";

/// Startup configuration, read once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Location of `checkers.jar`: a path or a `jar:file:` URL.
    /// Defaults to `checkers.jar` next to the launcher executable.
    pub self_archive: Option<String>,
    /// Directories searched for support archives, relative to the directory
    /// holding `self_archive`. First match wins.
    pub search_paths: Vec<String>,
    pub compiler_archive: String,
    /// JDK used to run the compiler. Falls back to `JAVA_HOME`, then `PATH`.
    pub java_home: Option<PathBuf>,
    /// Skip probing `java -version` and use this version string instead.
    pub java_version: Option<String>,
    pub invocation: InvocationMode,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            self_archive: None,
            search_paths: vec!["binary".into(), ".".into()],
            compiler_archive: "javac.jar".into(),
            java_home: None,
            java_version: None,
            invocation: InvocationMode::Spawn,
        }
    }
}

impl LauncherConfig {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> LauncherResult<Self> {
        let explicit = std::env::var_os(ENV_CONFIG).map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match default_config_paths().into_iter().find(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No {} found, using defaults", CONFIG_FILE);
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> LauncherResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| LauncherError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        info!("Loaded launcher config from {:?}", path);
        Ok(config)
    }

    /// Environment variables take precedence over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> LauncherResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(location) = lookup(ENV_SELF_ARCHIVE) {
            self.self_archive = Some(location);
        }
        if let Some(version) = lookup(ENV_JAVA_VERSION) {
            self.java_version = Some(version);
        }
        if let Some(mode) = lookup(ENV_INVOCATION) {
            self.invocation = mode.parse()?;
        }
        if self.java_home.is_none() {
            self.java_home = lookup("JAVA_HOME")
                .filter(|home| !home.trim().is_empty())
                .map(PathBuf::from);
        }
        Ok(())
    }

    /// Location identifier of the launcher's own archive.
    pub fn self_archive_location(&self) -> LauncherResult<String> {
        if let Some(location) = &self.self_archive {
            return Ok(location.clone());
        }

        let exe_dir = executable_dir()?;
        Ok(exe_dir.join(DEFAULT_SELF_ARCHIVE).to_string_lossy().to_string())
    }
}

fn executable_dir() -> LauncherResult<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| LauncherError::Config(format!("executable {:?} has no parent", exe)))
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(dir) = executable_dir() {
        paths.push(dir.join(CONFIG_FILE));
    }
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_DIR_NAME).join(CONFIG_FILE));
    }
    paths
}
