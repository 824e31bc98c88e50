use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};

use super::runtime::read_java_version;

static LEGACY_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d)\.(\d+)\..*$").expect("version pattern is valid"));

/// Two-part runtime version, e.g. `1.6` from `1.6.0_45`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
}

impl RuntimeVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parse a `java.version` style string.
///
/// Only the legacy `1.X.…` shape is recognised: one digit, a dot, the minor
/// digits, then a dot followed by anything.
pub fn parse_runtime_version(raw: &str) -> LauncherResult<RuntimeVersion> {
    let unparsable = || LauncherError::UnparsableRuntimeVersion(raw.to_string());
    let captures = LEGACY_VERSION.captures(raw).ok_or_else(unparsable)?;

    let major = captures[1].parse::<u32>().map_err(|_| unparsable())?;
    let minor = captures[2].parse::<u32>().map_err(|_| unparsable())?;
    Ok(RuntimeVersion::new(major, minor))
}

/// Determine the runtime version the child compiler will run on.
///
/// A configured override wins; otherwise the version is read from the Java
/// executable that will be launched.
pub fn detect_runtime_version(
    java: &Path,
    version_override: Option<&str>,
) -> LauncherResult<RuntimeVersion> {
    let raw = match version_override {
        Some(raw) => raw.to_string(),
        None => read_java_version(java)?,
    };

    let version = parse_runtime_version(raw.trim())?;
    debug!("Detected runtime version {} from {:?}", version, raw);
    Ok(version)
}
