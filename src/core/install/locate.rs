// ─── Self Location ───
// Turns the location identifier of the launcher's own archive into a path.

use std::path::{Component, Path, PathBuf};

use crate::core::error::{LauncherError, LauncherResult};

const JAR_FILE_PREFIX: &str = "jar:file:";
const FILE_PREFIX: &str = "file:";

/// Resolve the absolute path of the archive containing the launcher's code.
///
/// Accepted shapes:
/// - `jar:file:<url-encoded path>!<entry>`
/// - a plain filesystem path
///
/// `file:` locations (an exploded class directory), other URL schemes and
/// malformed `jar:file:` identifiers are rejected with distinct errors.
pub fn locate_self_archive(location: &str) -> LauncherResult<PathBuf> {
    let location = location.trim();
    if location.is_empty() {
        return Err(LauncherError::UnrecognizedLocation(location.to_string()));
    }

    if location.starts_with(FILE_PREFIX) {
        return Err(LauncherError::LoadedFromDirectory);
    }

    if let Some(rest) = location.strip_prefix(JAR_FILE_PREFIX) {
        let Some(bang) = rest.find('!') else {
            return Err(LauncherError::UnrecognizedLocation(location.to_string()));
        };
        let decoded = percent_decode(&rest[..bang])
            .ok_or_else(|| LauncherError::UnrecognizedLocation(location.to_string()))?;
        return absolute_normalized(Path::new(&decoded));
    }

    if let Some(scheme) = url_scheme(location) {
        return Err(LauncherError::LoadedRemotely {
            scheme: scheme.to_string(),
        });
    }

    absolute_normalized(Path::new(location))
}

/// Scheme of a URL-looking identifier. Single letters are drive prefixes
/// (`C:\...`), not schemes.
fn url_scheme(location: &str) -> Option<&str> {
    let (scheme, _) = location.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    let valid = scheme.len() > 1
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

/// Decode `%XX` escapes. `+` is kept literally since this is a path, not a
/// form body. Returns `None` for truncated or non-hex escapes or bytes that are not valid UTF-8.
pub(crate) fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = raw.get(i + 1..i + 3)?;
                if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return None;
                }
                decoded.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            byte => {
                decoded.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8(decoded).ok()
}

/// Make `path` absolute against the current directory and drop `.`/`..`
/// components lexically. Symlinks are left alone.
pub(crate) fn absolute_normalized(path: &Path) -> LauncherResult<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|source| LauncherError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
