//! Locating and reading the files that accompany a submission.

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;

/// Log target for package file access
const LOG_TARGET: &str = "files";

pub const PACKAGE_JSON: &str = "package.json";
pub const PACKAGE_LOCK: &str = "package-lock.json";
pub const YARN_LOCK: &str = "yarn.lock";
pub const RULE_SET: &str = "corp-check-rules.json";

/// Resolve `file_name` within `location`.
///
/// `location` is normally a directory. When it already names a `.json` file it is used as-is,
/// so both `./app` and `./app/package.json` work.
fn resolve(location: &Utf8Path, file_name: &str) -> Utf8PathBuf {
    if location.extension() == Some("json") {
        location.to_path_buf()
    } else {
        location.join(file_name)
    }
}

/// The directory holding the project at `location`, which may name its `package.json`.
#[must_use]
pub fn project_dir(location: &Utf8Path) -> &Utf8Path {
    if location.extension() == Some("json") {
        location.parent().filter(|parent| !parent.as_str().is_empty()).unwrap_or_else(|| Utf8Path::new("."))
    } else {
        location
    }
}

/// Read `file_name` from `location`, returning `None` if it doesn't exist.
pub fn read_optional(location: &Utf8Path, file_name: &str) -> Result<Option<String>> {
    let path = resolve(location, file_name);
    match fs::read_to_string(&path) {
        Ok(text) => {
            log::debug!(target: LOG_TARGET, "Read '{path}' ({} bytes)", text.len());
            Ok(Some(text))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!(target: LOG_TARGET, "'{path}' not found");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("reading '{path}'")),
    }
}

/// Read `file_name` from `location`, failing if it doesn't exist.
pub fn read_required(location: &Utf8Path, file_name: &str) -> Result<String> {
    match read_optional(location, file_name)? {
        Some(text) => Ok(text),
        None => bail!("could not find '{}'", resolve(location, file_name)),
    }
}
