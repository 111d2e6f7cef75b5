//! Path resolution for directory flags.

use std::path::{Component, Path, PathBuf};

use crate::error::SetupError;

/// Expand `~` and make `raw` absolute against `cwd`.
///
/// The result is normalized lexically: `.` components are dropped and
/// `..` pops the previous component. Symlinks are not resolved, the path
/// does not need to exist.
pub fn resolve_dir(raw: &str, home: Option<&Path>, cwd: &Path) -> Result<PathBuf, SetupError> {
    let expanded = expand_home(raw, home)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };
    Ok(normalize(&absolute))
}

fn expand_home(raw: &str, home: Option<&Path>) -> Result<PathBuf, SetupError> {
    let rest = if raw == "~" {
        ""
    } else if let Some(rest) = raw.strip_prefix("~/") {
        rest
    } else {
        return Ok(PathBuf::from(raw));
    };
    let home = home.ok_or_else(|| SetupError::NoHomeDir(raw.to_string()))?;
    Ok(if rest.is_empty() {
        home.to_path_buf()
    } else {
        home.join(rest)
    })
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                if !matches!(out.components().next_back(), Some(Component::RootDir) | None) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
