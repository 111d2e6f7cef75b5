//! Structured description of one external process call.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Wrapper used for privileged steps.
pub const ELEVATION_PROGRAM: &str = "sudo";

/// One external process call.
///
/// Arguments are kept as separate tokens and never go through a shell.
/// Empty tokens are dropped when added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory, inherited from the caller when `None`
    pub cwd: Option<PathBuf>,
    /// Extra environment on top of the inherited one
    pub env: BTreeMap<String, String>,
    /// Run through [`ELEVATION_PROGRAM`]
    pub elevated: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            elevated: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        let arg = arg.into();
        if arg.is_empty() {
            tracing::trace!(program = %self.program, "dropping empty argument");
        } else {
            self.args.push(arg);
        }
        self
    }

    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        args.into_iter().fold(self, |spec, arg| spec.arg(arg))
    }

    /// Append a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Full argument vector, elevation wrapper included.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        if self.elevated {
            argv.push(ELEVATION_PROGRAM.to_string());
        }
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Whether the unwrapped command starts with `tokens`.
    pub fn starts_with(&self, tokens: &[&str]) -> bool {
        let mut own = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        tokens.iter().all(|t| own.next() == Some(*t))
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.argv().iter().map(|t| quote_for_display(t)).collect();
        f.write_str(&rendered.join(" "))
    }
}

fn quote_for_display(token: &str) -> String {
    if token.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("'{}'", token.replace('\'', r"'\''"))
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_are_dropped() {
        let spec = CommandSpec::new("make").arg("").arg("install").args(["", "DESTDIR=/x"]);
        assert_eq!(spec.args, vec!["install", "DESTDIR=/x"]);
    }

    #[test]
    fn test_elevated_argv_is_wrapped() {
        let spec = CommandSpec::new("ldconfig").elevated(true);
        assert_eq!(spec.argv(), vec!["sudo", "ldconfig"]);
        assert_eq!(spec.to_string(), "sudo ldconfig");
    }

    #[test]
    fn test_display_quotes_whitespace() {
        let spec = CommandSpec::new("rm").args(["-r", "-f", "/home/a user/bin"]);
        assert_eq!(spec.to_string(), "rm -r -f '/home/a user/bin'");
    }

    #[test]
    fn test_starts_with_ignores_elevation() {
        let spec = CommandSpec::new("make").arg("install").elevated(true);
        assert!(spec.starts_with(&["make", "install"]));
        assert!(spec.starts_with(&["make"]));
        assert!(!spec.starts_with(&["sudo"]));
        assert!(!spec.starts_with(&["make", "install", "extra"]));
    }
}
