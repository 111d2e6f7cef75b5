//! Environment variables consumed by the install and uninstall flows.

use std::path::{Path, PathBuf};

/// Destination-root override, prefixed to the install directory.
pub const DESTDIR_VAR: &str = "DESTDIR";
/// Extra arguments for the `make` step, separated by whitespace.
pub const MAKE_OPTIONS_VAR: &str = "STMM_MAKE_OPTIONS";

/// Snapshot of the environment taken once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    dest_dir: Option<String>,
    make_options: Vec<String>,
}

impl Environment {
    pub fn new(dest_dir: Option<String>, make_options: Option<&str>) -> Self {
        Self {
            dest_dir: dest_dir.filter(|d| !d.is_empty()),
            make_options: make_options
                .map(|opts| opts.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }

    /// Read `DESTDIR` and `STMM_MAKE_OPTIONS` from the process environment.
    pub fn from_process() -> Self {
        let dest_dir = std::env::var(DESTDIR_VAR).ok();
        let make_options = std::env::var(MAKE_OPTIONS_VAR).ok();
        Self::new(dest_dir, make_options.as_deref())
    }

    /// Non-empty `DESTDIR`, if any.
    pub fn dest_dir(&self) -> Option<&str> {
        self.dest_dir.as_deref()
    }

    pub fn make_options(&self) -> &[String] {
        &self.make_options
    }

    /// `DESTDIR` prepended to `dir`.
    ///
    /// This is a textual prefix, the same thing `make install DESTDIR=...`
    /// does, so `/tmp/stage` + `/usr/local` gives `/tmp/stage/usr/local`.
    pub fn staged(&self, dir: &Path) -> PathBuf {
        match &self.dest_dir {
            Some(dest) => {
                let mut staged = dest.clone();
                staged.push_str(&dir.to_string_lossy());
                PathBuf::from(staged)
            }
            None => dir.to_path_buf(),
        }
    }
}
