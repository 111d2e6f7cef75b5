//! Interactive confirmation before destructive removal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use tracing::warn;

use crate::config::UninstallConfig;
use crate::env::Environment;
use crate::error::SetupError;

const DESTDIR_WARNING: &str = "Warning: DESTDIR value is prepended to the installation dir!";
const QUESTION: &str = "Are you sure? (yes/no) >";

/// Answer collected by [`ConfirmationGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Proceed,
    Declined,
}

/// Directory the installed files are removed from.
///
/// `None` when nothing gets removed, in which case `DESTDIR` plays no part.
pub fn uninstall_target(cfg: &UninstallConfig, env: &Environment) -> Option<PathBuf> {
    cfg.uninstall.then(|| env.staged(&cfg.install_dir))
}

/// Summary plus a yes/no loop on arbitrary input and output streams.
pub struct ConfirmationGate<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<W: Write> ConfirmationGate<io::StdinLock<'static>, W> {
    /// Gate reading answers from stdin.
    pub fn stdin(output: W) -> Self {
        Self::new(io::stdin().lock(), output)
    }
}

impl<R: BufRead, W: Write> ConfirmationGate<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask before uninstalling, unless `cfg.prompt` is off.
    ///
    /// Only `yes` and `no` are accepted, in any case and surrounded by any
    /// whitespace; anything else asks again. Closed input is an error.
    pub fn confirm(
        &mut self,
        cfg: &UninstallConfig,
        env: &Environment,
    ) -> anyhow::Result<Confirmation> {
        if !cfg.prompt {
            return Ok(Confirmation::Proceed);
        }

        let target = uninstall_target(cfg, env);
        if target.is_some() && env.dest_dir().is_some() {
            warn!(dest_dir = ?env.dest_dir(), "DESTDIR is prepended to the install dir");
            writeln!(self.output, "{DESTDIR_WARNING}")?;
        }
        let target = target.map_or_else(|| "none".to_string(), |t| t.display().to_string());
        writeln!(
            self.output,
            "Uninstall from dir: {target}   Remove build folders: {}",
            cfg.clean
        )?;

        loop {
            write!(self.output, "{QUESTION}")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read confirmation")?;
            if read == 0 {
                return Err(SetupError::PromptClosed.into());
            }

            match line.trim().to_lowercase().as_str() {
                "yes" => return Ok(Confirmation::Proceed),
                "no" => return Ok(Confirmation::Declined),
                _ => {}
            }
        }
    }
}
