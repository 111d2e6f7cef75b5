//! Sequential execution of external commands.
//!
//! ## Design
//!
//! - `CommandSpec` is one external process call: program, argument tokens,
//!   working directory and extra environment
//! - `CommandRunner` executes specs; `SystemRunner` spawns processes,
//!   `RecordingRunner` only records them (dry runs and tests)
//! - `Pipeline` is an ordered list of `(enabled, action)` steps that stops
//!   at the first failure

mod pipeline;
mod recording;
mod spec;
mod system;

use std::path::Path;

pub use pipeline::{Pipeline, PipelineReport, Step, StepAction};
pub use recording::{Invocation, RecordingRunner};
pub use spec::{CommandSpec, ELEVATION_PROGRAM};
pub use system::SystemRunner;

/// Executes commands on behalf of the orchestration layer.
pub trait CommandRunner {
    /// Run `spec` to completion.
    ///
    /// A non-zero exit status is an error whose chain contains
    /// [`crate::error::SetupError::CommandFailed`].
    fn run(&mut self, spec: &CommandSpec) -> anyhow::Result<()>;

    /// Create `dir` (and its parents) if it does not exist yet.
    fn ensure_dir(&mut self, dir: &Path) -> anyhow::Result<()>;
}
