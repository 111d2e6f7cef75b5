//! Rendering of planned commands for `--dry-run`.

use anyhow::Result;
use clap::ValueEnum;
use console::style;

use stmm_setup_core::runner::Invocation;

#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable list
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

pub fn print_plan(invocations: &[Invocation], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print!("{}", render_table(invocations));
            Ok(())
        }
        OutputFormat::Json => print_json(invocations),
    }
}

fn render_table(invocations: &[Invocation]) -> String {
    if invocations.is_empty() {
        return "Nothing to run.\n".to_string();
    }

    let mut out = format!("{}\n", style("Planned commands:").bold());
    for (i, invocation) in invocations.iter().enumerate() {
        let line = match invocation {
            Invocation::Command(spec) => match &spec.cwd {
                Some(cwd) => format!("{spec}  {}", style(format!("(in {})", cwd.display())).dim()),
                None => spec.to_string(),
            },
            Invocation::CreateDir { path } => format!("mkdir -p {}", path.display()),
        };
        out.push_str(&format!("{:>3}. {line}\n", i + 1));
    }
    out
}

fn print_json(invocations: &[Invocation]) -> Result<()> {
    let json = serde_json::to_string_pretty(invocations)?;
    println!("{json}");
    Ok(())
}
