//! stmm-setup - install and uninstall the stmm-input-bt package
//!
//! Usage:
//!   stmm-setup install ...          # library, then keyboard application
//!   stmm-setup uninstall ...        # both, after one confirmation
//!   stmm-setup install-lib ...      # libstmm-input-gtk-bt only
//!   stmm-setup install-btkb ...     # stmm-input-btkb only
//!   stmm-setup --dry-run install    # print the commands instead

mod args;
mod output;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stmm_setup_core::config::{DefaultsStore, OptionResolver, SetupDefaults};
use stmm_setup_core::context::SetupContext;
use stmm_setup_core::env::Environment;
use stmm_setup_core::error::SetupError;
use stmm_setup_core::orchestration::{
    Aggregator, Confirmation, ConfirmationGate, UninstallOutcome, install_all_plan, install_app,
    install_lib, uninstall, uninstall_all_plan,
};
use stmm_setup_core::project::SubProject;
use stmm_setup_core::runner::{CommandRunner, RecordingRunner, SystemRunner};

use crate::args::{InstallAllArgs, InstallBtkbArgs, InstallLibArgs, UninstallArgs, UninstallLibArgs};
use crate::output::{OutputFormat, print_plan};

#[derive(Parser)]
#[command(name = "stmm-setup")]
#[command(about = "Install and uninstall stmm-input-bt from source", long_about = None)]
#[command(version)]
struct Cli {
    /// Root of the stmm-input-bt source package (default: current dir)
    #[arg(long, global = true, value_name = "DIR")]
    source_dir: Option<String>,

    /// Print the commands instead of running them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Output format for --dry-run
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Debug logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and install the library and the keyboard application
    Install(Box<InstallAllArgs>),

    /// Remove everything `install` put in place
    Uninstall(UninstallArgs),

    /// Build and install libstmm-input-gtk-bt
    InstallLib(Box<InstallLibArgs>),

    /// Remove the files installed by `install-lib`
    UninstallLib(UninstallLibArgs),

    /// Build and install stmm-input-btkb
    InstallBtkb(Box<InstallBtkbArgs>),

    /// Remove the files installed by `install-btkb`
    UninstallBtkb(UninstallArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "stmm_setup=debug,info"
    } else {
        "stmm_setup=info,warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Exit status for a failed run: the first `SetupError` in the chain
/// decides, anything else is 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err
        .chain()
        .find_map(|e| e.downcast_ref::<SetupError>())
        .map_or(1, SetupError::exit_code);
    u8::try_from(code).unwrap_or(1)
}

/// Resolver and context shared by every subcommand.
struct Setup {
    resolver: OptionResolver,
    ctx: SetupContext,
    format: OutputFormat,
}

impl Setup {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let base = OptionResolver::with_defaults(SetupDefaults::new())?;
        let source_dir = match &cli.source_dir {
            Some(dir) => base.dir(dir)?,
            None => base.cwd().to_path_buf(),
        };

        let defaults = DefaultsStore::from_source_dir(&source_dir).load()?;
        let resolver = OptionResolver::with_defaults(defaults)?;

        let self_exe = std::env::current_exe().context("Failed to locate the running executable")?;
        let ctx = SetupContext::new(source_dir, Environment::from_process(), self_exe)
            .with_dry_run(cli.dry_run);

        Ok(Self {
            resolver,
            ctx,
            format: cli.format,
        })
    }

    /// Run `f` against the real system, or record and print what it would do.
    fn execute<T>(&self, f: impl FnOnce(&mut dyn CommandRunner) -> Result<T>) -> Result<T> {
        if self.ctx.dry_run() {
            let mut runner = RecordingRunner::new();
            let result = f(&mut runner)?;
            print_plan(runner.invocations(), self.format)?;
            Ok(result)
        } else {
            f(&mut SystemRunner::new())
        }
    }

    fn json_plan(&self) -> bool {
        self.ctx.dry_run() && self.format == OutputFormat::Json
    }

    /// Where banners go; kept off stdout when it carries JSON.
    fn banner_writer(&self) -> Box<dyn Write> {
        if self.json_plan() {
            Box::new(io::sink())
        } else {
            Box::new(io::stdout())
        }
    }

    /// Confirmation on stdin; the summary and question move to stderr
    /// when stdout carries JSON.
    fn gate(&self) -> ConfirmationGate<io::StdinLock<'static>, Box<dyn Write>> {
        let output: Box<dyn Write> = if self.json_plan() {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        ConfirmationGate::stdin(output)
    }
}

fn run(cli: Cli) -> Result<()> {
    let setup = Setup::from_cli(&cli)?;

    match &cli.command {
        Commands::Install(args) => run_install_all(&setup, args),
        Commands::Uninstall(args) => run_uninstall_all(&setup, args),
        Commands::InstallLib(args) => {
            let cfg = args.to_config(&setup.resolver)?;
            setup.execute(|runner| install_lib(&setup.ctx, &cfg, runner))?;
            Ok(())
        }
        Commands::InstallBtkb(args) => {
            let cfg = args.to_config(&setup.resolver)?;
            setup.execute(|runner| install_app(&setup.ctx, &cfg, runner))?;
            Ok(())
        }
        Commands::UninstallLib(args) => {
            let cfg = args.to_config(&setup.resolver)?;
            run_uninstall(&setup, SubProject::GtkBt, &cfg)
        }
        Commands::UninstallBtkb(args) => {
            let cfg = args.to_config(&setup.resolver)?;
            run_uninstall(&setup, SubProject::Btkb, &cfg)
        }
    }
}

fn run_install_all(setup: &Setup, args: &InstallAllArgs) -> Result<()> {
    let cfg = args.to_config(&setup.resolver)?;
    let plan = install_all_plan(&setup.ctx, &cfg);
    let mut out = setup.banner_writer();
    let mut aggregator = Aggregator::new();
    setup.execute(|runner| aggregator.run(&plan, runner, &mut out))?;
    info!(state = ?aggregator.state(), "install finished");
    Ok(())
}

fn run_uninstall_all(setup: &Setup, args: &UninstallArgs) -> Result<()> {
    let cfg = args.to_config(&setup.resolver)?;
    if setup.gate().confirm(&cfg, setup.ctx.env())? == Confirmation::Declined {
        info!("uninstall declined");
        return Ok(());
    }

    let plan = uninstall_all_plan(&setup.ctx, &cfg)?;
    let mut out = setup.banner_writer();
    let mut aggregator = Aggregator::new();
    setup.execute(|runner| aggregator.run(&plan, runner, &mut out))?;
    info!(state = ?aggregator.state(), "uninstall finished");
    Ok(())
}

fn run_uninstall(
    setup: &Setup,
    project: SubProject,
    cfg: &stmm_setup_core::config::UninstallConfig,
) -> Result<()> {
    let mut gate = setup.gate();
    let outcome = setup.execute(|runner| uninstall(&setup.ctx, project, cfg, &mut gate, runner))?;
    if let UninstallOutcome::Completed(report) = outcome {
        info!(%project, removed = report.executed.len(), "uninstall finished");
    }
    Ok(())
}
