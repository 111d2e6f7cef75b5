//! Subcommand arguments and their conversion into configuration records.

use anyhow::Result;
use clap::Args;

use stmm_setup_core::config::{
    AppInstallConfig, InstallAllConfig, InstallSteps, LibInstallConfig, OptionResolver,
    UninstallConfig,
};
use stmm_setup_core::types::{BuildType, Tristate};

#[derive(Args, Debug, Clone, Default)]
pub struct StepArgs {
    /// Don't configure
    #[arg(long)]
    pub no_configure: bool,
    /// Don't make
    #[arg(long)]
    pub no_make: bool,
    /// Don't install
    #[arg(long)]
    pub no_install: bool,
}

impl StepArgs {
    fn steps(&self) -> InstallSteps {
        InstallSteps::from_flags(self.no_configure, self.no_make, self.no_install)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Build type (default: Release)
    #[arg(short = 'b', long = "buildtype", value_enum)]
    pub build_type: Option<BuildType>,
    /// Install dir (default: /usr/local)
    #[arg(long = "installdir", value_name = "INSTALLDIR")]
    pub install_dir: Option<String>,
    /// Don't use sudo to install
    #[arg(long)]
    pub no_sudo: bool,
    #[command(flatten)]
    pub steps: StepArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LibFeatureArgs {
    /// Build static library
    #[arg(short = 's', long = "staticlib", value_enum, default_value_t)]
    pub static_lib: Tristate,
    /// Build tests
    #[arg(short = 't', long, value_enum, default_value_t)]
    pub tests: Tristate,
    /// Build documentation
    #[arg(short = 'd', long, value_enum, default_value_t)]
    pub docs: Tristate,
    /// Send documentation warnings to a log file
    #[arg(long)]
    pub docs_to_log: bool,
    /// Compile with the address sanitizer (Debug builds)
    #[arg(long)]
    pub sanitize: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SchemaArgs {
    /// Gsettings schemas prefix (default: /usr)
    #[arg(long = "schemasdir", value_name = "SCHEMASDIR")]
    pub schemas_dir: Option<String>,
    /// Don't compile schemas
    #[arg(long)]
    pub no_compile_schemas: bool,
}

/// `install-lib`
#[derive(Args, Debug, Clone)]
pub struct InstallLibArgs {
    #[command(flatten)]
    pub features: LibFeatureArgs,
    #[command(flatten)]
    pub build: BuildArgs,
}

/// `install-btkb`
#[derive(Args, Debug, Clone)]
pub struct InstallBtkbArgs {
    #[command(flatten)]
    pub build: BuildArgs,
    #[command(flatten)]
    pub schemas: SchemaArgs,
    /// Don't install icons (implies --no-launcher)
    #[arg(long)]
    pub no_icons: bool,
    /// Don't install launcher
    #[arg(long)]
    pub no_launcher: bool,
    /// Don't install man page
    #[arg(long)]
    pub no_man: bool,
}

/// `install`
#[derive(Args, Debug, Clone)]
pub struct InstallAllArgs {
    #[command(flatten)]
    pub features: LibFeatureArgs,
    #[command(flatten)]
    pub build: BuildArgs,
    #[command(flatten)]
    pub schemas: SchemaArgs,
    /// Don't install man page
    #[arg(long)]
    pub no_man: bool,
}

/// `uninstall-lib`
#[derive(Args, Debug, Clone, Default)]
pub struct UninstallLibArgs {
    /// Don't remove build folder
    #[arg(long)]
    pub no_clean: bool,
    /// Don't uninstall
    #[arg(long)]
    pub no_uninstall: bool,
    /// No prompt confirmation
    #[arg(short = 'y', long)]
    pub no_prompt: bool,
    /// Install dir (default: /usr/local)
    #[arg(long = "installdir", value_name = "INSTALLDIR")]
    pub install_dir: Option<String>,
    /// Don't use sudo to uninstall
    #[arg(long)]
    pub no_sudo: bool,
}

/// `uninstall` and `uninstall-btkb`
#[derive(Args, Debug, Clone, Default)]
pub struct UninstallArgs {
    #[command(flatten)]
    pub base: UninstallLibArgs,
    #[command(flatten)]
    pub schemas: SchemaArgs,
}

fn build_type(resolver: &OptionResolver, args: &BuildArgs) -> Result<BuildType> {
    Ok(resolver.build_type(args.build_type)?)
}

impl InstallLibArgs {
    pub fn to_config(&self, resolver: &OptionResolver) -> Result<LibInstallConfig> {
        Ok(
            LibInstallConfig::new(resolver.install_dir(self.build.install_dir.as_deref())?)
                .with_build_type(build_type(resolver, &self.build)?)
                .with_static_lib(self.features.static_lib)
                .with_tests(self.features.tests)
                .with_docs(self.features.docs, self.features.docs_to_log)
                .with_sanitize(self.features.sanitize)
                .with_steps(self.build.steps.steps())
                .with_sudo(resolver.sudo(self.build.no_sudo)),
        )
    }
}

impl InstallBtkbArgs {
    pub fn to_config(&self, resolver: &OptionResolver) -> Result<AppInstallConfig> {
        Ok(AppInstallConfig::new(
            resolver.install_dir(self.build.install_dir.as_deref())?,
            resolver.schemas_dir(self.schemas.schemas_dir.as_deref())?,
        )
        .with_build_type(build_type(resolver, &self.build)?)
        .with_steps(self.build.steps.steps())
        .with_compile_schemas(!self.schemas.no_compile_schemas)
        .with_sudo(resolver.sudo(self.build.no_sudo))
        .with_icons(!self.no_icons)
        .with_launcher(!self.no_launcher)
        .with_man(!self.no_man))
    }
}

impl InstallAllArgs {
    pub fn to_config(&self, resolver: &OptionResolver) -> Result<InstallAllConfig> {
        let mut cfg = InstallAllConfig::new(
            resolver.install_dir(self.build.install_dir.as_deref())?,
            resolver.schemas_dir(self.schemas.schemas_dir.as_deref())?,
        );
        cfg.build_type = build_type(resolver, &self.build)?;
        cfg.static_lib = self.features.static_lib;
        cfg.tests = self.features.tests;
        cfg.docs = self.features.docs;
        cfg.docs_to_log = self.features.docs_to_log;
        cfg.sanitize = self.features.sanitize;
        cfg.steps = self.build.steps.steps();
        cfg.compile_schemas = !self.schemas.no_compile_schemas;
        cfg.sudo = resolver.sudo(self.build.no_sudo);
        cfg.man = !self.no_man;
        Ok(cfg)
    }
}

impl UninstallLibArgs {
    pub fn to_config(&self, resolver: &OptionResolver) -> Result<UninstallConfig> {
        Ok(UninstallConfig::new(
            resolver.install_dir(self.install_dir.as_deref())?,
            resolver.schemas_dir(None)?,
        )
        .with_clean(!self.no_clean)
        .with_uninstall(!self.no_uninstall)
        .with_prompt(!self.no_prompt)
        .with_sudo(resolver.sudo(self.no_sudo)))
    }
}

impl UninstallArgs {
    pub fn to_config(&self, resolver: &OptionResolver) -> Result<UninstallConfig> {
        let mut cfg = self.base.to_config(resolver)?;
        cfg.schemas_dir = resolver.schemas_dir(self.schemas.schemas_dir.as_deref())?;
        cfg.compile_schemas = !self.schemas.no_compile_schemas;
        Ok(cfg)
    }
}
