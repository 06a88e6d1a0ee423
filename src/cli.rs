use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::generator::descriptor::ReleaseInfo;
use crate::generator::scenario::{Preset, Scenario};
use crate::generator::{FixtureCounts, PinnedInputs};
use crate::models::ContentType;

#[derive(Parser, Debug)]
#[command(
    name = "mof-fixtures",
    about = "Generate Model Openness Framework release fixtures and license lookup tables",
    version
)]
pub struct Cli {
    /// Config file [default: ./.mof-fixtures/config.toml, fallback ~/.config/mof-fixtures/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Report format for generated fixtures
    #[arg(long, default_value = "terminal", value_name = "FORMAT", global = true)]
    pub report: ReportFormat,

    /// Only print summary lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rebuild the YAML license tables from SPDX and MOF license-list JSON dumps
    UpdateLicenses(UpdateLicensesArgs),
    /// Generate one release descriptor
    Generate(GenerateArgs),
    /// Generate one of the canonical fixtures
    Preset(PresetArgs),
    /// Generate a batch of randomized fixtures
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
pub struct UpdateLicensesArgs {
    /// SPDX license list JSON
    pub license_json: PathBuf,

    /// MOF license list JSON
    pub mof_license_json: PathBuf,

    /// Directory the tables are written to [default: configured tables dir]
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Also write the built-in Components.yml
    #[arg(long)]
    pub write_components: bool,
}

/// Where inputs come from and outputs go.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory holding the license tables and Components.yml
    #[arg(long, value_name = "DIR")]
    pub tables: Option<PathBuf>,

    /// Directory fixtures are written to
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Release metadata overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct ReleaseArgs {
    /// Release name prefix
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long = "release-version", value_name = "VERSION")]
    pub release_version: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long = "type", value_name = "TYPE")]
    pub release_type: Option<String>,

    #[arg(long)]
    pub architecture: Option<String>,

    #[arg(long)]
    pub origin: Option<String>,

    #[arg(long)]
    pub producer: Option<String>,

    #[arg(long)]
    pub contact: Option<String>,

    #[arg(long)]
    pub repository: Option<String>,

    #[arg(long)]
    pub huggingface: Option<String>,
}

impl ReleaseArgs {
    /// Overlay the flags that were given onto `info`.
    pub fn apply(&self, mut info: ReleaseInfo) -> ReleaseInfo {
        let fields = [
            (&self.name, &mut info.name),
            (&self.release_version, &mut info.version),
            (&self.date, &mut info.date),
            (&self.release_type, &mut info.release_type),
            (&self.architecture, &mut info.architecture),
            (&self.origin, &mut info.origin),
            (&self.producer, &mut info.producer),
            (&self.contact, &mut info.contact),
            (&self.repository, &mut info.repository),
            (&self.huggingface, &mut info.huggingface),
        ];
        for (flag, field) in fields {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
        info
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of components
    #[arg(long, default_value_t = 0)]
    pub components: usize,

    /// Number of global (per content type) licenses, at most 4
    #[arg(long, default_value_t = 0)]
    pub global_licenses: usize,

    /// Number of components carrying their own license
    #[arg(long, default_value_t = 0)]
    pub component_licenses: usize,

    /// How many component licenses should be valid
    #[arg(long, default_value_t = 0)]
    pub valid: usize,

    /// How many component licenses should be invalid
    #[arg(long, default_value_t = 0)]
    pub invalid: usize,

    /// How many valid component licenses should match the component's content type
    #[arg(long, default_value_t = 0)]
    pub type_appropriate: usize,

    /// Pin a component id (repeatable)
    #[arg(long = "component-id", value_name = "ID")]
    pub component_ids: Vec<u32>,

    /// Pin a component license id, paired with the pinned components in order (repeatable)
    #[arg(long = "license-id", value_name = "LICENSE")]
    pub license_ids: Vec<String>,

    /// Pin a global license (repeatable)
    #[arg(long = "global-license", value_name = "TYPE=LICENSE", value_parser = parse_global_license)]
    pub pinned_global_licenses: Vec<(ContentType, String)>,

    /// Component path, paired with components in order (repeatable)
    #[arg(long = "component-path", value_name = "PATH")]
    pub component_paths: Vec<String>,

    /// Global license path, paired with global licenses in order (repeatable)
    #[arg(long = "global-license-path", value_name = "PATH")]
    pub global_license_paths: Vec<String>,

    /// Component license path, paired with components in order (repeatable)
    #[arg(long = "license-path", value_name = "PATH")]
    pub license_paths: Vec<String>,

    #[command(flatten)]
    pub release: ReleaseArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl GenerateArgs {
    pub fn counts(&self) -> FixtureCounts {
        FixtureCounts {
            components: self.components,
            global_licenses: self.global_licenses,
            component_licenses: self.component_licenses,
            valid: self.valid,
            invalid: self.invalid,
            type_appropriate: self.type_appropriate,
        }
    }

    pub fn pinned(&self) -> PinnedInputs {
        PinnedInputs {
            component_ids: self.component_ids.clone(),
            license_ids: self.license_ids.clone(),
            global_licenses: self.pinned_global_licenses.clone(),
            component_paths: self.component_paths.clone(),
            global_license_paths: self.global_license_paths.clone(),
            license_paths: self.license_paths.clone(),
        }
    }
}

fn parse_global_license(value: &str) -> Result<(ContentType, String), String> {
    let (ty, id) = value
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=LICENSE, got '{}'", value))?;
    let ty: ContentType = ty.parse().map_err(|e: anyhow::Error| e.to_string())?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing license id in '{}'", value));
    }
    Ok((ty, id.to_string()))
}

#[derive(Args, Debug)]
pub struct PresetArgs {
    #[arg(value_enum)]
    pub preset: PresetArg,

    #[command(flatten)]
    pub release: ReleaseArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Number of fixtures to generate
    #[arg(long, default_value_t = 5)]
    pub count: usize,

    #[arg(long, value_enum, default_value = "random")]
    pub scenario: ScenarioArg,

    #[command(flatten)]
    pub release: ReleaseArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    Minimal,
    Full,
    Class1,
    Class2t,
    Class2r,
    Class3t,
    Class3r,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Minimal => Preset::Minimal,
            PresetArg::Full => Preset::Full,
            PresetArg::Class1 => Preset::Class1,
            PresetArg::Class2t => Preset::Class2T,
            PresetArg::Class2r => Preset::Class2R,
            PresetArg::Class3t => Preset::Class3T,
            PresetArg::Class3r => Preset::Class3R,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ScenarioArg {
    Random,
    GlobalOnly,
    Unlicensed,
    ComponentOnly,
    Mixed,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Random => Scenario::Random,
            ScenarioArg::GlobalOnly => Scenario::GlobalOnly,
            ScenarioArg::Unlicensed => Scenario::Unlicensed,
            ScenarioArg::ComponentOnly => Scenario::ComponentOnly,
            ScenarioArg::Mixed => Scenario::Mixed,
        }
    }
}
