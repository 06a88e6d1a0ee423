//! `mof-fixtures`: build license lookup tables and generate Model Openness
//! Framework release fixtures.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. `update-licenses`: read the SPDX and MOF license-list dumps, filter them
//!    by validity and write the YAML tables ([`license::tables`]).
//! 4. `generate` / `preset` / `batch`: load the tables and the component
//!    catalog ([`components`]), build one or more requests
//!    ([`generator::scenario`]), generate and classify each descriptor
//!    ([`generator`], [`classifier`]) and write it.
//! 5. Render the requested report ([`report`]).

mod classifier;
mod cli;
mod components;
mod config;
mod generator;
mod license;
mod models;
mod report;

use std::collections::HashSet;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::{Cli, Command, ReportFormat, SourceArgs, UpdateLicensesArgs};
use components::{ComponentCatalog, COMPONENTS_FILE};
use config::{load_config, Config};
use generator::scenario::{Preset, Scenario};
use generator::descriptor::ReleaseInfo;
use generator::{GenerationRequest, Generator};
use license::tables::{read_license_list, LicenseTables, LookupTables};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    match &cli.command {
        Command::UpdateLicenses(args) => update_licenses(args, &config, cli.quiet),
        Command::Generate(args) => {
            let request = GenerationRequest {
                counts: args.counts(),
                pinned: args.pinned(),
                release: args.release.apply(config.release.clone()),
            };
            generate_fixtures(&cli, &config, &args.source, 1, |_, _| request.clone())
        }
        Command::Preset(args) => {
            let preset = Preset::from(args.preset);
            let request = preset.request(&config.release);
            let request = GenerationRequest {
                release: args.release.apply(request.release.clone()),
                ..request
            };
            generate_fixtures(&cli, &config, &args.source, 1, |_, _| request.clone())
        }
        Command::Batch(args) => {
            let scenario = Scenario::from(args.scenario);
            let base = args.release.apply(config.release.clone());
            generate_fixtures(&cli, &config, &args.source, args.count, |i, rng| {
                let request = scenario.request(i, rng, &base);
                // A pinned --name replaces the scenario name; the version stays numbered.
                match &args.release.name {
                    Some(name) => GenerationRequest {
                        release: ReleaseInfo {
                            name: name.clone(),
                            ..request.release.clone()
                        },
                        ..request
                    },
                    None => request,
                }
            })
        }
    }
}

fn update_licenses(args: &UpdateLicensesArgs, config: &Config, quiet: bool) -> Result<()> {
    for path in [&args.license_json, &args.mof_license_json] {
        if !path.exists() {
            eprintln!("{} {} not found", "error:".red().bold(), path.display());
            eprintln!("Usage: mof-fixtures update-licenses <LICENSE_JSON> <MOF_LICENSE_JSON>");
            std::process::exit(1);
        }
    }

    let spdx = read_license_list(&args.license_json)?;
    let mof = read_license_list(&args.mof_license_json)?;

    if !quiet {
        for (label, list) in [("SPDX", &spdx), ("MOF", &mof)] {
            eprintln!(
                "  {} {} license list {} ({} licenses)",
                "→".cyan(),
                label,
                list.license_list_version.as_deref().unwrap_or("unversioned"),
                list.licenses.len()
            );
        }
    }

    let tables = LicenseTables::from_lists(spdx, mof);
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| config.paths.tables_dir.clone());

    let mut written = tables.write_to(&out_dir)?;
    if args.write_components {
        written.push(ComponentCatalog::builtin().write_to(&out_dir)?);
    }

    if !quiet {
        for path in &written {
            eprintln!("  {} YAML file '{}' written", "→".cyan(), path.display());
        }
    }

    println!(
        "Licenses: {}  Valid: {}  Invalid: {}  MOF: {}  Valid MOF: {}",
        tables.all.len(),
        tables.valid.len().to_string().green(),
        tables.invalid.len().to_string().red(),
        tables.mof.len(),
        tables.valid_mof.len().to_string().green(),
    );

    Ok(())
}

/// Generate `count` fixtures, asking `next_request` for each one, then report.
fn generate_fixtures<F>(
    cli: &Cli,
    config: &Config,
    source: &SourceArgs,
    count: usize,
    mut next_request: F,
) -> Result<()>
where
    F: FnMut(usize, &mut StdRng) -> GenerationRequest,
{
    let tables_dir = source
        .tables
        .clone()
        .unwrap_or_else(|| config.paths.tables_dir.clone());
    let out_dir = source
        .out
        .clone()
        .unwrap_or_else(|| config.paths.output_dir.clone());

    let licenses = LookupTables::load(&tables_dir)?;
    let (catalog, builtin) = ComponentCatalog::load_or_builtin(&tables_dir)?;
    if builtin && !cli.quiet {
        eprintln!(
            "  {} no {} in {}, using the built-in MOF components",
            "→".cyan(),
            COMPONENTS_FILE,
            tables_dir.display()
        );
    }

    let rng = match source.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut generator = Generator::new(&licenses, &catalog, rng)
        .with_framework(config.framework.clone())
        .quiet(cli.quiet);

    let pb = if !cli.quiet && count > 1 {
        let pb = ProgressBar::new(count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut summaries = Vec::with_capacity(count);
    let mut written = HashSet::new();
    for i in 0..count {
        let request = next_request(i, generator.rng_mut());
        let fixture = generator.generate(request)?;
        if let Some(pb) = &pb {
            pb.set_message(fixture.name.clone());
            pb.inc(1);
        }

        // Names carry no version, so two fixtures of one run can share a file.
        if !written.insert(fixture.name.clone()) {
            if !cli.quiet {
                let message = format!(
                    "  {} '{}' was already written in this run, skipping",
                    "⚠".yellow(),
                    fixture.name
                );
                match &pb {
                    Some(pb) => pb.suspend(|| eprintln!("{}", message)),
                    None => eprintln!("{}", message),
                }
            }
            continue;
        }

        let path = fixture.write(&out_dir)?;
        if pb.is_none() && !cli.quiet {
            eprintln!("  {} YAML file '{}' written", "→".cyan(), path.display());
        }
        summaries.push(fixture.summary(path));
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&summaries, cli.quiet)?,
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
    }

    Ok(())
}
