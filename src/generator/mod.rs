//! Synthetic release-descriptor generation.
//!
//! - [`descriptor`]: the YAML document written for each fixture.
//! - [`scenario`]: canonical presets and randomized batch scenarios that
//!   produce [`GenerationRequest`]s.
//!
//! [`Generator::generate`] tops up whatever the request pins (component ids,
//! licenses, global licenses) with random picks until the requested counts are
//! met, then classifies the validly licensed components.

pub mod descriptor;
pub mod scenario;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use colored::Colorize;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use serde::Serialize;

use crate::classifier::{classify, Classification};
use crate::components::ComponentCatalog;
use crate::license::spdx::OPEN_DATA_LICENSES;
use crate::license::tables::{LicenseTable, LookupTables};
use crate::models::ContentType;

use descriptor::{ComponentEntry, FrameworkInfo, GlobalLicense, ReleaseDescriptor, ReleaseInfo};

/// How many of each thing a fixture should contain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FixtureCounts {
    pub components: usize,
    pub global_licenses: usize,
    pub component_licenses: usize,
    pub valid: usize,
    pub invalid: usize,
    pub type_appropriate: usize,
}

impl std::fmt::Display for FixtureCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}C_{}G_{}L_{}V_{}I_{}T",
            self.components,
            self.global_licenses,
            self.component_licenses,
            self.valid,
            self.invalid,
            self.type_appropriate
        )
    }
}

/// Inputs fixed by the caller. Each list is paired positionally; missing
/// entries are filled in (ids, licenses) or left empty (paths).
///
/// Pinned `license_ids` beyond `FixtureCounts::component_licenses` are still
/// written, but the `L` flag reports the requested count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinnedInputs {
    pub component_ids: Vec<u32>,
    pub license_ids: Vec<String>,
    pub global_licenses: Vec<(ContentType, String)>,
    pub component_paths: Vec<String>,
    pub global_license_paths: Vec<String>,
    pub license_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub counts: FixtureCounts,
    pub pinned: PinnedInputs,
    pub release: ReleaseInfo,
}

/// A generated fixture, ready to be written.
#[derive(Debug, Clone)]
pub struct GeneratedFixture {
    pub name: String,
    pub descriptor: ReleaseDescriptor,
    /// The counts encoded in the fixture name.
    pub flags: FixtureCounts,
    pub classification: Classification,
    pub valid_component_ids: Vec<u32>,
}

impl GeneratedFixture {
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        self.descriptor.write(dir, &self.name)
    }

    pub fn summary(&self, path: PathBuf) -> FixtureSummary {
        FixtureSummary {
            path,
            name: self.name.clone(),
            components: self.descriptor.release.components.len(),
            global_licenses: self.descriptor.release.license.len(),
            valid_components: self.valid_component_ids.len(),
            classification: self.classification.to_string(),
            flags: self.flags,
        }
    }
}

/// What the report prints for each written fixture.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureSummary {
    pub path: PathBuf,
    pub name: String,
    pub components: usize,
    pub global_licenses: usize,
    pub valid_components: usize,
    pub classification: String,
    pub flags: FixtureCounts,
}

#[derive(Debug, Default)]
struct LicenseTally {
    valid: usize,
    invalid: usize,
    type_appropriate: usize,
}

#[derive(Debug)]
struct ComponentRow {
    id: u32,
    license: Option<String>,
    component_path: Option<String>,
    license_path: Option<String>,
}

pub struct Generator<'a, R: Rng> {
    licenses: &'a LookupTables,
    catalog: &'a ComponentCatalog,
    framework: FrameworkInfo,
    rng: R,
    quiet: bool,
}

impl<'a, R: Rng> Generator<'a, R> {
    pub fn new(licenses: &'a LookupTables, catalog: &'a ComponentCatalog, rng: R) -> Self {
        Generator {
            licenses,
            catalog,
            framework: FrameworkInfo::default(),
            rng,
            quiet: false,
        }
    }

    pub fn with_framework(mut self, framework: FrameworkInfo) -> Self {
        self.framework = framework;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn generate(&mut self, request: GenerationRequest) -> Result<GeneratedFixture> {
        let GenerationRequest {
            counts,
            pinned,
            release,
        } = request;
        let PinnedInputs {
            mut component_ids,
            mut license_ids,
            mut global_licenses,
            component_paths,
            global_license_paths,
            license_paths,
        } = pinned;

        self.check_pinned(&component_ids, &global_licenses)?;
        let mut flags = counts;

        // Global licenses
        if counts.global_licenses > ContentType::ALL.len() {
            bail!(
                "Cannot declare {} global licenses: only {} content types exist",
                counts.global_licenses,
                ContentType::ALL.len()
            );
        }
        while global_licenses.len() < counts.global_licenses {
            let pick = self.random_global_license(&global_licenses)?;
            global_licenses.push(pick);
        }
        flags.global_licenses = global_licenses.len();

        // Components
        if counts.components > component_ids.len() {
            let extra = self.random_component_ids(counts.components - component_ids.len(), &component_ids)?;
            component_ids.extend(extra);
        }
        flags.components = component_ids.len();

        // Component licenses
        if counts.component_licenses > component_ids.len() {
            bail!(
                "Cannot assign {} component licenses to {} components",
                counts.component_licenses,
                component_ids.len()
            );
        }
        if license_ids.len() > component_ids.len() {
            bail!(
                "{} license ids were given for {} components",
                license_ids.len(),
                component_ids.len()
            );
        }
        if counts.component_licenses > license_ids.len() {
            let tables = self.licenses;
            let mut tally = self.tally(&license_ids, &component_ids);
            for i in license_ids.len()..counts.component_licenses {
                let component_id = component_ids[i];
                let license_id = if tally.type_appropriate < counts.type_appropriate {
                    tally.type_appropriate += 1;
                    tally.valid += 1;
                    self.type_appropriate_license(component_id)?
                } else if tally.valid < counts.valid {
                    tally.valid += 1;
                    self.random_key(&tables.valid, "valid")?
                } else if tally.invalid < counts.invalid {
                    tally.invalid += 1;
                    self.random_key(&tables.invalid, "invalid")?
                } else {
                    self.warn(
                        "Requested license counts cannot fill every component license; picking random licenses instead.",
                    );
                    let license_id = self.random_key(&tables.licenses, "known")?;
                    if self.is_type_appropriate(&license_id, component_id) {
                        tally.type_appropriate += 1;
                    } else if tables.valid.contains_key(&license_id) {
                        tally.valid += 1;
                    } else {
                        tally.invalid += 1;
                    }
                    license_id
                };
                license_ids.push(license_id);
            }
        }

        let mut descriptor = ReleaseDescriptor::new(self.framework.clone(), release);
        for (i, (license_type, license_id)) in global_licenses.iter().enumerate() {
            descriptor.release.license.insert(
                *license_type,
                GlobalLicense {
                    name: license_id.clone(),
                    path: global_license_paths.get(i).cloned().unwrap_or_default(),
                },
            );
        }

        let mut rows: Vec<ComponentRow> = component_ids
            .iter()
            .enumerate()
            .map(|(i, id)| ComponentRow {
                id: *id,
                license: license_ids.get(i).cloned(),
                component_path: non_empty(component_paths.get(i)),
                license_path: non_empty(license_paths.get(i)),
            })
            .collect();
        rows.sort_by_key(|row| row.id);

        let mut valid_component_ids = Vec::new();
        let mut covered_by_global = 0;
        for row in &rows {
            let Some(component) = self.catalog.get(row.id) else {
                bail!("Component id {} is not in the components table", row.id);
            };
            descriptor.release.components.push(ComponentEntry {
                name: component.name.clone(),
                description: component.description.clone(),
                component_path: row.component_path.clone(),
                license: row.license.clone(),
                license_path: row.license_path.clone(),
            });

            match row.license.as_deref() {
                Some(id) if self.licenses.valid.contains_key(id) => valid_component_ids.push(row.id),
                Some(id) if self.licenses.licenses.contains_key(id) => {}
                _ => {
                    let covered = global_licenses
                        .iter()
                        .any(|(license_type, _)| self.catalog.covered_by(*license_type, row.id));
                    if covered {
                        valid_component_ids.push(row.id);
                        covered_by_global += 1;
                    }
                }
            }
        }
        flags.valid += covered_by_global;
        flags.type_appropriate += covered_by_global;

        let classification = classify(&valid_component_ids);
        let name = format!("{}_{}_{}", descriptor.release.info.name, classification, flags);
        descriptor.release.info.name = name.clone();

        Ok(GeneratedFixture {
            name,
            descriptor,
            flags,
            classification,
            valid_component_ids,
        })
    }

    fn check_pinned(&self, component_ids: &[u32], global_licenses: &[(ContentType, String)]) -> Result<()> {
        for (i, id) in component_ids.iter().enumerate() {
            if self.catalog.get(*id).is_none() {
                bail!("Component id {} is not in the components table", id);
            }
            if component_ids[..i].contains(id) {
                bail!("Component id {} is listed more than once", id);
            }
        }
        for (i, (license_type, _)) in global_licenses.iter().enumerate() {
            if global_licenses[..i].iter().any(|(t, _)| t == license_type) {
                bail!("Global license for '{}' is listed more than once", license_type);
            }
        }
        Ok(())
    }

    fn random_global_license(&mut self, existing: &[(ContentType, String)]) -> Result<(ContentType, String)> {
        let available: Vec<ContentType> = ContentType::ALL
            .into_iter()
            .filter(|t| !existing.iter().any(|(e, _)| e == t))
            .collect();
        let Some(license_type) = available.choose(&mut self.rng).copied() else {
            bail!("Every content type already has a global license");
        };

        let candidates: Vec<String> = match license_type {
            ContentType::Distribution => self.licenses.mof_licenses.keys().cloned().collect(),
            ContentType::Data => OPEN_DATA_LICENSES.iter().map(|s| s.to_string()).collect(),
            other => self.mof_licenses_of(other),
        };
        match candidates.choose(&mut self.rng) {
            Some(license_id) => Ok((license_type, license_id.clone())),
            None => bail!("No MOF license is available for '{}' global licenses", license_type),
        }
    }

    fn random_component_ids(&mut self, needed: usize, taken: &[u32]) -> Result<Vec<u32>> {
        let available: Vec<u32> = self.catalog.ids().filter(|id| !taken.contains(id)).collect();
        if available.len() < needed {
            bail!(
                "Cannot add {} components: only {} unused components remain",
                needed,
                available.len()
            );
        }
        Ok(available
            .choose_multiple(&mut self.rng, needed)
            .copied()
            .collect())
    }

    fn type_appropriate_license(&mut self, component_id: u32) -> Result<String> {
        let Some(content_type) = self.catalog.get(component_id).map(|c| c.content_type) else {
            bail!("Component id {} is not in the components table", component_id);
        };
        if content_type == ContentType::Data {
            let Some(license_id) = OPEN_DATA_LICENSES.choose(&mut self.rng) else {
                bail!("The open-data license list is empty");
            };
            return Ok(license_id.to_string());
        }
        let candidates = self.mof_licenses_of(content_type);
        match candidates.choose(&mut self.rng) {
            Some(license_id) => Ok(license_id.clone()),
            None => bail!("No MOF license is available for '{}' components", content_type),
        }
    }

    fn random_key(&mut self, table: &LicenseTable, label: &str) -> Result<String> {
        match table.keys().choose(&mut self.rng) {
            Some(license_id) => Ok(license_id.clone()),
            None => bail!("The {} license table is empty", label),
        }
    }

    fn mof_licenses_of(&self, content_type: ContentType) -> Vec<String> {
        self.licenses
            .mof_licenses
            .iter()
            .filter(|(_, l)| l.content_type == Some(content_type))
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn is_type_appropriate(&self, license_id: &str, component_id: u32) -> bool {
        let component_type = self.catalog.get(component_id).map(|c| c.content_type);
        self.licenses
            .mof_licenses
            .get(license_id)
            .is_some_and(|l| l.content_type.is_some() && l.content_type == component_type)
    }

    fn tally(&self, license_ids: &[String], component_ids: &[u32]) -> LicenseTally {
        LicenseTally {
            valid: license_ids
                .iter()
                .filter(|id| self.licenses.valid.contains_key(*id))
                .count(),
            invalid: license_ids
                .iter()
                .filter(|id| self.licenses.invalid.contains_key(*id))
                .count(),
            type_appropriate: license_ids
                .iter()
                .zip(component_ids)
                .filter(|(license_id, component_id)| self.is_type_appropriate(license_id, **component_id))
                .count(),
        }
    }

    fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("  {} {}", "⚠".yellow(), message);
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}
