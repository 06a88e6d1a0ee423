use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::license::spdx::is_valid;
use crate::models::{License, LicenseList};

pub const LICENSES_FILE: &str = "licenses.yml";
pub const MOF_LICENSES_FILE: &str = "mof-licenses.yml";
pub const VALID_LICENSES_FILE: &str = "valid-licenses.yml";
pub const VALID_MOF_LICENSES_FILE: &str = "valid-mof-licenses.yml";
pub const INVALID_LICENSES_FILE: &str = "invalid-licenses.yml";

/// License records keyed by `licenseId`.
pub type LicenseTable = BTreeMap<String, License>;

/// The five lookup tables derived from the SPDX and MOF license lists.
#[derive(Debug, Clone, Default)]
pub struct LicenseTables {
    /// Every SPDX license.
    pub all: LicenseTable,
    /// Every MOF license.
    pub mof: LicenseTable,
    /// SPDX licenses passing [`is_valid`].
    pub valid: LicenseTable,
    /// MOF licenses passing [`is_valid`].
    pub valid_mof: LicenseTable,
    /// SPDX licenses failing [`is_valid`].
    pub invalid: LicenseTable,
}

impl LicenseTables {
    pub fn from_lists(spdx: LicenseList, mof: LicenseList) -> Self {
        let all = index(spdx.licenses);
        let mof = index(mof.licenses);
        let valid = filter_valid(&all);
        let valid_mof = filter_valid(&mof);
        let invalid = all
            .iter()
            .filter(|(id, _)| !valid.contains_key(*id))
            .map(|(id, l)| (id.clone(), l.clone()))
            .collect();

        LicenseTables {
            all,
            mof,
            valid,
            valid_mof,
            invalid,
        }
    }

    /// Write all five tables into `dir`, returning the written paths in order.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        let outputs = [
            (LICENSES_FILE, &self.all),
            (MOF_LICENSES_FILE, &self.mof),
            (VALID_LICENSES_FILE, &self.valid),
            (VALID_MOF_LICENSES_FILE, &self.valid_mof),
            (INVALID_LICENSES_FILE, &self.invalid),
        ];

        let mut written = Vec::with_capacity(outputs.len());
        for (file_name, table) in outputs {
            let path = dir.join(file_name);
            write_table(table, &path)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Tables the fixture generator reads from a tables directory.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    pub licenses: LicenseTable,
    /// Valid MOF licenses; the pool for type-appropriate and global licenses.
    pub mof_licenses: LicenseTable,
    pub valid: LicenseTable,
    pub invalid: LicenseTable,
}

impl LookupTables {
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(LookupTables {
            licenses: load_table(&dir.join(LICENSES_FILE))?,
            mof_licenses: load_table(&dir.join(VALID_MOF_LICENSES_FILE))?,
            valid: load_table(&dir.join(VALID_LICENSES_FILE))?,
            invalid: load_table(&dir.join(INVALID_LICENSES_FILE))?,
        })
    }
}

impl From<LicenseTables> for LookupTables {
    fn from(tables: LicenseTables) -> Self {
        LookupTables {
            licenses: tables.all,
            mof_licenses: tables.valid_mof,
            valid: tables.valid,
            invalid: tables.invalid,
        }
    }
}

/// Parse an upstream license-database JSON dump.
pub fn read_license_list(path: &Path) -> Result<LicenseList> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read license list {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse license list {}", path.display()))
}

/// Read one YAML lookup table.
pub fn load_table(path: &Path) -> Result<LicenseTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read license table {}", path.display()))?;
    let table: Option<LicenseTable> = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse license table {}", path.display()))?;
    Ok(table.unwrap_or_default())
}

pub fn write_table(table: &LicenseTable, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(table)?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write license table {}", path.display()))
}

fn index(licenses: Vec<License>) -> LicenseTable {
    licenses
        .into_iter()
        .map(|l| (l.license_id.clone(), l))
        .collect()
}

fn filter_valid(table: &LicenseTable) -> LicenseTable {
    table
        .iter()
        .filter(|(_, l)| is_valid(l))
        .map(|(id, l)| (id.clone(), l.clone()))
        .collect()
}
