use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::ContentType;

/// A complete release descriptor as written to a fixture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    pub framework: FrameworkInfo,
    pub release: Release,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkInfo {
    pub name: String,
    pub version: String,
    pub date: String,
}

impl Default for FrameworkInfo {
    fn default() -> Self {
        FrameworkInfo {
            name: "Model Openness Framework".to_string(),
            version: "1.0".to_string(),
            date: "2024-12-15".to_string(),
        }
    }
}

/// Descriptive release fields, shared by the config file and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseInfo {
    pub name: String,
    pub version: String,
    pub date: String,
    #[serde(rename = "type")]
    pub release_type: String,
    pub architecture: String,
    pub origin: String,
    pub producer: String,
    pub contact: String,
    pub repository: String,
    pub huggingface: String,
}

impl Default for ReleaseInfo {
    fn default() -> Self {
        ReleaseInfo {
            name: "Test".to_string(),
            version: "Test10B".to_string(),
            date: "2025-06-17".to_string(),
            release_type: "multimodal".to_string(),
            architecture: "RNN".to_string(),
            origin: "Pre-Test".to_string(),
            producer: "Test2".to_string(),
            contact: String::new(),
            repository: "https://github.com".to_string(),
            huggingface: "https://huggingface.co".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    #[serde(flatten)]
    pub info: ReleaseInfo,
    /// Global licenses; `ContentType` ordering keeps the section canonical.
    #[serde(default)]
    pub license: BTreeMap<ContentType, GlobalLicense>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalLicense {
    pub name: String,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_path: Option<String>,
}

impl ReleaseDescriptor {
    pub fn new(framework: FrameworkInfo, info: ReleaseInfo) -> Self {
        ReleaseDescriptor {
            framework,
            release: Release {
                info,
                license: BTreeMap::new(),
                components: Vec::new(),
            },
        }
    }

    /// Serialize to YAML with `date` values single-quoted, so YAML 1.1
    /// readers keep them as strings instead of timestamps.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(quote_dates(&serde_yaml::to_string(self)?))
    }

    /// Write the descriptor to `<dir>/<file_stem>.yml`.
    pub fn write(&self, dir: &Path, file_stem: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        let path = dir.join(format!("{}.yml", file_stem));
        std::fs::write(&path, self.to_yaml()?)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}

fn quote_dates(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len() + 8);
    for line in yaml.lines() {
        let indent = line.len() - line.trim_start().len();
        match line.trim_start().strip_prefix("date: ") {
            Some(value) if is_plain_date(value) => {
                out.push_str(&line[..indent]);
                out.push_str("date: '");
                out.push_str(value);
                out.push('\'');
            }
            _ => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

/// `YYYY-MM-DD`
fn is_plain_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_layout() {
        let mut descriptor = ReleaseDescriptor::new(FrameworkInfo::default(), ReleaseInfo::default());
        descriptor.release.license.insert(
            ContentType::Data,
            GlobalLicense {
                name: "CC-BY-4.0".to_string(),
                path: String::new(),
            },
        );
        descriptor.release.license.insert(
            ContentType::Distribution,
            GlobalLicense {
                name: "Apache-2.0".to_string(),
                path: "https://example.com/global_license_0".to_string(),
            },
        );
        descriptor.release.components.push(ComponentEntry {
            name: "Model card".to_string(),
            description: "Model details".to_string(),
            component_path: None,
            license: Some("MIT".to_string()),
            license_path: None,
        });

        let yaml = descriptor.to_yaml().unwrap();
        let framework = yaml.find("framework:").unwrap();
        let release = yaml.find("release:").unwrap();
        assert!(framework < release);
        assert!(yaml.contains("name: Model Openness Framework"));
        assert!(yaml.contains("type: multimodal"));

        let distribution = yaml.find("distribution:").unwrap();
        let data = yaml.find("data:").unwrap();
        assert!(distribution < data, "global licenses out of order:\n{}", yaml);

        assert!(yaml.contains("license: MIT"));
        assert!(!yaml.contains("component_path"));
        assert!(!yaml.contains("license_path"));
    }

    #[test]
    fn test_dates_are_quoted() {
        let descriptor = ReleaseDescriptor::new(FrameworkInfo::default(), ReleaseInfo::default());
        let yaml = descriptor.to_yaml().unwrap();
        assert!(yaml.contains("  date: '2024-12-15'\n"), "{}", yaml);
        assert!(yaml.contains("  date: '2025-06-17'\n"), "{}", yaml);
        assert!(!yaml.contains("date: 20"), "{}", yaml);

        let loaded: ReleaseDescriptor = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(loaded.framework.date, "2024-12-15");
        assert_eq!(loaded.release.info.date, "2025-06-17");
    }

    #[test]
    fn test_only_plain_dates_are_requoted() {
        assert!(is_plain_date("2025-06-17"));
        assert!(!is_plain_date("2025-6-17"));
        assert!(!is_plain_date("'2025-06-17'"));
        assert!(!is_plain_date("June 2025"));

        let yaml = "name: date: 2025-06-17\n  date: June 2025\n";
        assert_eq!(quote_dates(yaml), yaml);
    }

    #[test]
    fn test_components_key_omitted_when_empty() {
        let descriptor = ReleaseDescriptor::new(FrameworkInfo::default(), ReleaseInfo::default());
        let yaml = descriptor.to_yaml().unwrap();
        assert!(!yaml.contains("components"));
        assert!(yaml.contains("license: {}"));
    }

    #[test]
    fn test_write_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let descriptor = ReleaseDescriptor::new(FrameworkInfo::default(), ReleaseInfo::default());
        let path = descriptor.write(dir.path(), "Fixture").unwrap();
        assert_eq!(path.file_name().unwrap(), "Fixture.yml");
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: ReleaseDescriptor = serde_yaml::from_str(&content).unwrap();
        assert_eq!(loaded, descriptor);
    }
}
