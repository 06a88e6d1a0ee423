use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::{Component, ContentType};

pub const COMPONENTS_FILE: &str = "Components.yml";

/// The MOF v1.0 components, in id order.
const BUILTIN_COMPONENTS: [(&str, &str, ContentType); 17] = [
    (
        "Model architecture",
        "Well commented code for the model's architecture",
        ContentType::Code,
    ),
    (
        "Data preprocessing code",
        "Code for data cleansing, normalization, and augmentation",
        ContentType::Code,
    ),
    (
        "Training code",
        "Code used for training the model",
        ContentType::Code,
    ),
    (
        "Inference code",
        "Code used for running the model to make predictions",
        ContentType::Code,
    ),
    (
        "Evaluation code",
        "Code used for evaluating the model",
        ContentType::Code,
    ),
    (
        "Supporting libraries and tools",
        "Libraries and tools used in the model's development",
        ContentType::Code,
    ),
    (
        "Model parameters (Final)",
        "Trained model parameters, weights and biases",
        ContentType::Data,
    ),
    (
        "Model parameters (Intermediate)",
        "Trained model parameters, weights and biases from intermediate checkpoints",
        ContentType::Data,
    ),
    (
        "Datasets",
        "Training, validation and testing datasets used for the model",
        ContentType::Data,
    ),
    (
        "Evaluation data",
        "Data used for evaluating the model",
        ContentType::Data,
    ),
    (
        "Model metadata",
        "Any model metadata including training configuration and optimizer states",
        ContentType::Data,
    ),
    (
        "Sample model outputs",
        "Examples of outputs generated by the model",
        ContentType::Document,
    ),
    (
        "Model card",
        "Model details including performance metrics, intended use, and limitations",
        ContentType::Document,
    ),
    (
        "Data card",
        "Documentation for datasets including source, characteristics, and preprocessing details",
        ContentType::Document,
    ),
    (
        "Technical report",
        "Technical report detailing capabilities of the model",
        ContentType::Document,
    ),
    (
        "Research paper",
        "Research paper detailing the development and capabilities of the model",
        ContentType::Document,
    ),
    (
        "Evaluation results",
        "The results from evaluating the model",
        ContentType::Document,
    ),
];

/// Components keyed by their MOF id.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentCatalog {
    components: BTreeMap<u32, Component>,
}

impl ComponentCatalog {
    pub fn builtin() -> Self {
        let components = BUILTIN_COMPONENTS
            .iter()
            .enumerate()
            .map(|(id, (name, description, content_type))| {
                (
                    id as u32,
                    Component {
                        name: name.to_string(),
                        description: description.to_string(),
                        content_type: *content_type,
                    },
                )
            })
            .collect();
        ComponentCatalog { components }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read components table {}", path.display()))?;
        let components: BTreeMap<u32, Component> = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse components table {}", path.display()))?;
        Ok(ComponentCatalog { components })
    }

    /// Load `Components.yml` from `dir`, falling back to the built-in catalog.
    /// The flag reports whether the fallback was used.
    pub fn load_or_builtin(dir: &Path) -> Result<(Self, bool)> {
        let path = dir.join(COMPONENTS_FILE);
        if path.exists() {
            return Ok((Self::load(&path)?, false));
        }
        Ok((Self::builtin(), true))
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(COMPONENTS_FILE);
        let yaml = serde_yaml::to_string(&self.components)?;
        std::fs::write(&path, yaml)
            .with_context(|| format!("Failed to write components table {}", path.display()))?;
        Ok(path)
    }

    pub fn get(&self, id: u32) -> Option<&Component> {
        self.components.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.components.keys().copied()
    }

    /// Whether a global license of `license_type` covers component `id`.
    ///
    /// A distribution license covers every component; the other types cover
    /// components of the same content type.
    pub fn covered_by(&self, license_type: ContentType, id: u32) -> bool {
        match self.get(id) {
            Some(_) if license_type == ContentType::Distribution => true,
            Some(component) => component.content_type == license_type,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ids_of(catalog: &ComponentCatalog, ty: ContentType) -> Vec<u32> {
        catalog
            .ids()
            .filter(|id| catalog.get(*id).unwrap().content_type == ty)
            .collect()
    }

    #[test]
    fn test_builtin_content_type_ranges() {
        let catalog = ComponentCatalog::builtin();
        assert_eq!(catalog.ids().count(), 17);
        assert_eq!(ids_of(&catalog, ContentType::Code), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(ids_of(&catalog, ContentType::Data), vec![6, 7, 8, 9, 10]);
        assert_eq!(
            ids_of(&catalog, ContentType::Document),
            vec![11, 12, 13, 14, 15, 16]
        );
    }

    #[test]
    fn test_distribution_covers_everything() {
        let catalog = ComponentCatalog::builtin();
        assert!(catalog.ids().all(|id| catalog.covered_by(ContentType::Distribution, id)));
        assert!(!catalog.covered_by(ContentType::Distribution, 99));
    }

    #[test]
    fn test_typed_license_covers_matching_components() {
        let catalog = ComponentCatalog::builtin();
        assert!(catalog.covered_by(ContentType::Code, 2));
        assert!(!catalog.covered_by(ContentType::Code, 6));
        assert!(catalog.covered_by(ContentType::Data, 10));
        assert!(catalog.covered_by(ContentType::Document, 11));
        assert!(!catalog.covered_by(ContentType::Document, 5));
    }

    #[test]
    fn test_write_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let catalog = ComponentCatalog::builtin();
        catalog.write_to(dir.path()).unwrap();

        let (loaded, fallback) = ComponentCatalog::load_or_builtin(dir.path()).unwrap();
        assert!(!fallback);
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let (catalog, fallback) = ComponentCatalog::load_or_builtin(dir.path()).unwrap();
        assert!(fallback);
        assert_eq!(catalog.get(12).unwrap().name, "Model card");
    }
}
