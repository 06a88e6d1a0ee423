use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// MOF content category. Variant order is the canonical order used when
/// writing the global license section of a release descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[serde(alias = "Distribution")]
    Distribution,
    #[serde(alias = "Code")]
    Code,
    #[serde(alias = "Data")]
    Data,
    #[serde(alias = "Document")]
    Document,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Distribution,
        ContentType::Code,
        ContentType::Data,
        ContentType::Document,
    ];
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Distribution => write!(f, "distribution"),
            ContentType::Code => write!(f, "code"),
            ContentType::Data => write!(f, "data"),
            ContentType::Document => write!(f, "document"),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distribution" => Ok(ContentType::Distribution),
            "code" => Ok(ContentType::Code),
            "data" => Ok(ContentType::Data),
            "document" => Ok(ContentType::Document),
            other => anyhow::bail!(
                "unknown content type '{}' (expected distribution, code, data or document)",
                other
            ),
        }
    }
}

/// A single license record as published in the SPDX or MOF license lists.
///
/// Only the fields the generator reasons about are typed; everything else
/// (`reference`, `seeAlso`, `isDeprecatedLicenseId`, ...) is kept in `extra`
/// so the YAML tables mirror the upstream record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub license_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_osi_approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fsf_libre: Option<bool>,
    /// Only present in the MOF license list.
    #[serde(default, alias = "ContentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl License {
    pub fn is_fsf_libre(&self) -> bool {
        self.is_fsf_libre.unwrap_or(false)
    }
}

/// Envelope of an upstream license-database JSON dump.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseList {
    #[serde(default)]
    pub license_list_version: Option<String>,
    pub licenses: Vec<License>,
}

/// A MOF model component (model architecture, training code, data card, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub content_type: ContentType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_order_is_canonical() {
        let mut types = vec![
            ContentType::Document,
            ContentType::Data,
            ContentType::Distribution,
            ContentType::Code,
        ];
        types.sort();
        assert_eq!(types, ContentType::ALL.to_vec());
    }

    #[test]
    fn test_content_type_from_str() {
        assert_eq!("Code".parse::<ContentType>().unwrap(), ContentType::Code);
        assert_eq!(" data ".parse::<ContentType>().unwrap(), ContentType::Data);
        assert!("weights".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_license_keeps_unknown_fields() {
        let json = r#"{
            "reference": "https://spdx.org/licenses/MIT.html",
            "isDeprecatedLicenseId": false,
            "name": "MIT License",
            "licenseId": "MIT",
            "seeAlso": ["https://opensource.org/license/mit/"],
            "isOsiApproved": true,
            "isFsfLibre": true
        }"#;
        let license: License = serde_json::from_str(json).unwrap();
        assert_eq!(license.license_id, "MIT");
        assert!(license.is_osi_approved);
        assert!(license.is_fsf_libre());
        assert!(license.content_type.is_none());
        assert!(license.extra.contains_key("seeAlso"));
        assert!(license.extra.contains_key("reference"));
    }

    #[test]
    fn test_license_accepts_capitalised_content_type_key() {
        let json = r#"{"licenseId": "Apache-2.0", "isOsiApproved": true, "ContentType": "code"}"#;
        let license: License = serde_json::from_str(json).unwrap();
        assert_eq!(license.content_type, Some(ContentType::Code));
        assert_eq!(license.is_fsf_libre, None);
    }
}
