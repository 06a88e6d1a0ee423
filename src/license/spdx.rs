use crate::models::License;

/// Open-data licenses accepted for data components even when they are neither
/// OSI-approved nor FSF-libre.
pub const OPEN_DATA_LICENSES: [&str; 31] = [
    "CC0-1.0",
    "CC-BY-1.0",
    "CC-BY-2.0",
    "CC-BY-2.5",
    "CC-BY-2.5-AU",
    "CC-BY-3.0",
    "CC-BY-3.0-AT",
    "CC-BY-3.0-AU",
    "CC-BY-3.0-DE",
    "CC-BY-3.0-IGO",
    "CC-BY-3.0-NL",
    "CC-BY-3.0-US",
    "CC-BY-4.0",
    "CC-BY-SA-1.0",
    "CC-BY-SA-2.0",
    "CC-BY-SA-2.0-UK",
    "CC-BY-SA-2.1-JP",
    "CC-BY-SA-2.5",
    "CC-BY-SA-3.0",
    "CC-BY-SA-3.0-AT",
    "CC-BY-SA-4.0",
    "CDLA-Permissive-1.0",
    "CDLA-Permissive-2.0",
    "CDLA-Sharing-1.0",
    "ODC-PDDL-1.0",
    "ODC-By-1.0",
    "ODbL-1.0",
    "GFDL-1.3",
    "OGL-Canada-2.0",
    "OGL-UK-2.0",
    "OGL-UK-3.0",
];

/// Whether `id` is on the open-data allowlist.
pub fn is_open_data(id: &str) -> bool {
    OPEN_DATA_LICENSES.contains(&id.trim())
}

/// A license is valid when it is OSI-approved, FSF-libre, or an open-data license.
pub fn is_valid(license: &License) -> bool {
    license.is_osi_approved || license.is_fsf_libre() || is_open_data(&license.license_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn license(id: &str, osi: bool, fsf: Option<bool>) -> License {
        License {
            license_id: id.to_string(),
            name: id.to_string(),
            is_osi_approved: osi,
            is_fsf_libre: fsf,
            content_type: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_osi_approved_is_valid() {
        assert!(is_valid(&license("MIT", true, None)));
    }

    #[test]
    fn test_fsf_libre_is_valid() {
        assert!(is_valid(&license("Unlicense", false, Some(true))));
    }

    #[test]
    fn test_open_data_is_valid() {
        assert!(is_valid(&license("CC-BY-4.0", false, None)));
        assert!(is_valid(&license("ODbL-1.0", false, Some(false))));
    }

    #[test]
    fn test_unapproved_is_invalid() {
        assert!(!is_valid(&license("CC-BY-NC-4.0", false, None)));
        assert!(!is_valid(&license("Llama-3", false, Some(false))));
    }

    #[test]
    fn test_is_open_data_trims() {
        assert!(is_open_data(" CC0-1.0 "));
        assert!(!is_open_data("cc0-1.0"));
    }
}
