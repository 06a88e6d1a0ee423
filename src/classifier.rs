//! Model Openness Framework classification.
//!
//! A release is scored against each class by the share of the class's required
//! components that carry a valid license. Classes 2 and 3 each come in two
//! flavours: one requiring the technical report, one accepting the research
//! paper instead.

use std::collections::BTreeSet;

use serde::Serialize;

pub const TECHNICAL_REPORT: u32 = 14;
pub const RESEARCH_PAPER: u32 = 15;

pub const CLASS_1: [u32; 14] = [0, 1, 2, 3, 4, 6, 7, 8, 9, 12, 13, 14, 15, 16];
// Supporting libraries and tools (5) are left out of Class 2.
pub const CLASS_2T: [u32; 10] = [0, 6, 14, 16, 12, 13, 2, 3, 4, 9];
pub const CLASS_2R: [u32; 10] = [0, 6, 15, 16, 12, 13, 2, 3, 4, 9];
pub const CLASS_3T: [u32; 6] = [0, 6, 14, 16, 12, 13];
pub const CLASS_3R: [u32; 6] = [0, 6, 15, 16, 12, 13];

/// Per-class completeness percentages, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub class_1: u8,
    pub class_2: u8,
    pub class_3: u8,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "C1_{}%-C2_{}%-C3_{}%",
            self.class_1, self.class_2, self.class_3
        )
    }
}

/// Classify a release from the ids of its validly licensed components.
pub fn classify(valid_ids: &[u32]) -> Classification {
    let ids: BTreeSet<u32> = valid_ids.iter().copied().collect();
    Classification {
        class_1: class_1_percentage(&ids),
        class_2: paired_percentage(&ids, &CLASS_2T, &CLASS_2R),
        class_3: paired_percentage(&ids, &CLASS_3T, &CLASS_3R),
    }
}

fn class_1_percentage(ids: &BTreeSet<u32>) -> u8 {
    if contains_all(ids, &CLASS_1) {
        return 100;
    }
    let present = CLASS_1.iter().filter(|id| ids.contains(id)).count();
    // A research paper may stand in for a missing technical report; with both
    // present each counts against the full set.
    let required = if ids.contains(&RESEARCH_PAPER) && !ids.contains(&TECHNICAL_REPORT) {
        CLASS_1.len() - 1
    } else {
        CLASS_1.len()
    };
    percentage(present, required)
}

fn paired_percentage(ids: &BTreeSet<u32>, with_report: &[u32], with_paper: &[u32]) -> u8 {
    if contains_all(ids, with_report) || contains_all(ids, with_paper) {
        return 100;
    }
    let mut present = ids
        .iter()
        .filter(|id| with_report.contains(id) || with_paper.contains(id))
        .count();
    // The report and the paper fill the same slot.
    if ids.contains(&TECHNICAL_REPORT) && ids.contains(&RESEARCH_PAPER) {
        present -= 1;
    }
    percentage(present, with_report.len())
}

fn contains_all(ids: &BTreeSet<u32>, required: &[u32]) -> bool {
    required.iter().all(|id| ids.contains(id))
}

fn percentage(present: usize, required: usize) -> u8 {
    if required == 0 {
        return 100;
    }
    let pct = (present as f64 / required as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_release() {
        let c = classify(&[]);
        assert_eq!(c.to_string(), "C1_0%-C2_0%-C3_0%");
    }

    #[test]
    fn test_all_components() {
        let all: Vec<u32> = (0..17).collect();
        assert_eq!(classify(&all).to_string(), "C1_100%-C2_100%-C3_100%");
    }

    #[test]
    fn test_class_3_with_technical_report() {
        let c = classify(&CLASS_3T);
        assert_eq!(c.class_3, 100);
        assert_eq!(c.class_2, 60);
        assert_eq!(c.class_1, 43);
    }

    #[test]
    fn test_class_3_with_research_paper() {
        let c = classify(&CLASS_3R);
        assert_eq!(c.class_3, 100);
        assert_eq!(c.class_2, 60);
        // 6 of 13 once the paper replaces the report
        assert_eq!(c.class_1, 46);
    }

    #[test]
    fn test_class_2_variants() {
        let mut ids = CLASS_2T.to_vec();
        ids.push(5);
        let c = classify(&ids);
        assert_eq!((c.class_2, c.class_3), (100, 100));
        assert_eq!(c.class_1, 71);

        let c = classify(&CLASS_2R);
        assert_eq!((c.class_2, c.class_3), (100, 100));
        assert_eq!(c.class_1, 77);
    }

    #[test]
    fn test_class_1_accepts_paper_without_report() {
        let ids: Vec<u32> = CLASS_1
            .iter()
            .copied()
            .filter(|id| *id != TECHNICAL_REPORT)
            .collect();
        let c = classify(&ids);
        assert_eq!(c.to_string(), "C1_100%-C2_100%-C3_100%");
    }

    #[test]
    fn test_class_1_with_report_and_paper_but_incomplete() {
        // Class 1 without the model architecture: 13 of 14, no denominator change
        let ids = [1, 2, 3, 4, 6, 7, 8, 9, 12, 13, 14, 15, 16];
        let c = classify(&ids);
        assert_eq!(c.to_string(), "C1_93%-C2_90%-C3_83%");
    }

    #[test]
    fn test_report_and_paper_count_once() {
        // 0, 14, 15: both documents occupy one class 3 slot
        let c = classify(&[0, 14, 15]);
        assert_eq!(c.class_3, 33);
        assert_eq!(c.class_2, 20);
    }

    #[test]
    fn test_duplicates_and_unknown_ids_ignored() {
        let c = classify(&[0, 0, 0, 42, 99]);
        assert_eq!(c, classify(&[0]));
    }

    #[test]
    fn test_percentages_never_exceed_100() {
        // Exhaustive over every subset of the 17 component ids.
        for mask in 0u32..(1 << 17) {
            let ids: Vec<u32> = (0..17).filter(|i| mask & (1 << i) != 0).collect();
            let c = classify(&ids);
            assert!(c.class_1 <= 100 && c.class_2 <= 100 && c.class_3 <= 100, "{:?}", ids);
        }
    }
}
