use rand::Rng;

use super::descriptor::ReleaseInfo;
use super::{FixtureCounts, GenerationRequest, PinnedInputs};

/// Canonical fixtures with fixed component sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Minimal,
    Full,
    Class1,
    Class2T,
    Class2R,
    Class3T,
    Class3R,
}

/// Randomized fixture families for batch generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Every component licensed, random valid/invalid split, up to four globals.
    Random,
    /// Only global licenses.
    GlobalOnly,
    /// No licenses at all.
    Unlicensed,
    /// Every component licensed, no globals.
    ComponentOnly,
    /// Partial licensing and partial paths.
    Mixed,
}

/// `https://example.com/<kind>_<i>` for `i` in `0..n`.
pub fn example_paths(kind: &str, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("https://example.com/{}_{}", kind, i))
        .collect()
}

impl Preset {
    pub fn request(self, base: &ReleaseInfo) -> GenerationRequest {
        let (component_ids, globals, name, version): (Vec<u32>, usize, &str, &str) = match self {
            Preset::Minimal => (Vec::new(), 0, "MinimalFile", "0B"),
            Preset::Full => ((0..17).collect(), 4, "FullTestFile", "1B"),
            Preset::Class1 => (
                vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 11, 12, 13, 15, 16],
                2,
                "Class1TestFile",
                "2B",
            ),
            Preset::Class2T => (
                vec![0, 6, 14, 16, 12, 13, 2, 3, 4, 9, 5],
                1,
                "Class2TTestFile",
                "3B",
            ),
            Preset::Class2R => (
                vec![0, 6, 15, 16, 12, 13, 2, 3, 4, 9, 5],
                1,
                "Class2RTestFile",
                "4B",
            ),
            Preset::Class3T => (vec![0, 6, 14, 16, 12, 13], 1, "Class3TTestFile", "5B"),
            Preset::Class3R => (vec![0, 6, 15, 16, 12, 13], 1, "Class3RTestFile", "6B"),
        };

        let release = ReleaseInfo {
            name: name.to_string(),
            version: version.to_string(),
            producer: "Test".to_string(),
            ..base.clone()
        };

        if self == Preset::Minimal {
            return GenerationRequest {
                counts: FixtureCounts {
                    components: 1,
                    ..FixtureCounts::default()
                },
                pinned: PinnedInputs::default(),
                release,
            };
        }

        let n = component_ids.len();
        GenerationRequest {
            counts: FixtureCounts {
                components: n,
                global_licenses: globals,
                component_licenses: n,
                valid: n,
                invalid: 0,
                type_appropriate: n,
            },
            pinned: PinnedInputs {
                component_ids,
                component_paths: example_paths("component", n),
                global_license_paths: example_paths("global_license", globals),
                license_paths: example_paths("license", n),
                ..PinnedInputs::default()
            },
            release,
        }
    }
}

impl Scenario {
    /// Build the request for the `index`-th (zero-based) fixture of a batch.
    pub fn request<R: Rng>(self, index: usize, rng: &mut R, base: &ReleaseInfo) -> GenerationRequest {
        let version = format!("{}B", index + 1);
        let (name, counts, path_counts) = match self {
            Scenario::Random | Scenario::ComponentOnly => {
                let components = rng.gen_range(1..=16);
                let global_licenses = if self == Scenario::Random {
                    rng.gen_range(0..=4)
                } else {
                    0
                };
                let valid = rng.gen_range(0..=components);
                let counts = FixtureCounts {
                    components,
                    global_licenses,
                    component_licenses: components,
                    valid,
                    invalid: components - valid,
                    type_appropriate: rng.gen_range(0..=valid),
                };
                let name = if self == Scenario::Random {
                    "RandomTestFile"
                } else {
                    "OnlyComponentLicenses"
                };
                (name.to_string(), counts, (components, global_licenses, components))
            }
            Scenario::GlobalOnly => {
                let counts = FixtureCounts {
                    components: rng.gen_range(1..=16),
                    global_licenses: rng.gen_range(1..=4),
                    ..FixtureCounts::default()
                };
                (
                    "OnlyGlobalLicense".to_string(),
                    counts,
                    (0, counts.global_licenses, 0),
                )
            }
            Scenario::Unlicensed => {
                let counts = FixtureCounts {
                    components: rng.gen_range(1..=16),
                    ..FixtureCounts::default()
                };
                ("NoLicenseFile".to_string(), counts, (counts.components, 0, 0))
            }
            Scenario::Mixed => {
                let components = rng.gen_range(0..=16);
                let global_licenses = if components != 0 {
                    rng.gen_range(0..=4)
                } else {
                    0
                };
                let component_licenses = rng.gen_range(0..=components);
                let valid = rng.gen_range(0..=component_licenses);
                let counts = FixtureCounts {
                    components,
                    global_licenses,
                    component_licenses,
                    valid,
                    invalid: component_licenses - valid,
                    type_appropriate: rng.gen_range(0..=valid),
                };
                let path_counts = (
                    rng.gen_range(0..=components),
                    rng.gen_range(0..=global_licenses),
                    rng.gen_range(0..=component_licenses),
                );
                (format!("RandomTestFile_{}", index + 1), counts, path_counts)
            }
        };

        let (component_paths, global_paths, license_paths) = path_counts;
        GenerationRequest {
            counts,
            pinned: PinnedInputs {
                component_paths: example_paths("component", component_paths),
                global_license_paths: example_paths("global_license", global_paths),
                license_paths: example_paths("license", license_paths),
                ..PinnedInputs::default()
            },
            release: ReleaseInfo {
                name,
                version,
                ..base.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentCatalog;
    use crate::generator::tests::lookup_tables;
    use crate::generator::Generator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCENARIOS: [Scenario; 5] = [
        Scenario::Random,
        Scenario::GlobalOnly,
        Scenario::Unlicensed,
        Scenario::ComponentOnly,
        Scenario::Mixed,
    ];

    #[test]
    fn test_example_paths() {
        assert_eq!(
            example_paths("license", 2),
            vec!["https://example.com/license_0", "https://example.com/license_1"]
        );
        assert!(example_paths("component", 0).is_empty());
    }

    #[test]
    fn test_class_presets_reach_their_class() {
        let tables = lookup_tables();
        let catalog = ComponentCatalog::builtin();
        let mut generator = Generator::new(&tables, &catalog, StdRng::seed_from_u64(4)).quiet(true);
        let base = ReleaseInfo::default();

        let fixture = generator.generate(Preset::Class3T.request(&base)).unwrap();
        assert_eq!(fixture.classification.class_3, 100);
        assert!(fixture.name.starts_with("Class3TTestFile_"), "{}", fixture.name);
        assert_eq!(fixture.descriptor.release.info.version, "5B");
        assert_eq!(fixture.descriptor.release.info.producer, "Test");

        let fixture = generator.generate(Preset::Class2R.request(&base)).unwrap();
        assert_eq!(fixture.classification.class_2, 100);
        assert_eq!(fixture.descriptor.release.components.len(), 11);

        let fixture = generator.generate(Preset::Full.request(&base)).unwrap();
        assert_eq!(fixture.classification.to_string(), "C1_100%-C2_100%-C3_100%");
        assert_eq!(fixture.descriptor.release.license.len(), 4);
        assert!(fixture
            .descriptor
            .release
            .components
            .iter()
            .all(|c| c.component_path.is_some() && c.license_path.is_some()));
    }

    #[test]
    fn test_minimal_preset() {
        let tables = lookup_tables();
        let catalog = ComponentCatalog::builtin();
        let mut generator = Generator::new(&tables, &catalog, StdRng::seed_from_u64(4)).quiet(true);
        let fixture = generator
            .generate(Preset::Minimal.request(&ReleaseInfo::default()))
            .unwrap();
        assert_eq!(fixture.descriptor.release.components.len(), 1);
        assert!(fixture.descriptor.release.license.is_empty());
        assert!(fixture.name.ends_with("_1C_0G_0L_0V_0I_0T"), "{}", fixture.name);
    }

    #[test]
    fn test_scenario_counts_are_consistent() {
        let mut rng = StdRng::seed_from_u64(99);
        let base = ReleaseInfo::default();
        for scenario in SCENARIOS {
            for i in 0..50 {
                let req = scenario.request(i, &mut rng, &base);
                let c = req.counts;
                assert!(c.components <= 16);
                assert!(c.global_licenses <= 4);
                assert!(c.component_licenses <= c.components);
                assert_eq!(c.valid + c.invalid, c.component_licenses);
                assert!(c.type_appropriate <= c.valid);
                assert!(req.pinned.component_paths.len() <= c.components);
                assert!(req.pinned.global_license_paths.len() <= c.global_licenses);
                assert_eq!(req.release.version, format!("{}B", i + 1));
            }
        }
    }

    #[test]
    fn test_scenarios_generate() {
        let tables = lookup_tables();
        let catalog = ComponentCatalog::builtin();
        let mut generator = Generator::new(&tables, &catalog, StdRng::seed_from_u64(8)).quiet(true);
        let base = ReleaseInfo::default();
        for scenario in SCENARIOS {
            for i in 0..20 {
                let req = scenario.request(i, generator.rng_mut(), &base);
                let requested = req.counts.components;
                let fixture = generator.generate(req).unwrap();
                assert_eq!(fixture.descriptor.release.components.len(), requested);
                let c = fixture.classification;
                assert!(c.class_1 <= 100 && c.class_2 <= 100 && c.class_3 <= 100);
            }
        }
    }

    #[test]
    fn test_global_only_has_no_component_licenses() {
        let mut rng = StdRng::seed_from_u64(5);
        let req = Scenario::GlobalOnly.request(0, &mut rng, &ReleaseInfo::default());
        assert_eq!(req.counts.component_licenses, 0);
        assert!(req.counts.global_licenses >= 1);
        assert_eq!(req.release.name, "OnlyGlobalLicense");
    }
}
