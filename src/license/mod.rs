//! License data handling.
//!
//! - [`spdx`]: the validity predicate (OSI-approved, FSF-libre, or open-data allowlist).
//! - [`tables`]: reads upstream license-database JSON dumps and reads/writes the
//!   five YAML lookup tables the generator consumes.

pub mod spdx;
pub mod tables;
