//! Report renderers for generated fixtures.
//!
//! - [`terminal`]: colored table of written fixtures; respects `--quiet`.
//! - JSON output is handled directly in `main` via `serde_json`.

pub mod terminal;
