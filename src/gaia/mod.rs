//! Gaia build system integration.
//!
//! This module drives the Gaia `make` build that produces the generic
//! keyboard bundle every per-language bundle is cloned from.

pub mod builder;

pub use builder::{build_keyboard, BuildOutcome};
