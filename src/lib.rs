//! Keyboard Repack Library
//!
//! This library turns the Gaia keyboard app into per-language 3rd party
//! keyboard bundles: layout discovery, the Gaia build, bundle duplication,
//! manifest rewriting, icon generation and mozSettings shim injection.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod gaia;
pub mod services;
pub mod webapp;
