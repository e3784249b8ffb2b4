//! Builder API for stability-etch
//!
//! This module provides the entry point for running the stability overview
//! build from a binary or a build script.

mod stability_builder;

pub use stability_builder::{write_stability_json, BuildOutput, StabilityBuilder};
