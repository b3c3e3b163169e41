// src/config/mod.rs

//! Startup configuration.
//!
//! - [`model`] defines the unvalidated `RawSettings` (straight from the CLI)
//!   and the validated `Settings` the rest of the program runs on.
//! - [`validate`] converts one into the other, compiling the exclusion
//!   pattern and rejecting unusable roots and commands.
//!
//! Every error produced here is fatal: it is reported before anything is
//! watched or run.

pub mod model;
pub mod validate;

pub use model::{RawSettings, Settings};
