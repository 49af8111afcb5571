//! Slipway - a cross-compilation build orchestrator for third-party
//! C/C++ dependencies.
//!
//! This crate builds third-party source packages for a cross-compilation
//! target by invoking external build tools (`make`, `cmake`, autotools
//! `configure`) with toolchain-specific arguments and environment.

pub mod builder;
pub mod core;
pub mod util;

pub use crate::builder::project::BuildPaths;
pub use crate::core::recipe::{load_recipes, BuildSystem, Recipe};
pub use crate::core::toolchain::Toolchain;
