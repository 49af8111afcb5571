//! Toolchain configuration for one cross-compilation target.
//!
//! The toolchain is a fixed record supplied by the caller (the CLI loads it
//! from `toolchain.toml`). It describes the compilers, flags, and process
//! environment for one target and is never mutated by the build drivers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::util::fs::read_to_string;

/// Compiler/linker paths, flags, and environment for one target.
#[derive(Debug, Clone, Deserialize)]
pub struct Toolchain {
    /// Target triple, e.g. `arm-linux-gnueabihf`
    pub arch: String,

    /// C compiler path
    pub cc: PathBuf,

    /// C++ compiler path
    pub cxx: PathBuf,

    /// Archiver path
    pub ar: PathBuf,

    /// Ranlib path
    pub ranlib: PathBuf,

    /// Preprocessor flags (C and C++)
    #[serde(default)]
    pub cppflags: Vec<String>,

    /// C-specific compiler flags
    #[serde(default)]
    pub cflags: Vec<String>,

    /// C++-specific compiler flags
    #[serde(default)]
    pub cxxflags: Vec<String>,

    /// Linker flags
    #[serde(default)]
    pub ldflags: Vec<String>,

    /// Extra libraries appended at link time
    #[serde(default)]
    pub libs: Vec<String>,

    /// Default install prefix for built dependencies
    pub install_prefix: PathBuf,

    /// Extra environment variables for every spawned build tool
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Toolchain {
    /// Load a toolchain description from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse toolchain file: {}", path.display()))
    }
}

/// Join flag groups into a single space-separated string.
///
/// Precedence is positional: toolchain defaults come first, per-dependency
/// overrides are appended, so later groups win where the tool scans
/// left-to-right.
pub fn join_flags(groups: &[&[String]]) -> String {
    groups
        .iter()
        .flat_map(|group| group.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
