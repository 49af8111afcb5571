//! Source unpacking, build directory layout, and build dispatch.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;

use crate::builder::{autotools, cmake, make};
use crate::core::recipe::{BuildSystem, Recipe};
use crate::core::toolchain::Toolchain;
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};

/// Directory layout for one orchestration run.
///
/// The caller owns the layout; dependency builds never share directories
/// because source trees and build directories are named after the archive.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    /// Where source archives are expected to already exist
    pub download_dir: PathBuf,

    /// Where archives are unpacked
    pub src_root: PathBuf,

    /// Where out-of-tree build directories are created
    pub build_root: PathBuf,
}

impl BuildPaths {
    /// Derive the standard layout under a working directory.
    pub fn new(workdir: &Path) -> Self {
        BuildPaths {
            download_dir: workdir.join("download"),
            src_root: workdir.join("src"),
            build_root: workdir.join("build"),
        }
    }
}

/// Unpack the recipe's source archive, returning the source directory.
///
/// Fetching is out of scope: the archive must already be present in the
/// download directory. Idempotent; a previous tree is removed first.
pub fn unpack(recipe: &Recipe, paths: &BuildPaths) -> Result<PathBuf> {
    let archive = paths.download_dir.join(recipe.archive_file_name()?);
    if !archive.exists() {
        bail!(
            "source archive not found: {} (place it in {} first)",
            archive.display(),
            paths.download_dir.display()
        );
    }

    let dest = paths.src_root.join(recipe.base_name()?);
    remove_dir_all_if_exists(&dest)?;
    ensure_dir(&paths.src_root)?;

    tracing::info!("unpacking {}", archive.display());

    let name = recipe.archive_file_name()?;
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        let file = File::open(&archive)
            .with_context(|| format!("failed to open archive: {}", archive.display()))?;
        tar::Archive::new(GzDecoder::new(file))
            .unpack(&paths.src_root)
            .with_context(|| format!("failed to unpack archive: {}", archive.display()))?;
    } else {
        bail!("unsupported archive format: {}", name);
    }

    if !dest.is_dir() {
        bail!(
            "archive {} did not contain expected directory {}",
            archive.display(),
            dest.display()
        );
    }

    Ok(dest)
}

/// Create a fresh out-of-tree build directory for the recipe.
pub fn make_build_path(recipe: &Recipe, paths: &BuildPaths) -> Result<PathBuf> {
    let dir = paths.build_root.join(recipe.base_name()?);
    remove_dir_all_if_exists(&dir)?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Whether the recipe's installed marker exists under its install prefix.
pub fn is_installed(recipe: &Recipe, toolchain: &Toolchain) -> bool {
    recipe
        .resolved_install_prefix(toolchain)
        .join(&recipe.installed)
        .exists()
}

/// Build one dependency: skip when already installed, otherwise dispatch
/// on the recipe's build system. Purely sequential and blocking; failures
/// from the external tools propagate with no retry.
pub fn build(recipe: &Recipe, toolchain: &Toolchain, paths: &BuildPaths) -> Result<()> {
    if is_installed(recipe, toolchain) {
        tracing::info!("{} already installed, skipping", recipe.name);
        return Ok(());
    }

    match recipe.build_system {
        BuildSystem::Make => {
            // No configure step; make runs in the unpacked source tree
            let src = unpack(recipe, paths)?;
            make::build(recipe, toolchain, &src, true)
        }
        BuildSystem::Cmake => cmake::build(recipe, toolchain, paths),
        BuildSystem::Autotools => autotools::build(recipe, toolchain, paths),
    }
}
