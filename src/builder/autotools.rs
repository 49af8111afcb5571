//! Autotools driver.
//!
//! Runs the unpacked source's `configure` script out-of-tree with the
//! toolchain passed as command-line variable assignments, then delegates to
//! the make sequence.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::{make, project};
use crate::builder::project::BuildPaths;
use crate::core::recipe::Recipe;
use crate::core::toolchain::{join_flags, Toolchain};
use crate::util::process::ProcessBuilder;

/// Assemble the configure argument list.
///
/// Toolchain flags come first, recipe overrides appended; rule-derived
/// extras (e.g. curl's pthread disable on mingw) come last.
pub fn configure_args(recipe: &Recipe, toolchain: &Toolchain) -> Vec<String> {
    let mut args = vec![
        format!("CC={}", toolchain.cc.display()),
        format!("CXX={}", toolchain.cxx.display()),
        format!(
            "CPPFLAGS={}",
            join_flags(&[&toolchain.cppflags, &recipe.cppflags])
        ),
        format!("CFLAGS={}", join_flags(&[&toolchain.cflags])),
        format!("CXXFLAGS={}", join_flags(&[&toolchain.cxxflags])),
        format!(
            "LDFLAGS={}",
            join_flags(&[&toolchain.ldflags, &recipe.ldflags])
        ),
        format!("LIBS={}", join_flags(&[&toolchain.libs, &recipe.libs])),
        format!("AR={}", toolchain.ar.display()),
        format!("RANLIB={}", toolchain.ranlib.display()),
        format!("--host={}", toolchain.arch),
        format!(
            "--prefix={}",
            recipe.resolved_install_prefix(toolchain).display()
        ),
        "--enable-silent-rules".to_string(),
    ];
    args.extend(recipe.configure_args.iter().cloned());
    args.extend(recipe.configure_extras(&toolchain.arch));
    args
}

/// Unpack the source and run its configure script in a fresh build
/// directory. Returns the build directory.
pub fn configure(recipe: &Recipe, toolchain: &Toolchain, paths: &BuildPaths) -> Result<PathBuf> {
    let src = project::unpack(recipe, paths)?;
    let build = project::make_build_path(recipe, paths)?;

    tracing::info!("configuring {}", recipe.name);
    let cmd = ProcessBuilder::new(src.join("configure"))
        .args(configure_args(recipe, toolchain))
        .cwd(&build)
        .envs(&toolchain.env);
    tracing::debug!("configure: {}", cmd.display_command());
    cmd.run()?;

    Ok(build)
}

/// Configure, then run the make/install sequence in the build directory.
pub fn build(recipe: &Recipe, toolchain: &Toolchain, paths: &BuildPaths) -> Result<()> {
    let build = configure(recipe, toolchain, paths)?;
    make::build(recipe, toolchain, &build, true)
}
