//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Slipway - a cross-compilation build orchestrator for third-party C/C++ dependencies
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Recipe file describing the dependencies
    #[arg(long, global = true, env = "SLIPWAY_RECIPES", default_value = "slipway.toml")]
    pub recipes: PathBuf,

    /// Toolchain description file for the target
    #[arg(
        long,
        global = true,
        env = "SLIPWAY_TOOLCHAIN",
        default_value = "toolchain.toml"
    )]
    pub toolchain: PathBuf,

    /// Working directory for downloads, sources, and build trees
    #[arg(long, global = true, env = "SLIPWAY_WORKDIR", default_value = ".slipway")]
    pub workdir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build dependencies for the target toolchain
    Build(BuildArgs),

    /// List the known dependency recipes
    List(ListArgs),

    /// Remove unpacked sources and build trees
    Clean(CleanArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Names of the recipes to build (all when omitted)
    pub names: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct CleanArgs {
    /// Also remove downloaded archives
    #[arg(long)]
    pub all: bool,
}
