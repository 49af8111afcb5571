//! Core data model: toolchains, target triples, and dependency recipes.

pub mod recipe;
pub mod toolchain;
pub mod triple;

pub use recipe::{load_recipes, BuildSystem, ConfigureRule, MakeRule, Recipe};
pub use toolchain::Toolchain;
