//! `slipway list` command

use anyhow::Result;

use crate::cli::{Cli, ListArgs};
use slipway::load_recipes;

pub fn execute(cli: &Cli, _args: &ListArgs) -> Result<()> {
    let recipes = load_recipes(&cli.recipes)?;

    for recipe in &recipes {
        println!(
            "{:<20} {:<10} {}",
            recipe.name,
            recipe.build_system.as_str(),
            recipe.url
        );
    }

    Ok(())
}
