//! `slipway build` command

use anyhow::{bail, Result};

use crate::cli::{BuildArgs, Cli};
use slipway::builder::project;
use slipway::{load_recipes, BuildPaths, Recipe, Toolchain};

pub fn execute(cli: &Cli, args: &BuildArgs) -> Result<()> {
    let recipes = load_recipes(&cli.recipes)?;
    let toolchain = Toolchain::from_path(&cli.toolchain)?;
    let paths = BuildPaths::new(&cli.workdir);

    let selected: Vec<&Recipe> = if args.names.is_empty() {
        recipes.iter().collect()
    } else {
        let mut selected = Vec::new();
        for name in &args.names {
            match recipes.iter().find(|r| &r.name == name) {
                Some(recipe) => selected.push(recipe),
                None => bail!("unknown recipe: {}", name),
            }
        }
        selected
    };

    // Sequential by design; parallelism lives inside each make invocation
    for recipe in selected {
        project::build(recipe, &toolchain, &paths)?;
    }

    Ok(())
}
