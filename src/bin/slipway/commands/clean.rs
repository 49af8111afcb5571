//! `slipway clean` command

use anyhow::Result;

use crate::cli::{CleanArgs, Cli};
use slipway::util::fs::remove_dir_all_if_exists;
use slipway::BuildPaths;

pub fn execute(cli: &Cli, args: &CleanArgs) -> Result<()> {
    let paths = BuildPaths::new(&cli.workdir);

    remove_dir_all_if_exists(&paths.src_root)?;
    eprintln!("     Removed {}", paths.src_root.display());

    remove_dir_all_if_exists(&paths.build_root)?;
    eprintln!("     Removed {}", paths.build_root.display());

    if args.all {
        remove_dir_all_if_exists(&paths.download_dir)?;
        eprintln!("     Removed {}", paths.download_dir.display());
    }

    Ok(())
}
