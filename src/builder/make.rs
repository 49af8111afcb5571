//! Make driver.
//!
//! Every build system here funnels into the same two-step make sequence:
//! a parallel build, then an install pass with the recipe's install target.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::recipe::Recipe;
use crate::core::toolchain::Toolchain;
use crate::util::process::{find_make, ProcessBuilder};

/// Degree of parallelism passed to `make -j`.
pub const SIMULTANEOUS_JOBS: usize = 12;

/// Arguments for the build invocation: quiet mode, parallelism, then any
/// rule-derived extras (e.g. all-static overrides).
pub fn make_args(recipe: &Recipe, toolchain: &Toolchain) -> Vec<String> {
    let mut args = vec!["--quiet".to_string(), format!("-j{}", SIMULTANEOUS_JOBS)];
    args.extend(recipe.make_extras(toolchain));
    args
}

/// Arguments for the install invocation: quiet mode plus the install target.
pub fn make_install_args(recipe: &Recipe) -> Vec<String> {
    vec!["--quiet".to_string(), recipe.install_target.clone()]
}

/// Run make in `wd` with the toolchain environment; when `install`, run a
/// second make with the install arguments. Non-zero exit from either
/// invocation is fatal and propagates.
pub fn build(recipe: &Recipe, toolchain: &Toolchain, wd: &Path, install: bool) -> Result<()> {
    let make = find_make().context("make not found in PATH")?;

    tracing::info!("building {}", recipe.name);
    let cmd = ProcessBuilder::new(&make)
        .args(make_args(recipe, toolchain))
        .cwd(wd)
        .envs(&toolchain.env);
    tracing::debug!("make: {}", cmd.display_command());
    cmd.run()?;

    if install {
        tracing::info!("installing {}", recipe.name);
        let cmd = ProcessBuilder::new(&make)
            .args(make_install_args(recipe))
            .cwd(wd)
            .envs(&toolchain.env);
        tracing::debug!("make install: {}", cmd.display_command());
        cmd.run()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolchain(ldflags: &[&str]) -> Toolchain {
        toml::from_str(&format!(
            r#"
            arch = "arm-linux-gnueabihf"
            cc = "cc"
            cxx = "c++"
            ar = "ar"
            ranlib = "ranlib"
            ldflags = [{}]
            install_prefix = "/opt/x"
            "#,
            ldflags
                .iter()
                .map(|f| format!("\"{}\"", f))
                .collect::<Vec<_>>()
                .join(", ")
        ))
        .unwrap()
    }

    fn recipe(extra: &str) -> Recipe {
        toml::from_str(&format!(
            r#"
            name = "zlib"
            url = "https://example.org/zlib-1.2.11.tar.gz"
            installed = "lib/libz.a"
            build_system = "make"
            {}
            "#,
            extra
        ))
        .unwrap()
    }

    #[test]
    fn test_make_args_quiet_and_parallel() {
        let args = make_args(&recipe(""), &toolchain(&[]));
        assert_eq!(args, vec!["--quiet", "-j12"]);
    }

    #[test]
    fn test_make_args_with_static_rule() {
        let recipe = recipe(
            r#"
            [[make_rules]]
            kind = "all-static-var"
            var = "curl_LDFLAGS"
            "#,
        );

        let args = make_args(&recipe, &toolchain(&["-static"]));
        assert_eq!(args, vec!["--quiet", "-j12", "curl_LDFLAGS=-all-static"]);

        let args = make_args(&recipe, &toolchain(&[]));
        assert_eq!(args, vec!["--quiet", "-j12"]);
    }

    #[test]
    fn test_make_install_args() {
        assert_eq!(make_install_args(&recipe("")), vec!["--quiet", "install"]);
        assert_eq!(
            make_install_args(&recipe("install_target = \"install-strip\"")),
            vec!["--quiet", "install-strip"]
        );
    }
}
