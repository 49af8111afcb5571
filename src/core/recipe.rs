//! Per-dependency build recipes.
//!
//! Each third-party dependency is described by a [`Recipe`]: where its
//! source archive lives, which build system drives it, and how its argument
//! lists deviate from the defaults. Special cases (curl's pthread handling
//! on Windows targets, libjpeg-turbo's fully-static linking) are expressed
//! as data-driven rules consumed by the generic drivers, not as new types.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::core::toolchain::{join_flags, Toolchain};
use crate::util::fs::read_to_string;

/// Which external tool family builds this dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
    /// Plain `make` in the unpacked source tree
    Make,
    /// `cmake` configure step, then make
    Cmake,
    /// `./configure`, then make
    Autotools,
}

impl BuildSystem {
    /// Display name for logs and `slipway list`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildSystem::Make => "make",
            BuildSystem::Cmake => "cmake",
            BuildSystem::Autotools => "autotools",
        }
    }
}

/// A conditional adjustment to the configure argument list.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ConfigureRule {
    /// Append `args` when any triple component contains `needle`.
    ///
    /// Models curl's `--enable-pthreads=no` for mingw targets, where the
    /// thread library is unavailable.
    WhenArchContains { needle: String, args: Vec<String> },
}

/// A conditional adjustment to the make argument list.
///
/// Both variants fire only when the combined linker flags (toolchain first,
/// recipe appended) request static linking; the generic `-static` flag is
/// not enough for some dependencies' build files to produce fully static
/// artifacts.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MakeRule {
    /// Append `<var>=-all-static` (curl's `curl_LDFLAGS`).
    AllStaticVar { var: String },
    /// Append `LDFLAGS=<combined flags with -static rewritten to
    /// -all-static>` (libjpeg-turbo).
    AllStaticLdflags,
}

fn default_install_target() -> String {
    "install".to_string()
}

/// Configuration record for one third-party dependency.
///
/// Created once per dependency definition (normally from `slipway.toml`)
/// and read-only thereafter.
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    /// Dependency name, e.g. `curl`
    pub name: String,

    /// Source archive URL. Fetching is not handled here; only the file
    /// name matters to locate the archive in the download directory.
    pub url: String,

    /// Mirror URL (data only)
    #[serde(default)]
    pub alternative_url: Option<String>,

    /// Archive digest (data only)
    #[serde(default)]
    pub md5: Option<String>,

    /// Installed-marker path, relative to the install prefix
    pub installed: PathBuf,

    /// Build system driving this dependency
    pub build_system: BuildSystem,

    /// Extra configure arguments, appended after the defaults
    #[serde(default)]
    pub configure_args: Vec<String>,

    /// Per-dependency preprocessor flags
    #[serde(default)]
    pub cppflags: Vec<String>,

    /// Per-dependency linker flags
    #[serde(default)]
    pub ldflags: Vec<String>,

    /// Per-dependency libraries
    #[serde(default)]
    pub libs: Vec<String>,

    /// Install prefix override; falls back to the toolchain's
    #[serde(default)]
    pub install_prefix: Option<PathBuf>,

    /// Install target name, e.g. `install-strip`
    #[serde(default = "default_install_target")]
    pub install_target: String,

    /// Conditional configure argument adjustments
    #[serde(default)]
    pub configure_rules: Vec<ConfigureRule>,

    /// Conditional make argument adjustments
    #[serde(default)]
    pub make_rules: Vec<MakeRule>,
}

impl Recipe {
    /// Resolve the install prefix: recipe override, else the toolchain's.
    pub fn resolved_install_prefix<'a>(&'a self, toolchain: &'a Toolchain) -> &'a Path {
        self.install_prefix
            .as_deref()
            .unwrap_or(&toolchain.install_prefix)
    }

    /// Combined linker flags: toolchain first, recipe appended.
    pub fn combined_ldflags(&self, toolchain: &Toolchain) -> String {
        join_flags(&[&toolchain.ldflags, &self.ldflags])
    }

    /// Extra configure arguments from rules matching the target triple.
    pub fn configure_extras(&self, arch: &str) -> Vec<String> {
        let mut extras = Vec::new();
        for rule in &self.configure_rules {
            match rule {
                ConfigureRule::WhenArchContains { needle, args } => {
                    if arch.split('-').any(|part| part.contains(needle.as_str())) {
                        extras.extend(args.iter().cloned());
                    }
                }
            }
        }
        extras
    }

    /// Extra make arguments from rules matching the combined linker flags.
    pub fn make_extras(&self, toolchain: &Toolchain) -> Vec<String> {
        let ldflags = self.combined_ldflags(toolchain);
        if !ldflags.contains("-static") {
            return Vec::new();
        }

        let mut extras = Vec::new();
        for rule in &self.make_rules {
            match rule {
                MakeRule::AllStaticVar { var } => {
                    extras.push(format!("{}=-all-static", var));
                }
                MakeRule::AllStaticLdflags => {
                    extras.push(format!("LDFLAGS={}", ldflags.replace("-static", "-all-static")));
                }
            }
        }
        extras
    }

    /// File name of the source archive, taken from the URL.
    pub fn archive_file_name(&self) -> Result<&str> {
        let name = self.url.rsplit('/').next().unwrap_or_default();
        if name.is_empty() {
            bail!("recipe `{}` has no archive file name in url", self.name);
        }
        Ok(name)
    }

    /// Archive name with the tarball extension stripped; the unpacked
    /// source tree and the build directory are both named after it.
    pub fn base_name(&self) -> Result<&str> {
        let name = self.archive_file_name()?;
        for suffix in [".tar.gz", ".tar.bz2", ".tar.xz", ".tgz"] {
            if let Some(base) = name.strip_suffix(suffix) {
                return Ok(base);
            }
        }
        bail!(
            "recipe `{}` has unrecognized archive extension: {}",
            self.name,
            name
        );
    }
}

#[derive(Debug, Deserialize)]
struct RecipeFile {
    #[serde(default, rename = "recipe")]
    recipes: Vec<Recipe>,
}

/// Load the recipes from a `slipway.toml`-style file (`[[recipe]]` tables).
pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>> {
    let contents = read_to_string(path)?;
    let file: RecipeFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse recipe file: {}", path.display()))?;
    Ok(file.recipes)
}
