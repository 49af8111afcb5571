//! CMake driver.
//!
//! Cross-compiling with CMake means telling it not to probe the host: the
//! system name, processor, and compiler paths are injected through a
//! toolchain description file, which is the standard mechanism for cross
//! builds with this tool family.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::{make, project};
use crate::builder::project::BuildPaths;
use crate::core::recipe::Recipe;
use crate::core::toolchain::{join_flags, Toolchain};
use crate::core::triple;
use crate::util::process::{find_cmake, ProcessBuilder};

/// Render the toolchain description file contents.
///
/// One directive per line. Unrecognized triples get no system name line;
/// CMake then falls back to host-style configuration.
pub fn toolchain_file_contents(toolchain: &Toolchain) -> String {
    let mut out = String::new();

    if let Some(system_name) = triple::system_name(&toolchain.arch) {
        out.push_str(&format!("SET(CMAKE_SYSTEM_NAME {})\n", system_name));
    }

    out.push_str(&format!(
        "set(CMAKE_SYSTEM_PROCESSOR {})\n",
        triple::processor(&toolchain.arch)
    ));
    out.push_str(&format!("set(CMAKE_C_COMPILER {})\n", toolchain.cc.display()));
    out.push_str(&format!(
        "set(CMAKE_CXX_COMPILER {})\n",
        toolchain.cxx.display()
    ));
    out.push_str(&format!("set(DCMAKE_AR {})\n", toolchain.ar.display()));
    out.push_str(&format!("set(DCMAKE_RANLIB {})\n", toolchain.ranlib.display()));

    out
}

/// Assemble the cmake configure argument list.
///
/// Flag composition is an ordered join: toolchain defaults first, recipe
/// overrides appended.
pub fn configure_args(
    recipe: &Recipe,
    toolchain: &Toolchain,
    src: &Path,
    toolchain_file: &Path,
) -> Vec<String> {
    let c_flags = join_flags(&[&toolchain.cppflags, &recipe.cppflags, &toolchain.cflags]);
    let cxx_flags = join_flags(&[&toolchain.cppflags, &recipe.cppflags, &toolchain.cxxflags]);
    let linker_flags = join_flags(&[
        &toolchain.ldflags,
        &recipe.ldflags,
        &toolchain.libs,
        &recipe.libs,
    ]);

    let mut args = vec![
        src.display().to_string(),
        format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain_file.display()),
        format!("-DCMAKE_C_FLAGS={}", c_flags),
        format!("-DCMAKE_CXX_FLAGS={}", cxx_flags),
        format!("-DCMAKE_EXE_LINKER_FLAGS={}", linker_flags),
        format!(
            "-DCMAKE_INSTALL_PREFIX={}",
            recipe.resolved_install_prefix(toolchain).display()
        ),
    ];
    args.extend(recipe.configure_args.iter().cloned());
    args.extend(recipe.configure_extras(&toolchain.arch));
    args
}

/// Unpack the source, write the toolchain file, and run the cmake
/// generator in a fresh build directory. Returns the build directory.
pub fn configure(recipe: &Recipe, toolchain: &Toolchain, paths: &BuildPaths) -> Result<PathBuf> {
    let src = project::unpack(recipe, paths)?;
    let build = project::make_build_path(recipe, paths)?;

    // Scoped temporary file: flushed before cmake starts, removed when the
    // guard drops after cmake has exited. Removal failure is ignored by
    // the tempfile guard.
    let mut toolchain_file = tempfile::Builder::new()
        .prefix("slipway-toolchain-")
        .suffix(".cmake")
        .tempfile()
        .context("failed to create toolchain description file")?;
    toolchain_file
        .write_all(toolchain_file_contents(toolchain).as_bytes())
        .context("failed to write toolchain description file")?;
    toolchain_file
        .flush()
        .context("failed to flush toolchain description file")?;

    let cmake = find_cmake().context("cmake not found in PATH")?;

    tracing::info!("configuring {}", recipe.name);
    let cmd = ProcessBuilder::new(cmake)
        .args(configure_args(recipe, toolchain, &src, toolchain_file.path()))
        .cwd(&build)
        .envs(&toolchain.env);
    tracing::debug!("cmake: {}", cmd.display_command());
    cmd.run()?;

    Ok(build)
}

/// Configure, then run the make/install sequence in the build directory.
pub fn build(recipe: &Recipe, toolchain: &Toolchain, paths: &BuildPaths) -> Result<()> {
    let build = configure(recipe, toolchain, paths)?;
    make::build(recipe, toolchain, &build, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolchain(arch: &str) -> Toolchain {
        toml::from_str(&format!(
            r#"
            arch = "{}"
            cc = "/tc/bin/cc"
            cxx = "/tc/bin/c++"
            ar = "/tc/bin/ar"
            ranlib = "/tc/bin/ranlib"
            cppflags = ["-isystem", "/opt/x/include"]
            cflags = ["-Os"]
            cxxflags = ["-fno-exceptions"]
            ldflags = ["-L/opt/x/lib"]
            libs = ["-lm"]
            install_prefix = "/opt/x"
            "#,
            arch
        ))
        .unwrap()
    }

    fn recipe(extra: &str) -> Recipe {
        toml::from_str(&format!(
            r#"
            name = "freetype"
            url = "https://example.org/freetype-2.9.tar.gz"
            installed = "lib/libfreetype.a"
            build_system = "cmake"
            {}
            "#,
            extra
        ))
        .unwrap()
    }

    #[test]
    fn test_toolchain_file_linux() {
        let contents = toolchain_file_contents(&toolchain("arm-linux-gnueabihf"));

        assert!(contents.contains("SET(CMAKE_SYSTEM_NAME Linux)\n"));
        assert!(contents.contains("set(CMAKE_SYSTEM_PROCESSOR arm)\n"));
        assert!(contents.contains("set(CMAKE_C_COMPILER /tc/bin/cc)\n"));
        assert!(contents.contains("set(CMAKE_CXX_COMPILER /tc/bin/c++)\n"));
        assert!(contents.contains("set(DCMAKE_AR /tc/bin/ar)\n"));
        assert!(contents.contains("set(DCMAKE_RANLIB /tc/bin/ranlib)\n"));
    }

    #[test]
    fn test_toolchain_file_mingw_is_windows() {
        let contents = toolchain_file_contents(&toolchain("i686-w64-mingw32"));

        assert!(contents.contains("SET(CMAKE_SYSTEM_NAME Windows)\n"));
        assert!(!contents.contains("Linux"));
        assert!(!contents.contains("Darwin"));
    }

    #[test]
    fn test_toolchain_file_unknown_omits_system_name() {
        let contents = toolchain_file_contents(&toolchain("avr-unknown-none"));

        assert!(!contents.contains("CMAKE_SYSTEM_NAME"));
        assert!(contents.contains("set(CMAKE_SYSTEM_PROCESSOR avr)\n"));
    }

    #[test]
    fn test_configure_args_flag_composition() {
        let recipe = recipe(
            r#"
            cppflags = ["-DFT_OPT"]
            ldflags = ["-Wl,--gc-sections"]
            libs = ["-lz"]
            configure_args = ["-DWITH_ZLIB=ON"]
            "#,
        );
        let tc = toolchain("arm-linux-gnueabihf");

        let args = configure_args(
            &recipe,
            &tc,
            Path::new("/work/src/freetype-2.9"),
            Path::new("/tmp/slipway-toolchain-abc.cmake"),
        );

        assert_eq!(args[0], "/work/src/freetype-2.9");
        assert_eq!(
            args[1],
            "-DCMAKE_TOOLCHAIN_FILE=/tmp/slipway-toolchain-abc.cmake"
        );
        assert_eq!(
            args[2],
            "-DCMAKE_C_FLAGS=-isystem /opt/x/include -DFT_OPT -Os"
        );
        assert_eq!(
            args[3],
            "-DCMAKE_CXX_FLAGS=-isystem /opt/x/include -DFT_OPT -fno-exceptions"
        );
        assert_eq!(
            args[4],
            "-DCMAKE_EXE_LINKER_FLAGS=-L/opt/x/lib -Wl,--gc-sections -lm -lz"
        );
        assert_eq!(args[5], "-DCMAKE_INSTALL_PREFIX=/opt/x");
        assert_eq!(args[6], "-DWITH_ZLIB=ON");
    }

    #[test]
    fn test_configure_args_install_prefix_from_toolchain() {
        let recipe = recipe("");
        let tc = toolchain("arm-linux-gnueabihf");

        let args = configure_args(&recipe, &tc, Path::new("/src"), Path::new("/tf.cmake"));
        assert!(args.contains(&"-DCMAKE_INSTALL_PREFIX=/opt/x".to_string()));
    }

    #[test]
    fn test_configure_args_install_prefix_override() {
        let recipe = recipe("install_prefix = \"/opt/custom\"");
        let tc = toolchain("arm-linux-gnueabihf");

        let args = configure_args(&recipe, &tc, Path::new("/src"), Path::new("/tf.cmake"));
        assert!(args.contains(&"-DCMAKE_INSTALL_PREFIX=/opt/custom".to_string()));
    }
}
