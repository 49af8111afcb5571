//! Drivers for the external build tools.
//!
//! Each driver assembles an argument list from the toolchain and the
//! recipe, then shells out and waits. There is no state between calls;
//! every build is a function of its inputs plus filesystem side effects.

pub mod autotools;
pub mod cmake;
pub mod make;
pub mod project;

pub use project::BuildPaths;
