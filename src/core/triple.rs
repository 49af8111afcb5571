//! Target triple inspection.
//!
//! CMake must be told not to probe the host when cross-compiling, so the
//! system name and processor are derived from the target triple and written
//! into the toolchain description file.

/// Derive the CMake system name from a target triple.
///
/// Unrecognized triples yield `None`; the caller omits the system name
/// directive rather than erroring.
pub fn system_name(triple: &str) -> Option<&'static str> {
    if triple.contains("linux") {
        Some("Linux")
    } else if triple.contains("darwin") {
        Some("Darwin")
    } else if is_windows(triple) {
        Some("Windows")
    } else {
        None
    }
}

/// The system processor: the first dash-separated component of the triple.
pub fn processor(triple: &str) -> &str {
    triple.split('-').next().unwrap_or(triple)
}

/// Whether the triple targets Windows (any component contains "mingw").
pub fn is_windows(triple: &str) -> bool {
    triple.split('-').any(|part| part.contains("mingw"))
}
