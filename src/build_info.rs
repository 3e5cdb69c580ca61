//! Version information embedded at compile time by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `delve 0.1.0 (abc1234, built 2026-01-31)`, plus the profile for
/// non-release builds.
pub fn version_line() -> String {
    let mut line = format!("delve {} ({}, built {})", VERSION, BUILD_COMMIT, BUILD_DATE);
    if BUILD_PROFILE != "release" {
        line.push_str(&format!(" [{}]", BUILD_PROFILE));
    }
    line
}
