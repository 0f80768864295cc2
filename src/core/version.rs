//! Build metadata generated by the build script

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Package version from Cargo.toml
pub fn version() -> &'static str {
    PACKAGE_VERSION
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// Multi-line version text for `--version`
pub fn long_version() -> String {
    format!(
        "{}\nbuilt: {}\ncommit: {}",
        PACKAGE_VERSION, BUILD_TIME, GIT_HASH
    )
}
