//! Build metadata generated by the build script

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// Version line used in startup logging: `0.1.0 (abc1234, built ...)`
pub fn version_line() -> String {
    format!(
        "{} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        git_hash(),
        build_time()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_contains_package_version_and_hash() {
        let line = version_line();
        assert!(line.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(line.contains(git_hash()));
        assert!(!build_time().is_empty());
    }
}
