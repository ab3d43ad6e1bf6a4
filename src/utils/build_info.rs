/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub revision: &'static str,
    pub tree: &'static str,
    pub built_at: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
}

impl BuildMetadata {
    /// Single-line description used by the `version` command.
    pub fn summary(&self) -> String {
        format!(
            "budget_tracker {} ({} {}, {} {}, built {})",
            self.version, self.revision, self.tree, self.target, self.profile, self.built_at
        )
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        revision: option_env!("BUDGET_TRACKER_BUILD_REVISION").unwrap_or("unknown"),
        tree: option_env!("BUDGET_TRACKER_BUILD_TREE").unwrap_or("unknown"),
        built_at: option_env!("BUDGET_TRACKER_BUILD_BUILT_AT").unwrap_or("unknown"),
        target: option_env!("BUDGET_TRACKER_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("BUDGET_TRACKER_BUILD_PROFILE").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mentions_package_version() {
        let info = current();
        assert!(info.summary().contains(env!("CARGO_PKG_VERSION")));
    }
}
