/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// One-line summary, e.g. `0.1.0 (abc1234, release)`.
    pub fn summary(&self) -> String {
        format!("{} ({}, {})", self.version, self.git_hash, self.profile)
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("EXPENSE_REPORT_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("EXPENSE_REPORT_BUILD_TIMESTAMP").unwrap_or("unknown"),
        profile: option_env!("EXPENSE_REPORT_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("EXPENSE_REPORT_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
