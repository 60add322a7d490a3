//! Static process metadata attached to every record.

use crate::logging::attr::Attr;

/// Sentinel used when a value could not be determined.
pub const UNKNOWN: &str = "unknown";

/// Group key in rendered records.
pub const GROUP_KEY: &str = "program_info";

/// Build and runtime metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    /// Toolchain that compiled this crate, e.g. `1.85.0`.
    pub rust_version: String,
}

impl ProgramInfo {
    /// Metadata captured by the build script, `"unknown"` where missing.
    pub fn detect() -> Self {
        Self::from_build(option_env!("SLOGTOOL_RUSTC_VERSION"))
    }

    fn from_build(rust_version: Option<&str>) -> Self {
        let rust_version = rust_version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN);

        Self {
            rust_version: rust_version.to_string(),
        }
    }

    /// The `program_info` attribute group.
    pub fn to_attr(&self) -> Attr {
        Attr::group(
            GROUP_KEY,
            vec![Attr::string("rust_version", self.rust_version.clone())],
        )
    }
}

impl Default for ProgramInfo {
    fn default() -> Self {
        Self::detect()
    }
}
