//! Build identifier reporting.
//!
//! The version is an injected value rather than something looked up at
//! call time: embedders pass the string they want reported, and the
//! crate's own package version is only the default.

use std::env::consts::{ARCH, OS};
use std::fmt;

/// Product token used in the user-agent string.
pub const PRODUCT: &str = "bearer-inspect";

/// Reported when no real release version is available.
pub const DEV_VERSION: &str = "dev";

/// A build identifier that is either a release version or `dev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(String);

impl Version {
    /// Keep `candidate` if it names a real release, otherwise report `dev`.
    pub fn new(candidate: impl Into<String>) -> Self {
        let candidate = candidate.into();
        if is_real_version(&candidate) {
            Self(candidate)
        } else {
            Self(DEV_VERSION.to_string())
        }
    }

    /// The version string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `version` is a release version rather than a development or
/// placeholder build.
pub fn is_real_version(version: &str) -> bool {
    let bare = version.strip_prefix('v').unwrap_or(version);
    !(version.is_empty() || version == "(devel)" || bare.starts_with("0.0.0-"))
}

/// User-agent string sent by the connection layer.
pub fn user_agent(version: &Version) -> String {
    format!("{PRODUCT}/{version} ({OS}/{ARCH})")
}
