//! OpenAPI version handling.
//!
//! Only the major version changes how documents are shaped: 2.x keeps
//! component schemas under a top-level `definitions` object and describes
//! bodies with a bare `schema`, whereas 3.x nests everything under
//! `components` and `content`.

use std::{fmt, str::FromStr};

use crate::error::ApiSpecError;

/// Parsed `openapi` / `swagger` version string.
///
/// ```rust
/// use apispec_core::version::OpenApiVersion;
///
/// let version: OpenApiVersion = "3.0.2".parse().unwrap();
/// assert!(version.is_v3());
/// assert_eq!(version.to_string(), "3.0.2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpenApiVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl OpenApiVersion {
    pub const V2: OpenApiVersion = OpenApiVersion::new(2, 0, 0);
    pub const V3_0: OpenApiVersion = OpenApiVersion::new(3, 0, 3);
    pub const V3_1: OpenApiVersion = OpenApiVersion::new(3, 1, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn is_v2(&self) -> bool {
        self.major == 2
    }

    pub fn is_v3(&self) -> bool {
        self.major == 3
    }

    /// Template used to point at component schemas for this version.
    pub fn default_ref_template(&self) -> &'static str {
        if self.is_v2() {
            "#/definitions/{model}"
        } else {
            "#/components/schemas/{model}"
        }
    }
}

impl Default for OpenApiVersion {
    fn default() -> Self {
        Self::V3_0
    }
}

impl FromStr for OpenApiVersion {
    type Err = ApiSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiSpecError::InvalidOpenApiVersion(s.to_owned());

        let mut parts = s.trim().split('.');
        let mut next = |required: bool| -> Result<u64, ApiSpecError> {
            match parts.next() {
                Some(part) => part.parse().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };

        let major = next(true)?;
        let minor = next(true)?;
        let patch = next(false)?;

        if parts.next().is_some() || !matches!(major, 2 | 3) {
            return Err(invalid());
        }

        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for OpenApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
