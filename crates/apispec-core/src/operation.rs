//! Operation vocabulary shared by the host and the builder crate.
//!
//! [`IntoOperations`] is what [`ApiSpec::path`](crate::spec::ApiSpec::path)
//! accepts. A raw [`Operations`] map works out of the box; builder types
//! (e.g. `apispec-operation`'s `PathOperations`) implement it as well.

use std::{fmt, str::FromStr};

use crate::{document::Operations, error::ApiSpecError};

/// HTTP methods that may key an operation inside a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Lower-case key used in path items.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    /// `true` if `key` names an HTTP method in a path item.
    pub fn is_method_key(key: &str) -> bool {
        Self::ALL.iter().any(|method| method.as_str() == key)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ApiSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == lower)
            .ok_or_else(|| ApiSpecError::InvalidOperation {
                path: None,
                method: s.to_owned(),
                reason: "not an HTTP method".into(),
            })
    }
}

/// Converts a value into the operations of a single path.
pub trait IntoOperations {
    fn into_operations(self) -> Operations;
}

impl IntoOperations for Operations {
    fn into_operations(self) -> Operations {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_keys() {
        assert!(HttpMethod::is_method_key("patch"));
        assert!(!HttpMethod::is_method_key("parameters"));
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert!("fetch".parse::<HttpMethod>().is_err());
    }
}
