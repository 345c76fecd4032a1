//! Namespaced identifiers (`namespace:path`)
//!
//! Identifiers name registry entries. They serialize as their string form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace used when a string has no `namespace:` prefix
pub const DEFAULT_NAMESPACE: &str = "gemforge";

/// Error when parsing or building an identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier namespace is empty: '{0}'")]
    EmptyNamespace(String),

    #[error("identifier path is empty: '{0}'")]
    EmptyPath(String),

    #[error("invalid character '{ch}' in identifier '{id}'")]
    InvalidCharacter { id: String, ch: char },
}

/// A registry key such as `gemforge:ignite`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    namespace: String,
    path: String,
}

fn valid_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn valid_path_char(c: char) -> bool {
    valid_namespace_char(c) || c == '/'
}

impl Identifier {
    /// Build an identifier from its two parts, validating both
    pub fn new(namespace: &str, path: &str) -> Result<Self, IdentifierError> {
        let full = format!("{}:{}", namespace, path);
        if namespace.is_empty() {
            return Err(IdentifierError::EmptyNamespace(full));
        }
        if path.is_empty() {
            return Err(IdentifierError::EmptyPath(full));
        }
        if let Some(ch) = namespace.chars().find(|c| !valid_namespace_char(*c)) {
            return Err(IdentifierError::InvalidCharacter { id: full, ch });
        }
        if let Some(ch) = path.chars().find(|c| !valid_path_char(*c)) {
            return Err(IdentifierError::InvalidCharacter { id: full, ch });
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// For string literals already known to be valid; not re-checked in release builds
    pub fn from_static(namespace: &'static str, path: &'static str) -> Self {
        debug_assert!(Self::new(namespace, path).is_ok());
        Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        }
    }

    /// Identifier in the default `gemforge` namespace
    pub fn gemforge(path: &str) -> Result<Self, IdentifierError> {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Translation key for this identifier, e.g. `power.gemforge.ignite`
    pub fn translation_key(&self, prefix: &str) -> String {
        format!("{}.{}.{}", prefix, self.namespace, self.path.replace('/', "."))
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}
