//! Names for the sandboxed file store.
//!
//! A [`StoreName`] is a single path component. Parsing rejects anything
//! that could resolve outside the store directory, so adapters can join
//! it onto their root without further checks.

use crate::core::error::DomainError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreName(String);

impl StoreName {
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let reject = |reason| {
            Err(DomainError::InvalidName {
                name: name.to_string(),
                reason,
            })
        };

        if name.is_empty() {
            return reject("name is empty");
        }
        if name == "." || name == ".." {
            return reject("directory references are not allowed");
        }
        if name.contains(['/', '\\']) {
            return reject("path separators are not allowed");
        }
        if name.contains('\0') {
            return reject("NUL bytes are not allowed");
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of reading a named record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLookup {
    Found(Vec<u8>),
    NotFound,
}

impl StoreLookup {
    pub fn into_found(self) -> Option<Vec<u8>> {
        match self {
            Self::Found(bytes) => Some(bytes),
            Self::NotFound => None,
        }
    }
}
