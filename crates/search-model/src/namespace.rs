use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain reported for results from the globally public indexes.
pub const PUBLIC_INDEXES_DOMAIN: &str = "PUBLIC_INDEXES";

/// A backend index together with the domain that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub domain: String,
}

impl Namespace {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.domain, self.name)
    }
}

impl FromStr for Namespace {
    type Err = String;

    /// Parses `domain:name`. A bare name has an empty domain.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("empty namespace".to_string());
        }
        match trimmed.split_once(':') {
            Some((domain, name)) if !name.is_empty() => Ok(Namespace::new(name, domain)),
            Some(_) => Err(format!("namespace '{trimmed}' has no index name")),
            None => Ok(Namespace::new(trimmed, "")),
        }
    }
}
