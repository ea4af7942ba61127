//! Localization (court / venue) model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A court, field or venue where a match can take place.
///
/// Identity is the name: two localizations with the same name are the
/// same court, even when they come from different events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Localization {
    /// Court name.
    pub name: String,
}

impl Localization {
    /// Creates a localization with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Creates `count` localizations named `"{prefix}{n}"` with `n` starting at 1.
    pub fn numbered(prefix: &str, count: usize) -> Vec<Self> {
        (1..=count).map(|n| Self::new(format!("{prefix}{n}"))).collect()
    }
}

impl fmt::Display for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
