//! Player model.
//!
//! A player is a named participant. It may stand for an individual or for an
//! opaque aggregate (a club, a pair registered under one name); the engine
//! only ever compares players by name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant that can be assigned to matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Player {
    /// Display name, also the identity of the player.
    pub name: String,
}

impl Player {
    /// Creates a player with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Creates `count` players named `"{prefix}{n}"` with `n` starting at 1.
    pub fn numbered(prefix: &str, count: usize) -> Vec<Self> {
        (1..=count).map(|n| Self::new(format!("{prefix}{n}"))).collect()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
