use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned identifier. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(raw: u64) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError {
    raw: String,
}

impl IdParseError {
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid identifier", self.raw)
    }
}

impl std::error::Error for IdParseError {}

impl FromStr for EntityId {
    type Err = IdParseError;

    /// Strict: digits only, no sign, no whitespace, non-zero.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || IdParseError {
            raw: raw.to_string(),
        };

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        raw.parse::<u64>()
            .ok()
            .and_then(EntityId::new)
            .ok_or_else(invalid)
    }
}

/// An entity together with its store version.
///
/// The version starts at 1 and is bumped on every replace. It travels over
/// HTTP as an `ETag`, never inside the entity body.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<R> {
    pub version: u64,
    pub entity: R,
}

impl<R> Versioned<R> {
    pub fn new(entity: R) -> Self {
        Self { version: 1, entity }
    }
}
