//! Interface identifiers
//!
//! Provides [`Iid`], the stable 128-bit id every versioned interface carries.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Interface identifier (GUID)
///
/// Displays in the braced registry form used by COM headers,
/// `{189819f1-1db6-4b57-be54-1821339b85f7}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iid(Uuid);

impl Iid {
    /// The all-zero id (`GUID_NULL`)
    pub const NULL: Self = Self(Uuid::nil());

    /// Wrap an existing UUID
    #[inline]
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Build from the raw 128-bit value
    #[inline]
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Random id, for tests and synthetic graphs
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Check for `GUID_NULL`
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_nil()
    }
}

impl Display for Iid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.hyphenated())
    }
}

impl FromStr for Iid {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(trimmed);

        Uuid::parse_str(inner)
            .map(Self)
            .map_err(|source| ModelError::InvalidIid {
                text: s.to_string(),
                source,
            })
    }
}

impl TryFrom<String> for Iid {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Iid> for String {
    fn from(value: Iid) -> Self {
        value.to_string()
    }
}

impl From<Uuid> for Iid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}
