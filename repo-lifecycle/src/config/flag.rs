//! Tri-state configuration flags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text rendered for [`Flag::Unset`] in logs and human output.
pub const UNSET_MARKER: &str = "undefined";

/// A flag that is true, false, or not yet determined.
///
/// `Unset` is distinct from `False` and survives classification unchanged.
/// Deserializes from an optional boolean; an absent key is `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Flag {
    True,
    False,
    #[default]
    Unset,
}

impl Flag {
    /// Returns true only for an explicit `True`.
    #[must_use]
    pub fn is_true(self) -> bool {
        self == Self::True
    }

    /// Returns true only for an explicit `False`.
    #[must_use]
    pub fn is_false(self) -> bool {
        self == Self::False
    }

    #[must_use]
    pub fn is_unset(self) -> bool {
        self == Self::Unset
    }

    /// Returns the flag as an optional boolean.
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unset => None,
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl From<Option<bool>> for Flag {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unset, Self::from)
    }
}

impl From<Flag> for Option<bool> {
    fn from(flag: Flag) -> Self {
        flag.as_bool()
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("true"),
            Self::False => f.write_str("false"),
            Self::Unset => f.write_str(UNSET_MARKER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_unset_marker() {
        assert_eq!(Flag::True.to_string(), "true");
        assert_eq!(Flag::False.to_string(), "false");
        assert_eq!(Flag::Unset.to_string(), "undefined");
    }

    #[test]
    fn unset_is_not_false() {
        assert!(!Flag::Unset.is_false());
        assert!(!Flag::Unset.is_true());
        assert_ne!(Flag::Unset, Flag::False);
        assert_eq!(Flag::from(None), Flag::Unset);
        assert_eq!(Flag::from(Some(false)), Flag::False);
    }

    #[test]
    fn serializes_as_optional_bool() {
        assert_eq!(serde_json::to_string(&Flag::Unset).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Flag::False).unwrap(), "false");
        let flag: Flag = serde_json::from_str("true").unwrap();
        assert_eq!(flag, Flag::True);
    }
}
