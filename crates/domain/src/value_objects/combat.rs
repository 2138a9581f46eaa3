//! Combat value objects: damage bonus and build.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Accepted damage bonus strings, in ascending order.
pub const DAMAGE_BONUS_VALUES: [&str; 9] = [
    "-2", "-1", "0", "+1K4", "+1K6", "+2K6", "+3K6", "+4K6", "+5K6",
];

/// Accepted build values, in ascending order.
pub const BUILD_VALUES: [i8; 9] = [-2, -1, 0, 1, 2, 3, 4, 5, 6];

// ============================================================================
// DamageBonus
// ============================================================================

/// Extra damage dealt in melee, derived from STR + SIZ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DamageBonus {
    MinusTwo,
    MinusOne,
    Zero,
    OneK4,
    OneK6,
    TwoK6,
    ThreeK6,
    FourK6,
    FiveK6,
}

impl DamageBonus {
    pub const ALL: [DamageBonus; 9] = [
        Self::MinusTwo,
        Self::MinusOne,
        Self::Zero,
        Self::OneK4,
        Self::OneK6,
        Self::TwoK6,
        Self::ThreeK6,
        Self::FourK6,
        Self::FiveK6,
    ];

    pub fn as_str(&self) -> &'static str {
        DAMAGE_BONUS_VALUES[self.index()]
    }

    /// Position in the ascending damage bonus table.
    pub fn index(&self) -> usize {
        match self {
            Self::MinusTwo => 0,
            Self::MinusOne => 1,
            Self::Zero => 2,
            Self::OneK4 => 3,
            Self::OneK6 => 4,
            Self::TwoK6 => 5,
            Self::ThreeK6 => 6,
            Self::FourK6 => 7,
            Self::FiveK6 => 8,
        }
    }

    /// Entry at `index` in the ascending table, clamped to the last entry.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

impl fmt::Display for DamageBonus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DamageBonus {
    type Err = DomainError;

    /// Parsing is case-insensitive ("+1k4" is accepted as "+1K4").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        DAMAGE_BONUS_VALUES
            .iter()
            .position(|value| *value == normalized)
            .map(Self::from_index)
            .ok_or_else(|| DomainError::InvalidDamageBonus {
                value: normalized,
                accepted: DAMAGE_BONUS_VALUES.to_vec(),
            })
    }
}

impl TryFrom<String> for DamageBonus {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DamageBonus> for String {
    fn from(bonus: DamageBonus) -> Self {
        bonus.as_str().to_string()
    }
}

// ============================================================================
// Build
// ============================================================================

/// Body mass category, derived from STR + SIZ. Always within `-2..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Build(i8);

impl Build {
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBuild` if the value is not in `-2..=6`.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        BUILD_VALUES
            .iter()
            .find(|candidate| i64::from(**candidate) == value)
            .map(|candidate| Self(*candidate))
            .ok_or_else(|| DomainError::InvalidBuild {
                value,
                accepted: BUILD_VALUES.to_vec(),
            })
    }

    /// Entry at `index` in the ascending table, clamped to the last entry.
    pub fn from_index(index: usize) -> Self {
        Self(BUILD_VALUES[index.min(BUILD_VALUES.len() - 1)])
    }

    pub fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Build {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Build> for i64 {
    fn from(build: Build) -> Self {
        i64::from(build.0)
    }
}
