//! Characteristics value objects.
//!
//! Provides type safety for characteristic references instead of passing
//! loose strings like "strength" or "dexterity" around.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// The rolled characteristics of a character, plus luck and move rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Characteristic {
    Strength,
    Condition,
    Size,
    Dexterity,
    Appearance,
    Education,
    Intelligence,
    Power,
    Luck,
    MoveRate,
}

impl Characteristic {
    pub const ALL: [Characteristic; 10] = [
        Self::Strength,
        Self::Condition,
        Self::Size,
        Self::Dexterity,
        Self::Appearance,
        Self::Education,
        Self::Intelligence,
        Self::Power,
        Self::Luck,
        Self::MoveRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Condition => "condition",
            Self::Size => "size",
            Self::Dexterity => "dexterity",
            Self::Appearance => "appearance",
            Self::Education => "education",
            Self::Intelligence => "intelligence",
            Self::Power => "power",
            Self::Luck => "luck",
            Self::MoveRate => "move_rate",
        }
    }

    /// Short sheet label (e.g., "STR", "DEX").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Condition => "CON",
            Self::Size => "SIZ",
            Self::Dexterity => "DEX",
            Self::Appearance => "APP",
            Self::Education => "EDU",
            Self::Intelligence => "INT",
            Self::Power => "POW",
            Self::Luck => "Luck",
            Self::MoveRate => "Move rate",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Characteristic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| DomainError::validation(format!("Unknown characteristic: {s}")))
    }
}

/// Checks that a raw value can be stored in a non-negative field.
pub fn non_negative(name: &str, value: i64) -> Result<u32, DomainError> {
    if value < 0 {
        return Err(DomainError::below_minimum(name, value, 0));
    }
    u32::try_from(value).map_err(|_| DomainError::InvalidCharacteristicValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

// ============================================================================
// AttributeSet
// ============================================================================

/// Eight characteristics plus luck and move rate.
///
/// Produced once by the attribute generator; after age modifiers are applied
/// every characteristic is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeSet {
    pub strength: u32,
    pub condition: u32,
    pub size: u32,
    pub dexterity: u32,
    pub appearance: u32,
    pub education: u32,
    pub intelligence: u32,
    pub power: u32,
    pub luck: u32,
    pub move_rate: u32,
}

impl AttributeSet {
    pub fn get(&self, characteristic: Characteristic) -> u32 {
        match characteristic {
            Characteristic::Strength => self.strength,
            Characteristic::Condition => self.condition,
            Characteristic::Size => self.size,
            Characteristic::Dexterity => self.dexterity,
            Characteristic::Appearance => self.appearance,
            Characteristic::Education => self.education,
            Characteristic::Intelligence => self.intelligence,
            Characteristic::Power => self.power,
            Characteristic::Luck => self.luck,
            Characteristic::MoveRate => self.move_rate,
        }
    }

    /// Set a characteristic from a raw value, rejecting negatives.
    pub fn set(&mut self, characteristic: Characteristic, value: i64) -> Result<(), DomainError> {
        let value = non_negative(characteristic.as_str(), value)?;
        let slot = match characteristic {
            Characteristic::Strength => &mut self.strength,
            Characteristic::Condition => &mut self.condition,
            Characteristic::Size => &mut self.size,
            Characteristic::Dexterity => &mut self.dexterity,
            Characteristic::Appearance => &mut self.appearance,
            Characteristic::Education => &mut self.education,
            Characteristic::Intelligence => &mut self.intelligence,
            Characteristic::Power => &mut self.power,
            Characteristic::Luck => &mut self.luck,
            Characteristic::MoveRate => &mut self.move_rate,
        };
        *slot = value;
        Ok(())
    }
}
