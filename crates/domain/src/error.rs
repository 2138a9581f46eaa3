//! Unified error types for the domain layer
//!
//! Every validation failure raised while building or editing a character maps
//! to one variant here, so callers can match on the kind of failure instead of
//! parsing message strings.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Generic validation failure (e.g., malformed settings)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Year is not an integer
    #[error("Invalid year: {0}. Year must be an integer")]
    InvalidYear(String),

    /// Age is not an integer
    #[error("Invalid age: {0}. Age must be an integer")]
    InvalidAge(String),

    /// Age outside the configured bounds
    #[error("Age {age} is out of range [{min}, {max}]")]
    AgeOutOfRange { age: i64, min: u32, max: u32 },

    /// Sex is not one of the accepted options
    #[error("Incorrect sex value: {value} -> {accepted:?}")]
    InvalidSex {
        value: String,
        accepted: Vec<&'static str>,
    },

    /// Country has no name data
    #[error("Country not available: {value} -> {available:?}")]
    InvalidCountry {
        value: String,
        available: Vec<String>,
    },

    /// Occupation is not in the catalog
    #[error("Unknown occupation: {0}")]
    UnknownOccupation(String),

    /// Occupation filters rule out every occupation
    #[error("None occupation meets following criteria: type: {occup_type:?}, era: {era:?}, tags: {tags:?}")]
    NoOccupationMeetsCriteria {
        occup_type: Option<String>,
        era: Vec<String>,
        tags: Vec<String>,
    },

    /// Characteristic value is not an integer
    #[error("Invalid {name} value: {value}. {name} must be an integer")]
    InvalidCharacteristicValue { name: String, value: String },

    /// Characteristic value below its minimum
    #[error("{name} points cannot be less than {min}, got {value}")]
    CharacteristicBelowMinimum { name: String, value: i64, min: i64 },

    /// Skill value is not an integer
    #[error("Invalid {skill} points. {skill} points must be an integer, got {value}")]
    InvalidSkillValue { skill: String, value: String },

    /// Skill value below zero
    #[error("{skill} points cannot be less than 0, got {value}")]
    SkillBelowZero { skill: String, value: i64 },

    /// Skills payload is not a key/value mapping
    #[error("Invalid skills. Skills must be a mapping of skill name to points, got {0}")]
    SkillsNotAMapping(String),

    /// Damage bonus outside the fixed set
    #[error("Invalid damage bonus. {value} not in {accepted:?}")]
    InvalidDamageBonus {
        value: String,
        accepted: Vec<&'static str>,
    },

    /// Build outside the fixed set
    #[error("Invalid build. {value} not in {accepted:?}")]
    InvalidBuild { value: i64, accepted: Vec<i8> },

    /// Name is empty
    #[error("{0} cannot be empty")]
    EmptyName(&'static str),

    /// Skill template token in reference data is malformed
    #[error("Invalid skill template token: {0}")]
    InvalidSkillTemplate(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when a rule is violated that has no dedicated variant:
    /// - Settings that contradict each other
    /// - Empty lookup tables
    ///
    /// # Example
    /// ```ignore
    /// if min_age > max_age {
    ///     return Err(DomainError::validation("min_age cannot exceed max_age"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an unknown occupation error
    pub fn unknown_occupation(name: impl Into<String>) -> Self {
        Self::UnknownOccupation(name.into())
    }

    /// Create a characteristic-below-minimum error
    pub fn below_minimum(name: impl Into<String>, value: i64, min: i64) -> Self {
        Self::CharacteristicBelowMinimum {
            name: name.into(),
            value,
            min,
        }
    }

    /// Create a skill template parse error
    pub fn skill_template(msg: impl Into<String>) -> Self {
        Self::InvalidSkillTemplate(msg.into())
    }
}
