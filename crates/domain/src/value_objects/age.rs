//! Age bounds for generated and edited characters.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const DEFAULT_MIN_AGE: u32 = 15;
pub const DEFAULT_MAX_AGE: u32 = 90;

/// Inclusive `[min, max]` range a character's age must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBounds {
    min: u32,
    max: u32,
}

impl AgeBounds {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `min > max`.
    pub fn new(min: u32, max: u32) -> Result<Self, DomainError> {
        if min > max {
            return Err(DomainError::validation(format!(
                "min_age ({min}) cannot exceed max_age ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, age: u32) -> bool {
        (self.min..=self.max).contains(&age)
    }

    /// Check an age against the bounds and narrow it to `u32`.
    pub fn check(&self, age: i64) -> Result<u32, DomainError> {
        match u32::try_from(age) {
            Ok(value) if self.contains(value) => Ok(value),
            _ => Err(DomainError::AgeOutOfRange {
                age,
                min: self.min,
                max: self.max,
            }),
        }
    }
}

impl Default for AgeBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_AGE,
            max: DEFAULT_MAX_AGE,
        }
    }
}
