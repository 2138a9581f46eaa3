//! Skill table value object.
//!
//! A mapping of skill name to points. Every write is validated so a table can
//! never hold a negative or non-integer value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::DomainError;

/// Skill name that is always present in generated tables.
pub const CREDIT_RATING: &str = "credit rating";
/// Skill whose default follows dexterity.
pub const DODGE: &str = "dodge";
/// Skill whose default follows education.
pub const OWN_LANGUAGE: &str = "language (own)";

/// Skill name to non-negative points.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i64>", into = "BTreeMap<String, u32>")]
pub struct SkillTable(BTreeMap<String, u32>);

impl SkillTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a loosely typed JSON payload.
    ///
    /// # Errors
    ///
    /// - `SkillsNotAMapping` if `value` is not an object
    /// - `InvalidSkillValue` if an entry is not an integer
    /// - `SkillBelowZero` if an entry is negative
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        let Value::Object(entries) = value else {
            return Err(DomainError::SkillsNotAMapping(value.to_string()));
        };

        let mut table = Self::new();
        for (skill, points) in entries {
            let points = points
                .as_i64()
                .ok_or_else(|| DomainError::InvalidSkillValue {
                    skill: skill.clone(),
                    value: points.to_string(),
                })?;
            table.insert(skill.clone(), points)?;
        }
        Ok(table)
    }

    /// Insert a raw value, rejecting negatives.
    pub fn insert(&mut self, skill: impl Into<String>, points: i64) -> Result<(), DomainError> {
        let skill = skill.into();
        if points < 0 {
            return Err(DomainError::SkillBelowZero {
                skill,
                value: points,
            });
        }
        let points = u32::try_from(points).map_err(|_| DomainError::InvalidSkillValue {
            skill: skill.clone(),
            value: points.to_string(),
        })?;
        self.0.insert(skill, points);
        Ok(())
    }

    /// Insert an already validated value.
    pub fn set(&mut self, skill: impl Into<String>, points: u32) {
        self.0.insert(skill.into(), points);
    }

    /// Insert `points` only when the skill is absent.
    pub fn set_default(&mut self, skill: impl Into<String>, points: u32) {
        self.0.entry(skill.into()).or_insert(points);
    }

    /// Add points to an existing skill. Absent skills start from zero.
    pub fn add(&mut self, skill: &str, points: u32) {
        let entry = self.0.entry(skill.to_string()).or_insert(0);
        *entry = entry.saturating_add(points);
    }

    pub fn get(&self, skill: &str) -> Option<u32> {
        self.0.get(skill).copied()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains_key(skill)
    }

    pub fn remove(&mut self, skill: &str) -> Option<u32> {
        self.0.remove(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all points in the table.
    pub fn total(&self) -> u64 {
        self.0.values().map(|v| u64::from(*v)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, u32) -> bool) {
        self.0.retain(|k, v| keep(k, *v));
    }
}

impl TryFrom<BTreeMap<String, i64>> for SkillTable {
    type Error = DomainError;

    fn try_from(entries: BTreeMap<String, i64>) -> Result<Self, Self::Error> {
        let mut table = Self::new();
        for (skill, points) in entries {
            table.insert(skill, points)?;
        }
        Ok(table)
    }
}

impl From<SkillTable> for BTreeMap<String, u32> {
    fn from(table: SkillTable) -> Self {
        table.0
    }
}

impl FromIterator<(String, u32)> for SkillTable {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
