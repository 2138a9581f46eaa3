//! Occupation records and the occupation catalog.
//!
//! The catalog is built once from reference data and never mutated. Tests
//! that need extra occupations clone it with [`OccupationCatalog::with_occupation`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{AttributeSet, SkillToken};

// ============================================================================
// OccupationType
// ============================================================================

/// Where an occupation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupationType {
    /// Core rulebook
    Classic,
    /// Supplement books
    Expansion,
    /// Homebrew
    Custom,
}

impl OccupationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Expansion => "expansion",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for OccupationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OccupationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Self::Classic),
            "expansion" => Ok(Self::Expansion),
            "custom" => Ok(Self::Custom),
            _ => Err(DomainError::validation(format!(
                "Unknown occupation type: {s}"
            ))),
        }
    }
}

// ============================================================================
// PointGroup / SkillPointGroups
// ============================================================================

/// The five occupation point formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointGroup {
    /// EDU x 4
    Edu,
    /// EDU x 2 + POW x 2
    EduPow,
    /// EDU x 2 + DEX x 2
    EduDex,
    /// EDU x 2 + APP x 2
    EduApp,
    /// EDU x 2 + STR x 2
    EduStr,
}

impl PointGroup {
    pub const ALL: [PointGroup; 5] = [
        Self::Edu,
        Self::EduPow,
        Self::EduDex,
        Self::EduApp,
        Self::EduStr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edu => "edu",
            Self::EduPow => "edupow",
            Self::EduDex => "edudex",
            Self::EduApp => "eduapp",
            Self::EduStr => "edustr",
        }
    }
}

impl fmt::Display for PointGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point totals of every formula for one set of characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillPointGroups {
    edu: u32,
    edupow: u32,
    edudex: u32,
    eduapp: u32,
    edustr: u32,
}

impl SkillPointGroups {
    pub fn from_attributes(attrs: &AttributeSet) -> Self {
        let edu = attrs.education;
        Self {
            edu: edu * 4,
            edupow: edu * 2 + attrs.power * 2,
            edudex: edu * 2 + attrs.dexterity * 2,
            eduapp: edu * 2 + attrs.appearance * 2,
            edustr: edu * 2 + attrs.strength * 2,
        }
    }

    pub fn points(&self, group: PointGroup) -> u32 {
        match group {
            PointGroup::Edu => self.edu,
            PointGroup::EduPow => self.edupow,
            PointGroup::EduDex => self.edudex,
            PointGroup::EduApp => self.eduapp,
            PointGroup::EduStr => self.edustr,
        }
    }

    /// Highest total among the groups an occupation belongs to.
    pub fn best_for(&self, occupation: &OccupationRecord) -> u32 {
        occupation
            .groups()
            .iter()
            .map(|group| self.points(*group))
            .max()
            .unwrap_or(0)
    }
}

// ============================================================================
// CreditRatingRange
// ============================================================================

/// Nominal credit rating bounds of an occupation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct CreditRatingRange {
    min: u32,
    max: u32,
}

impl CreditRatingRange {
    pub fn new(min: u32, max: u32) -> Result<Self, DomainError> {
        if min > max {
            return Err(DomainError::validation(format!(
                "credit rating range [{min}, {max}] is inverted"
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

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Bounds to draw credit rating from when only `occupation_points` are
    /// available. The result never exceeds `occupation_points`; when the
    /// points fall below the nominal minimum the range becomes `[0, points]`.
    pub fn bounded_by(&self, occupation_points: u32) -> (u32, u32) {
        if occupation_points < self.min {
            (0, occupation_points)
        } else {
            (self.min, self.max.min(occupation_points))
        }
    }
}

impl TryFrom<[u32; 2]> for CreditRatingRange {
    type Error = DomainError;

    fn try_from([min, max]: [u32; 2]) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<CreditRatingRange> for [u32; 2] {
    fn from(range: CreditRatingRange) -> Self {
        [range.min, range.max]
    }
}

// ============================================================================
// OccupationRecord
// ============================================================================

/// One occupation from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationRecord {
    name: String,
    credit_rating: CreditRatingRange,
    skills: Vec<SkillToken>,
    groups: Vec<PointGroup>,
    era: String,
    #[serde(rename = "type")]
    occup_type: OccupationType,
    #[serde(default)]
    tags: Vec<String>,
}

impl OccupationRecord {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for an empty name or an empty group list.
    pub fn new(
        name: impl Into<String>,
        credit_rating: CreditRatingRange,
        skills: Vec<SkillToken>,
        groups: Vec<PointGroup>,
        era: impl Into<String>,
        occup_type: OccupationType,
        tags: Vec<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Occupation name cannot be empty"));
        }
        if groups.is_empty() {
            return Err(DomainError::validation(format!(
                "Occupation {name} has no point groups"
            )));
        }
        Ok(Self {
            name,
            credit_rating,
            skills,
            groups,
            era: era.into(),
            occup_type,
            tags,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credit_rating(&self) -> CreditRatingRange {
        self.credit_rating
    }

    pub fn skills(&self) -> &[SkillToken] {
        &self.skills
    }

    pub fn groups(&self) -> &[PointGroup] {
        &self.groups
    }

    pub fn era(&self) -> &str {
        &self.era
    }

    pub fn occup_type(&self) -> OccupationType {
        self.occup_type
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn in_group(&self, group: PointGroup) -> bool {
        self.groups.contains(&group)
    }

    /// Whether the record passes the filter. Empty filter fields match anything.
    pub fn matches(&self, filter: &OccupationFilter) -> bool {
        let type_ok = match filter.occup_type.as_deref() {
            Some(requested) => requested == self.occup_type.as_str(),
            None => true,
        };
        let era_ok = filter.era.is_empty() || filter.era.iter().any(|e| *e == self.era);
        let tags_ok = filter.tags.iter().all(|tag| self.tags.contains(tag));
        type_ok && era_ok && tags_ok
    }
}

// ============================================================================
// OccupationFilter
// ============================================================================

/// Optional occupation constraints. Empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupationFilter {
    pub occup_type: Option<String>,
    pub era: Vec<String>,
    pub tags: Vec<String>,
}

impl OccupationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, occup_type: impl Into<String>) -> Self {
        self.occup_type = Some(occup_type.into());
        self
    }

    pub fn with_era(mut self, era: impl Into<String>) -> Self {
        self.era.push(era.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.occup_type.is_none() && self.era.is_empty() && self.tags.is_empty()
    }

    /// Error describing why nothing matched this filter.
    pub fn no_match_error(&self) -> DomainError {
        DomainError::NoOccupationMeetsCriteria {
            occup_type: self.occup_type.clone(),
            era: self.era.clone(),
            tags: self.tags.clone(),
        }
    }
}

// ============================================================================
// OccupationCatalog
// ============================================================================

/// Immutable set of occupations keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupationCatalog {
    occupations: BTreeMap<String, OccupationRecord>,
}

impl OccupationCatalog {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if two records share a name.
    pub fn new(records: impl IntoIterator<Item = OccupationRecord>) -> Result<Self, DomainError> {
        let mut occupations = BTreeMap::new();
        for record in records {
            let name = record.name().to_string();
            if occupations.insert(name.clone(), record).is_some() {
                return Err(DomainError::validation(format!(
                    "Duplicate occupation: {name}"
                )));
            }
        }
        Ok(Self { occupations })
    }

    /// Copy of this catalog with `record` added or replaced.
    pub fn with_occupation(&self, record: OccupationRecord) -> Self {
        let mut occupations = self.occupations.clone();
        occupations.insert(record.name().to_string(), record);
        Self { occupations }
    }

    pub fn get(&self, name: &str) -> Option<&OccupationRecord> {
        self.occupations.get(name)
    }

    /// Look up an occupation, failing with `UnknownOccupation`.
    pub fn require(&self, name: &str) -> Result<&OccupationRecord, DomainError> {
        self.get(name)
            .ok_or_else(|| DomainError::unknown_occupation(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.occupations.contains_key(name)
    }

    /// All occupation names, sorted.
    pub fn occupation_names(&self) -> Vec<&str> {
        self.occupations.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.occupations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OccupationRecord> {
        self.occupations.values()
    }

    /// Occupations of every point group. One occupation may be in several groups.
    pub fn groups(&self) -> Vec<(PointGroup, Vec<&OccupationRecord>)> {
        PointGroup::ALL
            .into_iter()
            .map(|group| (group, self.iter().filter(|o| o.in_group(group)).collect()))
            .collect()
    }

    /// Point groups with their occupations narrowed by `filter`. Groups left
    /// empty are dropped.
    pub fn filtered_groups(
        &self,
        filter: &OccupationFilter,
    ) -> Vec<(PointGroup, Vec<&OccupationRecord>)> {
        self.groups()
            .into_iter()
            .map(|(group, members)| {
                let members: Vec<_> = members.into_iter().filter(|o| o.matches(filter)).collect();
                (group, members)
            })
            .filter(|(_, members)| !members.is_empty())
            .collect()
    }
}
