//! Static reference data: occupations, skills and the population pyramid.
//!
//! The JSON documents are compiled into the binary and parsed once at start
//! up. The resulting [`ReferenceData`] is immutable and shared behind an `Arc`.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use cochar_domain::{
    CreditRatingRange, DomainError, OccupationCatalog, OccupationRecord, OccupationType,
    PointGroup, Sex, SkillCategory, SkillToken, CREDIT_RATING, PYRAMID_BRACKETS, REFERENCE_YEARS,
};

const OCCUPATIONS_JSON: &str = include_str!("../../data/occupations.json");
const SKILLS_JSON: &str = include_str!("../../data/skills.json");
const POP_PYRAMID_JSON: &str = include_str!("../../data/pop_pyramid.json");

/// Default value of skills missing from the skill table.
pub const UNKNOWN_SKILL_DEFAULT: u32 = 1;

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid occupation {name}: {source}")]
    Occupation {
        name: String,
        #[source]
        source: DomainError,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Population pyramid for {year} {sex} has {found} weights, expected {expected}")]
    PyramidShape {
        year: i32,
        sex: String,
        found: usize,
        expected: usize,
    },

    #[error("Population pyramid has no data for {0}")]
    MissingPyramidYear(i32),
}

fn parse<T: for<'de> Deserialize<'de>>(
    file: &'static str,
    json: &str,
) -> Result<T, ReferenceDataError> {
    serde_json::from_str(json).map_err(|source| ReferenceDataError::Parse { file, source })
}

// =============================================================================
// ReferenceData
// =============================================================================

/// Everything the generator looks up while building a character.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    occupations: OccupationCatalog,
    skills: SkillsData,
    pyramid: PopulationPyramid,
}

impl ReferenceData {
    /// Load the embedded documents with every skill era available.
    pub fn load() -> Result<Self, ReferenceDataError> {
        Self::load_for_eras(&[])
    }

    /// Load the embedded documents, keeping skills whose era list covers
    /// every era in `eras`.
    pub fn load_for_eras(eras: &[String]) -> Result<Self, ReferenceDataError> {
        Self::from_json(OCCUPATIONS_JSON, SKILLS_JSON, POP_PYRAMID_JSON, eras)
    }

    pub fn from_json(
        occupations: &str,
        skills: &str,
        pyramid: &str,
        eras: &[String],
    ) -> Result<Self, ReferenceDataError> {
        let data = Self {
            occupations: parse_occupations(occupations)?,
            skills: SkillsData::from_json(skills, eras)?,
            pyramid: PopulationPyramid::from_json(pyramid)?,
        };
        tracing::debug!(
            occupations = data.occupations.len(),
            skills = data.skills.len(),
            "Reference data loaded"
        );
        Ok(data)
    }

    pub fn occupations(&self) -> &OccupationCatalog {
        &self.occupations
    }

    pub fn skills(&self) -> &SkillsData {
        &self.skills
    }

    pub fn pyramid(&self) -> &PopulationPyramid {
        &self.pyramid
    }

    /// Copy with a different occupation catalog.
    pub fn with_occupations(&self, occupations: OccupationCatalog) -> Self {
        Self {
            occupations,
            skills: self.skills.clone(),
            pyramid: self.pyramid.clone(),
        }
    }
}

// =============================================================================
// Occupations
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawOccupation {
    credit_rating: CreditRatingRange,
    skills: Vec<Value>,
    groups: Vec<PointGroup>,
    era: String,
    #[serde(rename = "type")]
    occup_type: OccupationType,
    #[serde(default)]
    tags: Vec<String>,
}

fn parse_occupations(json: &str) -> Result<OccupationCatalog, ReferenceDataError> {
    let raw: BTreeMap<String, RawOccupation> = parse("occupations.json", json)?;
    let records = raw
        .into_iter()
        .map(|(name, raw)| {
            let record = raw
                .skills
                .iter()
                .map(SkillToken::parse)
                .collect::<Result<Vec<_>, _>>()
                .and_then(|skills| {
                    OccupationRecord::new(
                        name.clone(),
                        raw.credit_rating,
                        skills,
                        raw.groups,
                        raw.era,
                        raw.occup_type,
                        raw.tags,
                    )
                });
            record.map_err(|source| ReferenceDataError::Occupation { name, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OccupationCatalog::new(records)?)
}

// =============================================================================
// Skills
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawSkill {
    value: u32,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    era: Vec<String>,
}

/// Skill defaults and category populations for the configured eras.
#[derive(Debug, Clone, Default)]
pub struct SkillsData {
    defaults: BTreeMap<String, u32>,
    categories: BTreeMap<SkillCategory, Vec<String>>,
}

impl SkillsData {
    pub fn from_json(json: &str, eras: &[String]) -> Result<Self, ReferenceDataError> {
        let raw: BTreeMap<String, RawSkill> = parse("skills.json", json)?;
        let mut data = Self::default();
        for (name, skill) in raw {
            if !eras.iter().all(|era| skill.era.contains(era)) {
                continue;
            }
            for category in skill.categories.iter().filter_map(|c| SkillCategory::from_name(c)) {
                // Credit rating is drawn separately, never from a category
                if name != CREDIT_RATING {
                    data.categories.entry(category).or_default().push(name.clone());
                }
            }
            data.defaults.insert(name, skill.value);
        }
        Ok(data)
    }

    /// Reference default, or [`UNKNOWN_SKILL_DEFAULT`] for skills the table
    /// does not know.
    pub fn default_value(&self, skill: &str) -> u32 {
        self.defaults
            .get(skill)
            .copied()
            .unwrap_or(UNKNOWN_SKILL_DEFAULT)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.defaults.contains_key(skill)
    }

    /// Skills a category token draws from.
    pub fn skills_in(&self, category: SkillCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Basic skills without credit rating, the hobby population.
    pub fn basic_skills(&self) -> &[String] {
        self.skills_in(SkillCategory::Basic)
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

// =============================================================================
// Population pyramid
// =============================================================================

/// Age distribution weights per reference year and sex, 21 five-year brackets.
#[derive(Debug, Clone)]
pub struct PopulationPyramid {
    rows: BTreeMap<i32, BTreeMap<String, Vec<u64>>>,
}

impl PopulationPyramid {
    pub fn from_json(json: &str) -> Result<Self, ReferenceDataError> {
        let rows: BTreeMap<i32, BTreeMap<String, Vec<u64>>> = parse("pop_pyramid.json", json)?;
        for (year, by_sex) in &rows {
            for (sex, weights) in by_sex {
                if weights.len() != PYRAMID_BRACKETS {
                    return Err(ReferenceDataError::PyramidShape {
                        year: *year,
                        sex: sex.clone(),
                        found: weights.len(),
                        expected: PYRAMID_BRACKETS,
                    });
                }
            }
        }
        if let Some(year) = REFERENCE_YEARS
            .iter()
            .find(|year| {
                !rows
                    .get(*year)
                    .is_some_and(|row| row.contains_key("M") && row.contains_key("F"))
            })
        {
            return Err(ReferenceDataError::MissingPyramidYear(*year));
        }
        Ok(Self { rows })
    }

    /// Weights for a reference year. Only `M` and `F` rows exist; a
    /// non-binary lookup has no row.
    pub fn weights(&self, year: i32, sex: Sex) -> Option<&[u64]> {
        self.rows
            .get(&year)
            .and_then(|row| row.get(sex.as_str()))
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eras(list: &[&str]) -> Vec<String> {
        list.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_embedded_reference_data_loads() {
        let data = ReferenceData::load().expect("embedded data is valid");
        assert!(data.occupations().len() >= 30);
        assert!(data.occupations().contains("farmer"));
        assert!(data.occupations().contains("hacker"));
        assert!(!data.skills().is_empty());
        for year in REFERENCE_YEARS {
            assert_eq!(data.pyramid().weights(year, Sex::Male).map(<[u64]>::len), Some(21));
            assert_eq!(data.pyramid().weights(year, Sex::Female).map(<[u64]>::len), Some(21));
        }
        assert_eq!(data.pyramid().weights(1950, Sex::NonBinary), None);
    }

    #[test]
    fn test_every_category_has_a_population() {
        let data = ReferenceData::load_for_eras(&eras(&["classic-1920", "modern"]))
            .expect("embedded data is valid");
        for category in SkillCategory::ALL {
            assert!(
                !data.skills().skills_in(category).is_empty(),
                "{category} has no skills"
            );
        }
    }

    #[test]
    fn test_basic_skills_exclude_credit_rating() {
        let data = ReferenceData::load().expect("embedded data is valid");
        let basic = data.skills().basic_skills();
        assert!(basic.iter().any(|s| s == "spot hidden"));
        assert!(!basic.iter().any(|s| s == CREDIT_RATING));
        assert!(!basic.iter().any(|s| s == "cthulhu mythos"));
        assert_eq!(data.skills().default_value(CREDIT_RATING), 0);
    }

    #[test]
    fn test_era_filter_requires_every_configured_era() {
        let modern = ReferenceData::load_for_eras(&eras(&["modern"])).expect("valid");
        assert!(modern.skills().contains("computer use"));

        let both = ReferenceData::load_for_eras(&eras(&["classic-1920", "modern"])).expect("valid");
        assert!(!both.skills().contains("computer use"));
        assert!(both.skills().contains("drive auto"));

        let victorian = ReferenceData::load_for_eras(&eras(&["classic-1890"])).expect("valid");
        assert!(!victorian.skills().contains("drive auto"));
    }

    #[test]
    fn test_unknown_skill_defaults_to_one() {
        let data = ReferenceData::load().expect("valid");
        assert_eq!(data.skills().default_value("basket weaving"), UNKNOWN_SKILL_DEFAULT);
        assert_eq!(data.skills().default_value("spot hidden"), 25);
    }

    #[test]
    fn test_malformed_template_names_the_occupation() {
        let occupations = r#"{"broken": {"credit_rating": [1, 2], "skills": ["9z"],
            "groups": ["edu"], "era": "modern", "type": "custom"}}"#;
        let err = ReferenceData::from_json(occupations, SKILLS_JSON, POP_PYRAMID_JSON, &[])
            .expect_err("9z is not a category code");
        assert!(matches!(
            err,
            ReferenceDataError::Occupation { ref name, source: DomainError::InvalidSkillTemplate(_) }
                if name == "broken"
        ));
    }

    #[test]
    fn test_pyramid_shape_is_checked() {
        let err = PopulationPyramid::from_json(r#"{"1950": {"M": [1, 2, 3]}}"#)
            .expect_err("three weights");
        assert!(matches!(
            err,
            ReferenceDataError::PyramidShape { year: 1950, found: 3, expected: 21, .. }
        ));
    }

    #[test]
    fn test_with_occupations_keeps_other_tables() {
        let data = ReferenceData::load().expect("valid");
        let catalog = OccupationCatalog::new(Vec::new()).expect("empty catalog");
        let narrowed = data.with_occupations(catalog);
        assert!(narrowed.occupations().is_empty());
        assert_eq!(narrowed.skills().len(), data.skills().len());
        assert!(data.occupations().contains("farmer"));
    }
}
