//! Embedded name database.
//!
//! Names are grouped by country, then by kind (first/last), sex and dataset
//! year. Each entry carries a popularity weight.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use cochar_domain::Sex;

use crate::infrastructure::ports::{NameError, NamePort, RandomPort};

const NAMES_JSON: &str = include_str!("../../data/names.json");

/// Sex key used when the requested one is missing.
const FALLBACK_SEX: &str = "N";

#[derive(Debug, Clone, Deserialize)]
struct NameEntry(String, u64);

type NamesBySex = BTreeMap<String, BTreeMap<i32, Vec<NameEntry>>>;

#[derive(Debug, Clone, Deserialize)]
struct CountryNames {
    first_names: NamesBySex,
    last_names: NamesBySex,
}

#[derive(Debug, Clone, Copy)]
enum NameKind {
    First,
    Last,
}

impl NameKind {
    fn label(self) -> &'static str {
        match self {
            Self::First => "first names",
            Self::Last => "last names",
        }
    }
}

/// Name provider backed by the name database compiled into the binary.
pub struct EmbeddedNameProvider {
    countries: BTreeMap<String, CountryNames>,
    random: Arc<dyn RandomPort>,
}

impl EmbeddedNameProvider {
    /// Load the embedded database.
    pub fn new(random: Arc<dyn RandomPort>) -> Result<Self, NameError> {
        Self::from_json(NAMES_JSON, random)
    }

    pub fn from_json(json: &str, random: Arc<dyn RandomPort>) -> Result<Self, NameError> {
        let countries: BTreeMap<String, CountryNames> = serde_json::from_str(json)?;
        Ok(Self { countries, random })
    }

    fn pick(
        &self,
        kind: NameKind,
        year: i32,
        sex: Sex,
        country: &str,
        use_weights: bool,
    ) -> Result<String, NameError> {
        let names = self
            .countries
            .get(country)
            .ok_or_else(|| NameError::UnknownCountry {
                country: country.to_string(),
                available: self.available_countries(),
            })?;
        let by_sex = match kind {
            NameKind::First => &names.first_names,
            NameKind::Last => &names.last_names,
        };

        let by_year = self
            .sex_lists(by_sex, sex, country, kind)
            .ok_or_else(|| NameError::no_names(kind.label(), country))?;
        let entries = dataset_for_year(by_year, year)
            .filter(|entries| !entries.is_empty())
            .ok_or_else(|| NameError::no_names(kind.label(), country))?;

        let index = if use_weights {
            let weights: Vec<u64> = entries.iter().map(|entry| entry.1).collect();
            self.random.weighted_index(&weights)
        } else {
            self.random_index(entries.len())
        };
        entries
            .get(index)
            .map(|entry| entry.0.clone())
            .ok_or_else(|| NameError::no_names(kind.label(), country))
    }

    /// Lists for `sex`, else the non-binary lists, else a random sex that has data.
    fn sex_lists<'a>(
        &self,
        by_sex: &'a NamesBySex,
        sex: Sex,
        country: &str,
        kind: NameKind,
    ) -> Option<&'a BTreeMap<i32, Vec<NameEntry>>> {
        if let Some(lists) = by_sex.get(sex.as_str()) {
            return Some(lists);
        }
        if let Some(lists) = by_sex.get(FALLBACK_SEX) {
            tracing::warn!(
                country,
                requested = sex.as_str(),
                kind = kind.label(),
                "No names for requested sex, using non-binary names"
            );
            return Some(lists);
        }
        let available: Vec<&String> = by_sex.keys().collect();
        if available.is_empty() {
            return None;
        }
        let chosen = available[self.random_index(available.len())];
        tracing::warn!(
            country,
            requested = sex.as_str(),
            fallback = %chosen,
            kind = kind.label(),
            "No names for requested sex, using a random one"
        );
        by_sex.get(chosen)
    }

    fn random_index(&self, len: usize) -> usize {
        let last = i32::try_from(len.saturating_sub(1)).unwrap_or(i32::MAX);
        usize::try_from(self.random.gen_range(0, last)).unwrap_or(0)
    }
}

/// Latest dataset not newer than `year`, else the earliest one.
fn dataset_for_year(by_year: &BTreeMap<i32, Vec<NameEntry>>, year: i32) -> Option<&Vec<NameEntry>> {
    by_year
        .range(..=year)
        .next_back()
        .or_else(|| by_year.iter().next())
        .map(|(_, entries)| entries)
}

impl NamePort for EmbeddedNameProvider {
    fn first_name(
        &self,
        year: i32,
        sex: Sex,
        country: &str,
        use_weights: bool,
    ) -> Result<String, NameError> {
        self.pick(NameKind::First, year, sex, country, use_weights)
    }

    fn last_name(
        &self,
        year: i32,
        sex: Sex,
        country: &str,
        use_weights: bool,
    ) -> Result<String, NameError> {
        self.pick(NameKind::Last, year, sex, country, use_weights)
    }

    fn available_countries(&self) -> Vec<String> {
        self.countries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockRandomPort;
    use crate::infrastructure::random::{FixedRandom, SeededRandom};

    const SMALL_DB: &str = r#"{
        "XX": {
            "first_names": {
                "M": {"1900": [["Old", 1]], "1950": [["Mid", 1], ["Other", 3]]},
                "N": {"1900": [["Sam", 1]]}
            },
            "last_names": {
                "F": {"1900": [["Kowalska", 1]]}
            }
        }
    }"#;

    fn provider(random: impl RandomPort + 'static) -> EmbeddedNameProvider {
        EmbeddedNameProvider::from_json(SMALL_DB, Arc::new(random)).expect("valid database")
    }

    #[test]
    fn test_embedded_database_loads() {
        let names = EmbeddedNameProvider::new(Arc::new(SeededRandom::new(1))).expect("embedded db");
        assert_eq!(names.available_countries(), vec!["DE", "FR", "GB", "PL", "US"]);
        for country in names.available_countries() {
            for sex in [Sex::Male, Sex::Female, Sex::NonBinary] {
                let first = names.first_name(1925, sex, &country, true).expect("first name");
                let last = names.last_name(1925, sex, &country, false).expect("last name");
                assert!(!first.is_empty() && !last.is_empty());
            }
        }
    }

    #[test]
    fn test_dataset_year_is_latest_not_after_request() {
        let names = provider(FixedRandom(0));
        assert_eq!(names.first_name(1925, Sex::Male, "XX", false).ok(), Some("Old".to_string()));
        assert_eq!(names.first_name(1990, Sex::Male, "XX", false).ok(), Some("Mid".to_string()));
        // Before every dataset: the earliest one
        assert_eq!(names.first_name(1800, Sex::Male, "XX", false).ok(), Some("Old".to_string()));
    }

    #[test]
    fn test_weighted_pick_uses_popularity() {
        let mut random = MockRandomPort::new();
        random
            .expect_weighted_index()
            .withf(|weights: &[u64]| weights == [1, 3])
            .times(1)
            .return_const(1usize);
        let names = provider(random);
        assert_eq!(names.first_name(1950, Sex::Male, "XX", true).ok(), Some("Other".to_string()));
    }

    #[test]
    fn test_missing_sex_falls_back_to_non_binary() {
        let names = provider(FixedRandom(0));
        assert_eq!(names.first_name(1925, Sex::Female, "XX", false).ok(), Some("Sam".to_string()));
    }

    #[test]
    fn test_missing_sex_without_non_binary_uses_available_sex() {
        let names = provider(FixedRandom(0));
        assert_eq!(names.last_name(1925, Sex::Male, "XX", false).ok(), Some("Kowalska".to_string()));
        assert_eq!(names.last_name(1925, Sex::NonBinary, "XX", false).ok(), Some("Kowalska".to_string()));
    }

    #[test]
    fn test_unknown_country() {
        let names = provider(FixedRandom(0));
        let err = names
            .first_name(1925, Sex::Male, "ZZ", true)
            .expect_err("no data for ZZ");
        assert!(matches!(
            err,
            NameError::UnknownCountry { ref country, ref available }
                if country == "ZZ" && available == &vec!["XX".to_string()]
        ));
    }

    #[test]
    fn test_invalid_database_is_reported() {
        let result = EmbeddedNameProvider::from_json("[]", Arc::new(FixedRandom(0)));
        assert!(matches!(result, Err(NameError::Database(_))));
    }
}
