//! Age resolution from the population pyramid.

use std::sync::Arc;

use cochar_domain::{age_brackets, reference_year, AgeBounds, DomainError, Sex, REFERENCE_YEARS};

use super::roll;
use crate::infrastructure::ports::RandomPort;
use crate::infrastructure::reference_data::ReferenceData;

/// Draws ages weighted by the population of the character's year.
pub struct AgeResolver {
    reference: Arc<ReferenceData>,
    random: Arc<dyn RandomPort>,
    bounds: AgeBounds,
}

impl AgeResolver {
    pub fn new(reference: Arc<ReferenceData>, random: Arc<dyn RandomPort>, bounds: AgeBounds) -> Self {
        Self {
            reference,
            random,
            bounds,
        }
    }

    /// Age for a character living in `year`.
    ///
    /// An override is returned as is once it passes the age bounds. Otherwise
    /// a bracket is drawn from the pyramid of the nearest reference year and
    /// an age uniformly from that bracket. A non-binary `sex` uses the pyramid
    /// of a uniformly drawn binary sex.
    pub fn resolve_age(
        &self,
        year: i32,
        sex: Sex,
        age_override: Option<i64>,
    ) -> Result<u32, DomainError> {
        if let Some(age) = age_override {
            return self.bounds.check(age);
        }

        let sample_year = reference_year(year);
        if REFERENCE_YEARS.first().is_some_and(|first| year < *first)
            || REFERENCE_YEARS.last().is_some_and(|last| year > *last)
        {
            tracing::warn!(year, sample_year, "Year outside population data, using nearest sample");
        }

        let pyramid_sex = if sex.is_binary() {
            sex
        } else if self.random.gen_range(0, 1) == 0 {
            Sex::Male
        } else {
            Sex::Female
        };
        let weights = self
            .reference
            .pyramid()
            .weights(sample_year, pyramid_sex)
            .ok_or_else(|| {
                DomainError::InvalidYear(format!("{year} has no population data"))
            })?;

        let brackets = age_brackets(self.bounds);
        let bracket_weights: Vec<u64> = brackets
            .iter()
            .map(|bracket| weights.get(bracket.weight_index).copied().unwrap_or(0))
            .collect();
        let Some(bracket) = brackets.get(self.random.weighted_index(&bracket_weights)) else {
            return Ok(self.bounds.min());
        };

        let age = roll(self.random.as_ref(), bracket.low, bracket.high);
        tracing::debug!(year, sample_year, sex = pyramid_sex.as_str(), age, "Age resolved");
        Ok(age)
    }
}
