//! Game system rules.
//!
//! Only Call of Cthulhu 7th Edition is supported.

mod coc7e;

pub use coc7e::{
    age_brackets, improvement_test_passes, reference_year, subtract_with_floor, AgeBracket,
    AgeModifiers, Coc7eSystem, AGE_CUTOFFS, COMBAT_THRESHOLDS, PYRAMID_BRACKETS, REFERENCE_YEARS,
};
