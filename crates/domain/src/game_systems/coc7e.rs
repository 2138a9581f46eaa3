//! Call of Cthulhu 7th Edition character creation rules.
//!
//! Deterministic tables and formulas used by the character generator:
//! - Age modifiers (characteristic deductions, appearance, move rate, EDU tests)
//! - Derived attributes (sanity, magic points, hit points)
//! - Combat matrix (damage bonus and build from STR + SIZ)
//! - Population pyramid brackets and the reference years they were sampled at
//!
//! Everything random lives in the engine; these functions only compute.

use crate::value_objects::{AgeBounds, Build, DamageBonus};

/// Ascending STR + SIZ thresholds of the combat matrix.
pub const COMBAT_THRESHOLDS: [u32; 9] = [64, 84, 124, 164, 204, 283, 364, 444, 524];

/// Upper age of each modifier bracket. Ages past the last cutoff use the last row.
pub const AGE_CUTOFFS: [u32; 7] = [19, 39, 49, 59, 69, 79, 90];
const MOD_CHARACTERISTIC_POINTS: [u32; 7] = [5, 0, 5, 10, 20, 40, 80];
const MOD_APPEARANCE: [u32; 7] = [0, 0, 5, 10, 15, 20, 25];
const MOD_MOVE_RATE: [u32; 7] = [0, 0, 1, 2, 3, 4, 5];
const MOD_EDUCATION_TESTS: [u32; 7] = [0, 1, 2, 3, 4, 4, 4];

/// Years the population pyramid data was sampled at.
pub const REFERENCE_YEARS: [i32; 15] = [
    1950, 1955, 1960, 1965, 1970, 1975, 1980, 1985, 1990, 1995, 2000, 2005, 2010, 2015, 2020,
];

/// Number of five-year brackets per sex in the population pyramid (0-4 … 100+).
pub const PYRAMID_BRACKETS: usize = 21;
const PYRAMID_BRACKET_WIDTH: u32 = 5;

/// Call of Cthulhu 7th Edition formulas.
pub struct Coc7eSystem;

impl Coc7eSystem {
    /// Calculate derived HP from CON and SIZ.
    pub fn calculate_hp(con: u32, siz: u32) -> u32 {
        (con + siz) / 10
    }

    /// Calculate starting sanity from POW.
    pub fn calculate_starting_sanity(pow: u32) -> u32 {
        pow
    }

    /// Calculate magic points from POW.
    pub fn calculate_magic_points(pow: u32) -> u32 {
        pow / 5
    }

    /// Calculate the base move rate from STR, DEX, SIZ (before age modifiers).
    pub fn calculate_move_rate(str_val: u32, dex: u32, siz: u32) -> u32 {
        if dex < siz && str_val < siz {
            7
        } else if str_val >= siz && dex >= siz {
            9
        } else {
            8
        }
    }

    /// Calculate damage bonus from STR + SIZ.
    pub fn calculate_damage_bonus(str_val: u32, siz: u32) -> DamageBonus {
        DamageBonus::from_index(Self::combat_bucket(str_val, siz))
    }

    /// Calculate build from STR + SIZ.
    pub fn calculate_build(str_val: u32, siz: u32) -> Build {
        Build::from_index(Self::combat_bucket(str_val, siz))
    }

    /// Dodge base value: half of DEX, rounded down.
    pub fn calculate_dodge(dex: u32) -> u32 {
        dex / 2
    }

    /// Row of the combat matrix: number of thresholds strictly below STR + SIZ,
    /// capped at the last row.
    pub fn combat_bucket(str_val: u32, siz: u32) -> usize {
        let total = str_val + siz;
        COMBAT_THRESHOLDS
            .iter()
            .take_while(|threshold| **threshold < total)
            .count()
            .min(COMBAT_THRESHOLDS.len() - 1)
    }
}

// ============================================================================
// Age modifiers
// ============================================================================

/// Deductions and EDU tests applied to a freshly rolled character of a given age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeModifiers {
    /// Points removed one at a time from STR, CON or DEX
    pub characteristic_points: u32,
    pub appearance: u32,
    pub move_rate: u32,
    /// Number of EDU improvement tests
    pub education_tests: u32,
}

impl AgeModifiers {
    pub fn for_age(age: u32) -> Self {
        let bracket = Self::bracket(age);
        Self {
            characteristic_points: MOD_CHARACTERISTIC_POINTS[bracket],
            appearance: MOD_APPEARANCE[bracket],
            move_rate: MOD_MOVE_RATE[bracket],
            education_tests: MOD_EDUCATION_TESTS[bracket],
        }
    }

    /// Count of cutoffs strictly below `age`, capped at the last row.
    pub fn bracket(age: u32) -> usize {
        AGE_CUTOFFS
            .iter()
            .take_while(|cutoff| **cutoff < age)
            .count()
            .min(AGE_CUTOFFS.len() - 1)
    }
}

/// Subtract `points`, never going below 1.
pub fn subtract_with_floor(value: u32, points: u32) -> u32 {
    if value > points {
        value - points
    } else {
        1
    }
}

/// Improvement test: the value improves when the d100 roll exceeds it.
pub fn improvement_test_passes(value: u32, roll: u32) -> bool {
    roll > value
}

// ============================================================================
// Population pyramid
// ============================================================================

/// Reference year used for `year`: years before the first sample use the
/// first sample, otherwise the nearest sample at or after `year`, capped at
/// the last one.
pub fn reference_year(year: i32) -> i32 {
    let index = REFERENCE_YEARS
        .iter()
        .take_while(|sample| **sample < year)
        .count()
        .min(REFERENCE_YEARS.len() - 1);
    REFERENCE_YEARS[index]
}

/// An age range together with the pyramid weight that covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBracket {
    /// Index into the 21 weights of a pyramid row
    pub weight_index: usize,
    pub low: u32,
    pub high: u32,
}

/// Pyramid brackets clipped to `bounds`. Brackets entirely outside the bounds
/// are dropped; partially covered ones are narrowed.
pub fn age_brackets(bounds: AgeBounds) -> Vec<AgeBracket> {
    (0..PYRAMID_BRACKETS)
        .filter_map(|weight_index| {
            let start = weight_index as u32 * PYRAMID_BRACKET_WIDTH;
            let end = start + PYRAMID_BRACKET_WIDTH - 1;
            let low = start.max(bounds.min());
            let high = end.min(bounds.max());
            (low <= high).then_some(AgeBracket {
                weight_index,
                low,
                high,
            })
        })
        .collect()
}
