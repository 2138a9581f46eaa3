//! Cochar domain: Call of Cthulhu 7e character types, rule tables and invariants.
//!
//! This crate is pure. It holds no randomness and performs no I/O; the engine
//! injects random draws and reference data.

pub mod aggregates;
pub mod error;
pub mod game_systems;
pub mod value_objects;

pub use aggregates::{Character, CharacterParts};
pub use error::DomainError;

pub use game_systems::{
    age_brackets, improvement_test_passes, reference_year, subtract_with_floor, AgeBracket,
    AgeModifiers, Coc7eSystem, AGE_CUTOFFS, COMBAT_THRESHOLDS, PYRAMID_BRACKETS, REFERENCE_YEARS,
};

pub use value_objects::{
    non_negative, AgeBounds, AttributeSet, Build, Characteristic, CreditRatingRange, DamageBonus,
    OccupationCatalog, OccupationFilter, OccupationRecord, OccupationType, PersonName,
    PointGroup, Sex, SkillCategory, SkillPointGroups, SkillTable, SkillToken,
    ACCEPTED_SEX_VALUES, BUILD_VALUES, CREDIT_RATING, DAMAGE_BONUS_VALUES, DEFAULT_MAX_AGE,
    DEFAULT_MIN_AGE, DODGE, OWN_LANGUAGE,
};
