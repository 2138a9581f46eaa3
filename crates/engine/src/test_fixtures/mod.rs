//! Test fixtures and common test helpers.
//!
//! Builds fully wired [`App`] instances over the embedded reference data with
//! a seeded random source, so generation tests are reproducible.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{seeded_app, request};
//!
//! #[test]
//! fn test_farmer_credit_rating() {
//!     let app = seeded_app(42);
//!     let character = app.create_character(request().with_occupation("farmer"))?;
//!     // ... test logic
//! }
//! ```

use std::sync::Arc;

use cochar_domain::{
    CreditRatingRange, OccupationRecord, OccupationType, PointGroup, SkillToken,
};

use crate::app::App;
use crate::infrastructure::{
    names::EmbeddedNameProvider,
    ports::{NamePort, RandomPort},
    random::SeededRandom,
    reference_data::ReferenceData,
    settings::GeneratorSettings,
};
use crate::use_cases::character::CharacterRequest;

// =============================================================================
// App Builders
// =============================================================================

/// Default settings with a fixed seed.
pub fn seeded_settings(seed: u64) -> GeneratorSettings {
    GeneratorSettings::default().with_seed(seed)
}

/// App over the embedded data, seeded.
///
/// # Panics
///
/// Panics if the embedded data cannot be loaded.
pub fn seeded_app(seed: u64) -> App {
    App::from_settings(seeded_settings(seed)).expect("embedded data should load")
}

/// App over custom reference data and settings, seeded.
///
/// # Panics
///
/// Panics if the settings are invalid or the embedded names cannot be loaded.
pub fn app_with(reference: ReferenceData, settings: GeneratorSettings) -> App {
    let random: Arc<dyn RandomPort> = Arc::new(SeededRandom::new(settings.seed.unwrap_or(0)));
    let names: Arc<dyn NamePort> =
        Arc::new(EmbeddedNameProvider::new(random.clone()).expect("embedded names"));
    App::new(settings, Arc::new(reference), names, random).expect("app should compose")
}

/// Embedded reference data with no era filter.
///
/// # Panics
///
/// Panics if the embedded data cannot be loaded.
pub fn reference_data() -> ReferenceData {
    ReferenceData::load().expect("embedded reference data")
}

// =============================================================================
// Requests
// =============================================================================

/// A 1925 US request with nothing else set.
pub fn request() -> CharacterRequest {
    CharacterRequest::new(1925, "US")
}

// =============================================================================
// Occupations
// =============================================================================

/// A homebrew occupation with an unusual credit rating range and only
/// literal skills.
///
/// # Panics
///
/// Panics if the hardcoded record is invalid.
pub fn occult_bookseller() -> OccupationRecord {
    OccupationRecord::new(
        "occult bookseller",
        CreditRatingRange::new(40, 45).expect("valid range"),
        vec![
            SkillToken::Literal("accounting".to_string()),
            SkillToken::Literal("appraise".to_string()),
            SkillToken::Literal("library use".to_string()),
            SkillToken::Literal("occult".to_string()),
        ],
        vec![PointGroup::Edu],
        "classic-1920",
        OccupationType::Custom,
        vec!["lovecraftian".to_string()],
    )
    .expect("valid occupation")
}

/// Embedded reference data with [`occult_bookseller`] added to the catalog.
pub fn reference_with_bookseller() -> ReferenceData {
    let reference = reference_data();
    let catalog = reference.occupations().with_occupation(occult_bookseller());
    reference.with_occupations(catalog)
}
