//! Application state and composition.

use std::sync::Arc;

use cochar_domain::Character;

use crate::infrastructure::{
    names::EmbeddedNameProvider,
    ports::{NameError, NamePort, RandomPort},
    random::{SeededRandom, SystemRandom},
    reference_data::{ReferenceData, ReferenceDataError},
    settings::{GeneratorSettings, SettingsError},
};
use crate::use_cases::character::{
    AgeResolver, AttributeGenerator, CharacterError, CharacterRequest, CharacterUseCases,
    CreateCharacter, OccupationResolver, SkillAllocator,
};

/// Failures while wiring the application together.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Reference data error: {0}")]
    ReferenceData(#[from] ReferenceDataError),

    #[error("Name database error: {0}")]
    Names(#[from] NameError),
}

/// Main application state.
///
/// Holds the immutable reference data, the ports and the use cases built on
/// top of them. Safe to share between threads; generating a character never
/// mutates shared state.
pub struct App {
    pub settings: GeneratorSettings,
    pub reference: Arc<ReferenceData>,
    pub names: Arc<dyn NamePort>,
    pub random: Arc<dyn RandomPort>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub character: CharacterUseCases,
}

impl App {
    /// Compose the application from its parts.
    pub fn new(
        settings: GeneratorSettings,
        reference: Arc<ReferenceData>,
        names: Arc<dyn NamePort>,
        random: Arc<dyn RandomPort>,
    ) -> Result<Self, StartupError> {
        settings.validate()?;
        let age_bounds = settings.age_bounds()?;

        let ages = Arc::new(AgeResolver::new(reference.clone(), random.clone(), age_bounds));
        let attributes = Arc::new(AttributeGenerator::new(random.clone()));
        let occupations = Arc::new(OccupationResolver::new(reference.clone(), random.clone()));
        let skills = Arc::new(SkillAllocator::new(
            reference.clone(),
            random.clone(),
            settings.max_skill_level,
        ));
        let create = Arc::new(CreateCharacter::new(
            reference.clone(),
            names.clone(),
            ages.clone(),
            attributes.clone(),
            occupations.clone(),
            skills.clone(),
            age_bounds,
            settings.use_name_weights,
        ));

        let use_cases = UseCases {
            character: CharacterUseCases::new(create, ages, attributes, occupations, skills),
        };

        Ok(Self {
            settings,
            reference,
            names,
            random,
            use_cases,
        })
    }

    /// Compose the application with the embedded data and the random source
    /// the settings ask for.
    pub fn from_settings(settings: GeneratorSettings) -> Result<Self, StartupError> {
        settings.validate()?;
        let random: Arc<dyn RandomPort> = match settings.seed {
            Some(seed) => {
                tracing::info!(seed, "Using seeded random source");
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(SystemRandom::new()),
        };
        let reference = Arc::new(ReferenceData::load_for_eras(&settings.skill_eras)?);
        let names: Arc<dyn NamePort> = Arc::new(EmbeddedNameProvider::new(random.clone())?);
        Self::new(settings, reference, names, random)
    }

    /// Generate one character.
    pub fn create_character(&self, request: CharacterRequest) -> Result<Character, CharacterError> {
        self.use_cases.character.create.execute(request)
    }

    /// Generate one character from a loosely typed JSON request.
    pub fn create_character_from_json(
        &self,
        request: &serde_json::Value,
    ) -> Result<Character, CharacterError> {
        let request = CharacterRequest::from_json(request)?;
        self.create_character(request)
    }

    /// Occupation names, sorted.
    pub fn occupation_names(&self) -> Vec<String> {
        self.reference
            .occupations()
            .occupation_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Countries with name data, sorted.
    pub fn available_countries(&self) -> Vec<String> {
        self.names.available_countries()
    }
}
