//! Create character use case.
//!
//! Runs the whole pipeline: age and names, characteristics, occupation,
//! derived and combat values, then skills.

use std::sync::Arc;

use cochar_domain::{
    AgeBounds, Character, CharacterParts, Coc7eSystem, DomainError, PersonName, DODGE,
};

use super::age::AgeResolver;
use super::attributes::AttributeGenerator;
use super::error::CharacterError;
use super::occupation::OccupationResolver;
use super::request::CharacterRequest;
use super::skills::SkillAllocator;
use crate::infrastructure::ports::NamePort;
use crate::infrastructure::reference_data::ReferenceData;

pub struct CreateCharacter {
    reference: Arc<ReferenceData>,
    names: Arc<dyn NamePort>,
    ages: Arc<AgeResolver>,
    attributes: Arc<AttributeGenerator>,
    occupations: Arc<OccupationResolver>,
    skills: Arc<SkillAllocator>,
    age_bounds: AgeBounds,
    use_name_weights: bool,
}

impl CreateCharacter {
    pub fn new(
        reference: Arc<ReferenceData>,
        names: Arc<dyn NamePort>,
        ages: Arc<AgeResolver>,
        attributes: Arc<AttributeGenerator>,
        occupations: Arc<OccupationResolver>,
        skills: Arc<SkillAllocator>,
        age_bounds: AgeBounds,
        use_name_weights: bool,
    ) -> Self {
        Self {
            reference,
            names,
            ages,
            attributes,
            occupations,
            skills,
            age_bounds,
            use_name_weights,
        }
    }

    /// Generate one character.
    ///
    /// # Errors
    ///
    /// Any invalid input aborts the whole generation; nothing is partially
    /// returned.
    #[tracing::instrument(
        skip(self, request),
        fields(year = request.year, country = %request.country)
    )]
    pub fn execute(&self, request: CharacterRequest) -> Result<Character, CharacterError> {
        let available = self.names.available_countries();
        if !available.contains(&request.country) {
            return Err(DomainError::InvalidCountry {
                value: request.country,
                available,
            }
            .into());
        }

        let year = request.year;
        let country = request.country.as_str();
        let sex = request.sex;
        let age = self.ages.resolve_age(year, sex, request.age)?;

        let first_name = match request.first_name.as_deref() {
            Some(name) => name.to_string(),
            None => self
                .names
                .first_name(year, sex, country, self.use_name_weights)?,
        };
        let last_name = match request.last_name.as_deref() {
            Some(name) => name.to_string(),
            None => self
                .names
                .last_name(year, sex, country, self.use_name_weights)?,
        };

        let attributes = self.attributes.generate_attributes(age);

        let occupation = self.occupations.resolve_occupation(
            &attributes,
            request.random_mode,
            request.occupation.as_deref(),
            &request.filter,
        )?;
        let occupation_points =
            self.occupations
                .occupation_points(&attributes, &occupation, request.occupation_points)?;
        let hobby_points = self
            .occupations
            .hobby_points(&attributes, request.hobby_points);

        let record = self.reference.occupations().require(&occupation)?;
        let skills = self.skills.allocate_skills(
            record,
            occupation_points,
            hobby_points,
            attributes.dexterity,
            attributes.education,
            request.skills,
        );
        let dodge = skills
            .get(DODGE)
            .unwrap_or_else(|| Coc7eSystem::calculate_dodge(attributes.dexterity));

        let parts = CharacterParts {
            year,
            country: country.to_string(),
            first_name: PersonName::labelled("First name", first_name)?,
            last_name: PersonName::labelled("Last name", last_name)?,
            age,
            sex,
            occupation,
            attributes,
            sanity_points: Coc7eSystem::calculate_starting_sanity(attributes.power),
            magic_points: Coc7eSystem::calculate_magic_points(attributes.power),
            hit_points: Coc7eSystem::calculate_hp(attributes.condition, attributes.size),
            damage_bonus: Coc7eSystem::calculate_damage_bonus(attributes.strength, attributes.size),
            build: Coc7eSystem::calculate_build(attributes.strength, attributes.size),
            dodge,
            skills,
        };
        let character = Character::new(parts, self.age_bounds)?;

        tracing::info!(
            name = %format!("{} {}", character.first_name(), character.last_name()),
            age = character.age(),
            occupation = character.occupation(),
            occupation_points,
            hobby_points,
            skills = character.skills().len(),
            "Character generated"
        );
        Ok(character)
    }
}
