//! Character aggregate - a generated investigator sheet
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: all fields are encapsulated behind accessors
//! - **Newtypes**: `PersonName`, `DamageBonus`, `Build`, `SkillTable` are valid by construction
//! - **Validated setters**: every edit runs the same check used at construction
//!
//! The generation pipeline in the engine builds a [`CharacterParts`] and turns
//! it into a `Character` with [`Character::new`].

use serde::Serialize;
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::{
    non_negative, AgeBounds, AttributeSet, Build, Characteristic, DamageBonus, OccupationCatalog,
    PersonName, Sex, SkillTable,
};

/// Everything needed to assemble a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterParts {
    pub year: i32,
    pub country: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub age: u32,
    pub sex: Sex,
    pub occupation: String,
    pub attributes: AttributeSet,
    pub sanity_points: u32,
    pub magic_points: u32,
    pub hit_points: u32,
    pub damage_bonus: DamageBonus,
    pub build: Build,
    pub dodge: u32,
    pub skills: SkillTable,
}

/// A generated character.
///
/// # Invariants
///
/// - `age` is always within the bounds the character was created with
/// - Names are never empty (enforced by `PersonName`)
/// - Numeric fields are never negative (unsigned, setters reject negatives)
/// - `damage_bonus` and `build` belong to the fixed combat tables
///
/// # Example
///
/// ```ignore
/// let character = app.create_character(CharacterRequest::new(1925, "US"))?;
/// println!("{character}");
/// let json = serde_json::to_string(&character)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    year: i32,
    country: String,
    first_name: PersonName,
    last_name: PersonName,
    age: u32,
    sex: Sex,
    occupation: String,
    #[serde(flatten)]
    attributes: AttributeSet,
    damage_bonus: DamageBonus,
    build: Build,
    skills: SkillTable,
    dodge: u32,
    sanity_points: u32,
    magic_points: u32,
    hit_points: u32,
    #[serde(skip)]
    age_bounds: AgeBounds,
}

impl Character {
    /// # Errors
    ///
    /// Returns `DomainError::AgeOutOfRange` if `parts.age` is outside `age_bounds`.
    pub fn new(parts: CharacterParts, age_bounds: AgeBounds) -> Result<Self, DomainError> {
        let age = age_bounds.check(i64::from(parts.age))?;
        Ok(Self {
            year: parts.year,
            country: parts.country,
            first_name: parts.first_name,
            last_name: parts.last_name,
            age,
            sex: parts.sex,
            occupation: parts.occupation,
            attributes: parts.attributes,
            damage_bonus: parts.damage_bonus,
            build: parts.build,
            skills: parts.skills,
            dodge: parts.dodge,
            sanity_points: parts.sanity_points,
            magic_points: parts.magic_points,
            hit_points: parts.hit_points,
            age_bounds,
        })
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn occupation(&self) -> &str {
        &self.occupation
    }

    pub fn age_bounds(&self) -> AgeBounds {
        self.age_bounds
    }

    // =========================================================================
    // Characteristics and derived values
    // =========================================================================

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn characteristic(&self, characteristic: Characteristic) -> u32 {
        self.attributes.get(characteristic)
    }

    pub fn sanity_points(&self) -> u32 {
        self.sanity_points
    }

    pub fn magic_points(&self) -> u32 {
        self.magic_points
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    pub fn damage_bonus(&self) -> DamageBonus {
        self.damage_bonus
    }

    pub fn build(&self) -> Build {
        self.build
    }

    pub fn dodge(&self) -> u32 {
        self.dodge
    }

    pub fn skills(&self) -> &SkillTable {
        &self.skills
    }

    // =========================================================================
    // Validated setters
    // =========================================================================

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    /// Set the country; it must be one of `available`.
    pub fn set_country(&mut self, country: &str, available: &[String]) -> Result<(), DomainError> {
        if !available.iter().any(|c| c == country) {
            return Err(DomainError::InvalidCountry {
                value: country.to_string(),
                available: available.to_vec(),
            });
        }
        self.country = country.to_string();
        Ok(())
    }

    pub fn set_first_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.first_name = PersonName::labelled("First name", name)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.last_name = PersonName::labelled("Last name", name)?;
        Ok(())
    }

    pub fn set_age(&mut self, age: i64) -> Result<(), DomainError> {
        self.age = self.age_bounds.check(age)?;
        Ok(())
    }

    pub fn set_sex(&mut self, sex: Option<&str>) -> Result<(), DomainError> {
        self.sex = Sex::from_optional(sex)?;
        Ok(())
    }

    /// Set the occupation; it must exist in `catalog`.
    pub fn set_occupation(
        &mut self,
        occupation: &str,
        catalog: &OccupationCatalog,
    ) -> Result<(), DomainError> {
        let record = catalog.require(occupation)?;
        self.occupation = record.name().to_string();
        Ok(())
    }

    pub fn set_characteristic(
        &mut self,
        characteristic: Characteristic,
        value: i64,
    ) -> Result<(), DomainError> {
        self.attributes.set(characteristic, value)
    }

    pub fn set_sanity_points(&mut self, value: i64) -> Result<(), DomainError> {
        self.sanity_points = non_negative("sanity_points", value)?;
        Ok(())
    }

    pub fn set_magic_points(&mut self, value: i64) -> Result<(), DomainError> {
        self.magic_points = non_negative("magic_points", value)?;
        Ok(())
    }

    pub fn set_hit_points(&mut self, value: i64) -> Result<(), DomainError> {
        self.hit_points = non_negative("hit_points", value)?;
        Ok(())
    }

    pub fn set_dodge(&mut self, value: i64) -> Result<(), DomainError> {
        self.dodge = non_negative("dodge", value)?;
        Ok(())
    }

    /// Set the damage bonus from its sheet notation (case-insensitive).
    pub fn set_damage_bonus(&mut self, value: &str) -> Result<(), DomainError> {
        self.damage_bonus = value.parse()?;
        Ok(())
    }

    pub fn set_build(&mut self, value: i64) -> Result<(), DomainError> {
        self.build = Build::new(value)?;
        Ok(())
    }

    pub fn set_skills(&mut self, skills: SkillTable) {
        self.skills = skills;
    }

    pub fn set_skill(&mut self, skill: &str, points: i64) -> Result<(), DomainError> {
        self.skills.insert(skill, points)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const SKILLS_PER_ROW: usize = 3;

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.attributes;
        writeln!(f, "Character")?;
        writeln!(f, "Name: {} {}", self.first_name, self.last_name)?;
        writeln!(f, "Sex: {}, Age: {}, Country: {}", self.sex, self.age, self.country)?;
        writeln!(f, "Occupation: {}", capitalize(&self.occupation))?;
        writeln!(f, "STR: {} CON: {} SIZ: {}", a.strength, a.condition, a.size)?;
        writeln!(f, "DEX: {} APP: {} EDU: {}", a.dexterity, a.appearance, a.education)?;
        writeln!(f, "INT: {} POW: {} Luck: {}", a.intelligence, a.power, a.luck)?;
        writeln!(
            f,
            "Sanity: {} Magic points: {} Hit points: {}",
            self.sanity_points, self.magic_points, self.hit_points
        )?;
        writeln!(f, "Damage bonus: {}", self.damage_bonus)?;
        writeln!(f, "Build: {}", self.build)?;
        writeln!(f, "Dodge: {}", self.dodge)?;
        writeln!(f, "Move rate: {}", a.move_rate)?;
        write!(f, "Skills:")?;
        for (i, (skill, value)) in self.skills.iter().enumerate() {
            if i % SKILLS_PER_ROW == 0 {
                writeln!(f)?;
            }
            write!(f, "| {}: {} |", capitalize(skill), value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{
        CreditRatingRange, OccupationRecord, OccupationType, PointGroup, SkillToken,
    };

    fn parts() -> CharacterParts {
        let mut skills = SkillTable::new();
        skills.set("credit rating", 20);
        skills.set("occult", 45);
        skills.set("spot hidden", 60);
        skills.set("listen", 40);
        CharacterParts {
            year: 1925,
            country: "US".to_string(),
            first_name: PersonName::new("Randolph").expect("valid"),
            last_name: PersonName::new("Carter").expect("valid"),
            age: 34,
            sex: Sex::Male,
            occupation: "antiquarian".to_string(),
            attributes: AttributeSet {
                strength: 45,
                condition: 50,
                size: 65,
                dexterity: 51,
                appearance: 40,
                education: 80,
                intelligence: 75,
                power: 60,
                luck: 55,
                move_rate: 7,
            },
            sanity_points: 60,
            magic_points: 12,
            hit_points: 11,
            damage_bonus: DamageBonus::Zero,
            build: Build::from_index(2),
            dodge: 25,
            skills,
        }
    }

    fn character() -> Character {
        Character::new(parts(), AgeBounds::default()).expect("valid character")
    }

    #[test]
    fn test_new_rejects_age_outside_bounds() {
        let mut young = parts();
        young.age = 12;
        assert!(matches!(
            Character::new(young, AgeBounds::default()),
            Err(DomainError::AgeOutOfRange { age: 12, .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let character = character();
        assert_eq!(character.first_name().as_str(), "Randolph");
        assert_eq!(character.characteristic(Characteristic::Dexterity), 51);
        assert_eq!(character.skills().get("occult"), Some(45));
        assert_eq!(character.dodge(), 25);
    }

    #[test]
    fn test_setters_validate() {
        let mut character = character();

        assert!(character.set_age(91).is_err());
        assert_eq!(character.age(), 34);
        character.set_age(40).expect("in range");
        assert_eq!(character.age(), 40);

        assert!(matches!(
            character.set_sex(Some("X")),
            Err(DomainError::InvalidSex { .. })
        ));
        character.set_sex(Some("f")).expect("valid sex");
        assert_eq!(character.sex(), Sex::Female);

        assert_eq!(
            character.set_first_name(""),
            Err(DomainError::EmptyName("First name"))
        );
        assert!(character.set_damage_bonus("+1k6").is_ok());
        assert_eq!(character.damage_bonus(), DamageBonus::OneK6);
        assert!(matches!(
            character.set_build(9),
            Err(DomainError::InvalidBuild { value: 9, .. })
        ));
        assert!(character.set_dodge(-1).is_err());
        assert!(character.set_skill("occult", -5).is_err());
        assert!(character
            .set_characteristic(Characteristic::Strength, -1)
            .is_err());
    }

    #[test]
    fn test_set_country_checks_available_list() {
        let mut character = character();
        let available = vec!["US".to_string(), "PL".to_string()];
        character.set_country("PL", &available).expect("available");
        assert_eq!(character.country(), "PL");
        assert!(matches!(
            character.set_country("Atlantis", &available),
            Err(DomainError::InvalidCountry { .. })
        ));
    }

    #[test]
    fn test_set_occupation_checks_catalog() {
        let mut character = character();
        let record = OccupationRecord::new(
            "librarian",
            CreditRatingRange::new(9, 35).expect("valid"),
            vec![SkillToken::Literal("library use".to_string())],
            vec![PointGroup::Edu],
            "classic-1920",
            OccupationType::Classic,
            vec![],
        )
        .expect("valid");
        let catalog = OccupationCatalog::new([record]).expect("valid");

        character
            .set_occupation("librarian", &catalog)
            .expect("known occupation");
        assert_eq!(character.occupation(), "librarian");
        assert_eq!(
            character.set_occupation("pirate", &catalog),
            Err(DomainError::unknown_occupation("pirate"))
        );
    }

    #[test]
    fn test_json_export_is_flat() {
        let value = serde_json::to_value(character()).expect("json");
        assert_eq!(value["first_name"], "Randolph");
        assert_eq!(value["strength"], 45);
        assert_eq!(value["move_rate"], 7);
        assert_eq!(value["damage_bonus"], "0");
        assert_eq!(value["build"], 0);
        assert_eq!(value["sex"], "M");
        assert_eq!(value["skills"]["occult"], 45);
        assert!(value.get("age_bounds").is_none());
        assert!(value.get("attributes").is_none());
    }

    #[test]
    fn test_display_sheet() {
        let sheet = character().to_string();
        assert!(sheet.starts_with("Character\nName: Randolph Carter\n"));
        assert!(sheet.contains("Occupation: Antiquarian"));
        assert!(sheet.contains("STR: 45 CON: 50 SIZ: 65"));
        assert!(sheet.contains("Dodge: 25"));
        // four skills -> two rows
        let rows: Vec<&str> = sheet
            .split("Skills:\n")
            .nth(1)
            .expect("skills section")
            .lines()
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "| Credit rating: 20 || Listen: 40 || Occult: 45 |");
        assert_eq!(rows[1], "| Spot hidden: 60 |");
    }
}
