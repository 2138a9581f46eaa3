//! Skill list expansion and point allocation.
//!
//! Points are spent in two passes over one running table: occupation points
//! (less credit rating) over the occupation's expanded template, then hobby
//! points over the basic skills. Each pass first seeds its skills at their
//! defaults, then repeatedly adds a random amount to a random listed skill
//! until the budget is spent or no listed skill has headroom left.

use std::sync::Arc;

use cochar_domain::{
    OccupationRecord, SkillTable, SkillToken, CREDIT_RATING, DODGE, OWN_LANGUAGE,
};

use super::roll;
use crate::infrastructure::ports::RandomPort;
use crate::infrastructure::reference_data::{ReferenceData, SkillsData};

/// Skill defaults for one character: the reference table plus the two
/// defaults derived from the character's characteristics.
#[derive(Debug, Clone, Copy)]
pub struct SkillDefaults<'a> {
    skills: &'a SkillsData,
    dodge: u32,
    own_language: u32,
}

impl<'a> SkillDefaults<'a> {
    pub fn new(skills: &'a SkillsData, dexterity: u32, education: u32) -> Self {
        Self {
            skills,
            dodge: dexterity / 2,
            own_language: education,
        }
    }

    pub fn value(&self, skill: &str) -> u32 {
        match skill {
            DODGE => self.dodge,
            OWN_LANGUAGE => self.own_language,
            other => self.skills.default_value(other),
        }
    }
}

pub struct SkillAllocator {
    reference: Arc<ReferenceData>,
    random: Arc<dyn RandomPort>,
    max_skill_level: u32,
}

impl SkillAllocator {
    pub fn new(
        reference: Arc<ReferenceData>,
        random: Arc<dyn RandomPort>,
        max_skill_level: u32,
    ) -> Self {
        Self {
            reference,
            random,
            max_skill_level,
        }
    }

    /// Skills of a character with `occupation`.
    ///
    /// Explicit skills are returned as given. Otherwise points are allocated
    /// and skills left at their default are dropped; credit rating is always
    /// present.
    pub fn allocate_skills(
        &self,
        occupation: &OccupationRecord,
        occupation_points: u32,
        hobby_points: u32,
        dexterity: u32,
        education: u32,
        explicit: Option<SkillTable>,
    ) -> SkillTable {
        if let Some(skills) = explicit {
            return skills;
        }

        let defaults = SkillDefaults::new(self.reference.skills(), dexterity, education);
        let credit_rating = self.credit_rating_points(occupation, occupation_points);
        let remaining = occupation_points.saturating_sub(credit_rating);

        let occupation_skills = self.expand_template(occupation.skills());
        let hobby_skills = self.hobby_skills();
        tracing::debug!(
            occupation = occupation.name(),
            occupation_points,
            credit_rating,
            hobby_points,
            occupation_skills = occupation_skills.len(),
            hobby_skills = hobby_skills.len(),
            "Allocating skill points"
        );

        let mut table = SkillTable::new();
        self.distribute(&occupation_skills, remaining, &mut table, &defaults);
        self.distribute(&hobby_skills, hobby_points, &mut table, &defaults);

        drop_defaults(&mut table, &defaults);
        table.set_default(CREDIT_RATING, credit_rating);
        table
    }

    /// Credit rating drawn from the occupation's range, bounded by the
    /// occupation points.
    pub fn credit_rating_points(&self, occupation: &OccupationRecord, occupation_points: u32) -> u32 {
        let (min, max) = occupation.credit_rating().bounded_by(occupation_points);
        roll(self.random.as_ref(), min, max)
    }

    /// Concrete skill names for a template. Credit rating never appears; it
    /// is drawn separately.
    pub fn expand_template(&self, tokens: &[SkillToken]) -> Vec<String> {
        let mut skills = Vec::new();
        for token in tokens {
            self.expand_token(token, &mut skills);
        }
        skills.retain(|skill| skill != CREDIT_RATING);
        skills
    }

    /// Hobby points go to the basic skills.
    pub fn hobby_skills(&self) -> Vec<String> {
        self.reference.skills().basic_skills().to_vec()
    }

    fn expand_token(&self, token: &SkillToken, skills: &mut Vec<String>) {
        match token {
            SkillToken::Literal(name) => skills.push(name.clone()),
            SkillToken::CategoryPick { count, category } => {
                let population = self.reference.skills().skills_in(*category);
                if population.is_empty() {
                    tracing::warn!(category = %category, "No skills available in category");
                    return;
                }
                let last = last_index(population.len());
                for _ in 0..*count {
                    let index = roll(self.random.as_ref(), 0, last) as usize;
                    if let Some(skill) = population.get(index) {
                        skills.push(skill.clone());
                    }
                }
            }
            SkillToken::ChoiceOf { count, options } => {
                for index in self.random.sample_indices(options.len(), *count) {
                    if let Some(option) = options.get(index) {
                        self.expand_token(option, skills);
                    }
                }
            }
        }
    }

    /// Spend `points` over `skills`, accumulating into `table`. Returns the
    /// points actually spent, which falls short of `points` only when every
    /// listed skill reached the cap.
    pub fn distribute(
        &self,
        skills: &[String],
        points: u32,
        table: &mut SkillTable,
        defaults: &SkillDefaults<'_>,
    ) -> u32 {
        for skill in skills {
            table.set_default(skill.as_str(), defaults.value(skill));
        }

        let mut remaining = points;
        while remaining > 0 {
            let open: Vec<(&str, u32)> = skills
                .iter()
                .filter_map(|skill| {
                    let headroom = self
                        .max_skill_level
                        .saturating_sub(table.get(skill).unwrap_or(0));
                    (headroom > 0).then_some((skill.as_str(), headroom))
                })
                .collect();
            if open.is_empty() {
                tracing::warn!(
                    remaining,
                    skills = skills.len(),
                    "No skill has headroom left, points not spent"
                );
                break;
            }

            let pick = roll(self.random.as_ref(), 0, last_index(open.len())) as usize;
            let Some(&(skill, headroom)) = open.get(pick) else {
                break;
            };
            let amount = roll(self.random.as_ref(), 0, remaining.min(headroom));
            table.add(skill, amount);
            remaining -= amount;
        }
        points - remaining
    }
}

/// Keep skills that moved away from their default, and credit rating.
pub fn drop_defaults(table: &mut SkillTable, defaults: &SkillDefaults<'_>) {
    table.retain(|skill, points| skill == CREDIT_RATING || points != defaults.value(skill));
}

fn last_index(len: usize) -> u32 {
    u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX)
}
