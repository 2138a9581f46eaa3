//! Character generation use cases.
//!
//! Control flow of one generation:
//!
//! 1. [`AgeResolver`] draws the age, the name port supplies missing names
//! 2. [`AttributeGenerator`] rolls characteristics for that age
//! 3. [`OccupationResolver`] picks an occupation and the point budgets
//! 4. [`SkillAllocator`] expands the occupation template and spends points
//! 5. [`CreateCharacter`] assembles and validates the [`Character`](cochar_domain::Character)

mod age;
mod attributes;
mod create;
mod error;
mod occupation;
mod request;
mod skills;

pub use age::AgeResolver;
pub use attributes::AttributeGenerator;
pub use create::CreateCharacter;
pub use error::CharacterError;
pub use occupation::OccupationResolver;
pub use request::CharacterRequest;
pub use skills::{drop_defaults, SkillAllocator, SkillDefaults};

use std::sync::Arc;

use crate::infrastructure::ports::RandomPort;

/// Container for character use cases.
pub struct CharacterUseCases {
    pub create: Arc<CreateCharacter>,
    pub ages: Arc<AgeResolver>,
    pub attributes: Arc<AttributeGenerator>,
    pub occupations: Arc<OccupationResolver>,
    pub skills: Arc<SkillAllocator>,
}

impl CharacterUseCases {
    pub fn new(
        create: Arc<CreateCharacter>,
        ages: Arc<AgeResolver>,
        attributes: Arc<AttributeGenerator>,
        occupations: Arc<OccupationResolver>,
        skills: Arc<SkillAllocator>,
    ) -> Self {
        Self {
            create,
            ages,
            attributes,
            occupations,
            skills,
        }
    }
}

/// Uniform draw from `[min, max]`.
fn roll(random: &dyn RandomPort, min: u32, max: u32) -> u32 {
    let low = i32::try_from(min).unwrap_or(i32::MAX);
    let high = i32::try_from(max).unwrap_or(i32::MAX);
    u32::try_from(random.gen_range(low, high)).unwrap_or(min)
}
