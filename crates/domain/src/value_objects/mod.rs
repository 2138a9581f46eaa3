//! Value objects - Immutable objects defined by their attributes

mod age;
mod attributes;
mod combat;
mod names;
mod occupation;
mod sex;
mod skill_template;
mod skills;

pub use age::{AgeBounds, DEFAULT_MAX_AGE, DEFAULT_MIN_AGE};
pub use attributes::{non_negative, AttributeSet, Characteristic};
pub use combat::{Build, DamageBonus, BUILD_VALUES, DAMAGE_BONUS_VALUES};
pub use names::PersonName;
pub use occupation::{
    CreditRatingRange, OccupationCatalog, OccupationFilter, OccupationRecord, OccupationType,
    PointGroup, SkillPointGroups,
};
pub use sex::{Sex, ACCEPTED_SEX_VALUES};
pub use skill_template::{SkillCategory, SkillToken};
pub use skills::{SkillTable, CREDIT_RATING, DODGE, OWN_LANGUAGE};
