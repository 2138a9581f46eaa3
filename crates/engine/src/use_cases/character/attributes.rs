//! Characteristic rolls and age modifiers.

use std::sync::Arc;

use cochar_domain::{
    improvement_test_passes, subtract_with_floor, AgeModifiers, AttributeSet, Coc7eSystem,
};

use super::roll;
use crate::infrastructure::ports::RandomPort;

/// Range of strength, condition, dexterity, appearance, power and luck.
const LOW_RANGE: (u32, u32) = (15, 90);
/// Range of size, education and intelligence.
const HIGH_RANGE: (u32, u32) = (40, 90);
/// Characters up to this age roll luck twice and keep the better roll.
const YOUNG_AGE: u32 = 19;

pub struct AttributeGenerator {
    random: Arc<dyn RandomPort>,
}

impl AttributeGenerator {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    /// Roll the characteristics of a character of `age` and apply the age
    /// bracket modifiers.
    pub fn generate_attributes(&self, age: u32) -> AttributeSet {
        let mut attrs = AttributeSet {
            strength: self.roll(LOW_RANGE),
            condition: self.roll(LOW_RANGE),
            size: self.roll(HIGH_RANGE),
            dexterity: self.roll(LOW_RANGE),
            appearance: self.roll(LOW_RANGE),
            education: self.roll(HIGH_RANGE),
            intelligence: self.roll(HIGH_RANGE),
            power: self.roll(LOW_RANGE),
            luck: self.roll(LOW_RANGE),
            move_rate: 0,
        };
        if age <= YOUNG_AGE {
            attrs.luck = attrs.luck.max(self.roll(LOW_RANGE));
        }

        let modifiers = AgeModifiers::for_age(age);
        attrs.appearance = subtract_with_floor(attrs.appearance, modifiers.appearance);
        self.deduct_physical_points(&mut attrs, modifiers.characteristic_points);
        attrs.education = self.improve(attrs.education, modifiers.education_tests);
        attrs.move_rate =
            Coc7eSystem::calculate_move_rate(attrs.strength, attrs.dexterity, attrs.size)
                .saturating_sub(modifiers.move_rate);

        tracing::debug!(age, ?modifiers, ?attrs, "Attributes rolled");
        attrs
    }

    /// Take `points` one at a time from strength, condition or dexterity,
    /// never below 1.
    fn deduct_physical_points(&self, attrs: &mut AttributeSet, points: u32) {
        for _ in 0..points {
            let mut candidates: Vec<&mut u32> = [
                &mut attrs.strength,
                &mut attrs.condition,
                &mut attrs.dexterity,
            ]
            .into_iter()
            .filter(|value| **value > 1)
            .collect();
            if candidates.is_empty() {
                break;
            }
            let last = u32::try_from(candidates.len() - 1).unwrap_or(0);
            let pick = roll(self.random.as_ref(), 0, last) as usize;
            if let Some(value) = candidates.get_mut(pick) {
                **value -= 1;
            }
        }
    }

    /// Repeat the improvement check `tests` times.
    fn improve(&self, mut value: u32, tests: u32) -> u32 {
        for _ in 0..tests {
            let check = roll(self.random.as_ref(), 1, 100);
            if improvement_test_passes(value, check) {
                value += roll(self.random.as_ref(), 1, 10);
            }
        }
        value
    }

    fn roll(&self, (min, max): (u32, u32)) -> u32 {
        roll(self.random.as_ref(), min, max)
    }
}
