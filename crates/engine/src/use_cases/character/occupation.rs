//! Occupation selection and point budgets.

use std::sync::Arc;

use cochar_domain::{AttributeSet, DomainError, OccupationFilter, SkillPointGroups};

use crate::infrastructure::ports::RandomPort;
use crate::infrastructure::reference_data::ReferenceData;

pub struct OccupationResolver {
    reference: Arc<ReferenceData>,
    random: Arc<dyn RandomPort>,
}

impl OccupationResolver {
    pub fn new(reference: Arc<ReferenceData>, random: Arc<dyn RandomPort>) -> Self {
        Self { reference, random }
    }

    /// Pick an occupation for a character with `attrs`.
    ///
    /// - `random_mode`: any occupation, every other input ignored
    /// - `explicit`: that occupation, which must exist
    /// - otherwise: among the occupations passing `filter`, those of the
    ///   point groups tied for the highest total
    ///
    /// # Errors
    ///
    /// `UnknownOccupation` for an explicit occupation missing from the
    /// catalog, `NoOccupationMeetsCriteria` when the filter leaves nothing.
    pub fn resolve_occupation(
        &self,
        attrs: &AttributeSet,
        random_mode: bool,
        explicit: Option<&str>,
        filter: &OccupationFilter,
    ) -> Result<String, DomainError> {
        let catalog = self.reference.occupations();

        if random_mode {
            let names = catalog.occupation_names();
            let chosen = self
                .pick(names.len())
                .and_then(|index| names.get(index))
                .ok_or_else(|| OccupationFilter::default().no_match_error())?;
            tracing::debug!(occupation = %chosen, "Occupation drawn at random");
            return Ok(chosen.to_string());
        }

        if let Some(name) = explicit {
            return Ok(catalog.require(name)?.name().to_string());
        }

        let points = SkillPointGroups::from_attributes(attrs);
        let groups = catalog.filtered_groups(filter);
        let Some(best) = groups.iter().map(|(group, _)| points.points(*group)).max() else {
            return Err(filter.no_match_error());
        };
        let tied: Vec<_> = groups
            .iter()
            .filter(|(group, _)| points.points(*group) == best)
            .collect();

        let (group, members) = self
            .pick(tied.len())
            .and_then(|index| tied.get(index).copied())
            .ok_or_else(|| filter.no_match_error())?;
        let occupation = self
            .pick(members.len())
            .and_then(|index| members.get(index))
            .ok_or_else(|| filter.no_match_error())?;

        tracing::debug!(
            occupation = occupation.name(),
            group = %group,
            points = best,
            tied_groups = tied.len(),
            "Occupation chosen"
        );
        Ok(occupation.name().to_string())
    }

    /// Occupation point budget: the override, else the best total among the
    /// groups of `occupation`.
    pub fn occupation_points(
        &self,
        attrs: &AttributeSet,
        occupation: &str,
        points_override: Option<u32>,
    ) -> Result<u32, DomainError> {
        if let Some(points) = points_override {
            return Ok(points);
        }
        let record = self.reference.occupations().require(occupation)?;
        Ok(SkillPointGroups::from_attributes(attrs).best_for(record))
    }

    /// Hobby point budget: the override, else twice intelligence.
    pub fn hobby_points(&self, attrs: &AttributeSet, points_override: Option<u32>) -> u32 {
        points_override.unwrap_or(attrs.intelligence * 2)
    }

    fn pick(&self, len: usize) -> Option<usize> {
        let last = i32::try_from(len.checked_sub(1)?).ok()?;
        usize::try_from(self.random.gen_range(0, last)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cochar_domain::{
        CreditRatingRange, OccupationCatalog, OccupationRecord, OccupationType, PointGroup,
        SkillToken,
    };

    use crate::infrastructure::random::{FixedRandom, SeededRandom};

    fn attrs(education: u32, power: u32, dexterity: u32, appearance: u32, strength: u32) -> AttributeSet {
        AttributeSet {
            education,
            power,
            dexterity,
            appearance,
            strength,
            intelligence: 60,
            ..AttributeSet::default()
        }
    }

    fn record(name: &str, groups: Vec<PointGroup>) -> OccupationRecord {
        OccupationRecord::new(
            name,
            CreditRatingRange::new(10, 20).expect("range"),
            vec![SkillToken::Literal("listen".to_string())],
            groups,
            "modern",
            OccupationType::Custom,
            vec![],
        )
        .expect("record")
    }

    fn resolver_with(
        catalog: OccupationCatalog,
        random: impl RandomPort + 'static,
    ) -> OccupationResolver {
        let reference = ReferenceData::load().expect("reference data");
        OccupationResolver::new(Arc::new(reference.with_occupations(catalog)), Arc::new(random))
    }

    fn resolver(random: impl RandomPort + 'static) -> OccupationResolver {
        OccupationResolver::new(
            Arc::new(ReferenceData::load().expect("reference data")),
            Arc::new(random),
        )
    }

    #[test]
    fn test_explicit_occupation_is_returned() {
        let occupations = resolver(SeededRandom::new(1));
        let result = occupations.resolve_occupation(
            &attrs(50, 50, 50, 50, 50),
            false,
            Some("hacker"),
            &OccupationFilter::new().with_era("classic-1920"),
        );
        assert_eq!(result, Ok("hacker".to_string()));
    }

    #[test]
    fn test_unknown_explicit_occupation() {
        let occupations = resolver(SeededRandom::new(1));
        let result =
            occupations.resolve_occupation(&attrs(50, 50, 50, 50, 50), false, Some("wizard"), &OccupationFilter::new());
        assert_eq!(result, Err(DomainError::UnknownOccupation("wizard".to_string())));
    }

    #[test]
    fn test_random_mode_draws_from_the_whole_catalog() {
        let occupations = resolver(SeededRandom::new(8));
        let reference = ReferenceData::load().expect("reference data");
        let contradictory = OccupationFilter::new().with_era("modern").with_tag("lovecraftian");
        for _ in 0..50 {
            let name = occupations
                .resolve_occupation(&attrs(50, 50, 50, 50, 50), true, Some("wizard"), &contradictory)
                .expect("random mode ignores other inputs");
            assert!(reference.occupations().contains(&name));
        }
    }

    #[test]
    fn test_contradictory_filters() {
        let occupations = resolver(SeededRandom::new(1));
        let filter = OccupationFilter::new().with_era("modern").with_tag("lovecraftian");
        let result = occupations.resolve_occupation(&attrs(50, 50, 50, 50, 50), false, None, &filter);
        assert_eq!(
            result,
            Err(DomainError::NoOccupationMeetsCriteria {
                occup_type: None,
                era: vec!["modern".to_string()],
                tags: vec!["lovecraftian".to_string()],
            })
        );
    }

    #[test]
    fn test_highest_group_wins() {
        let catalog = OccupationCatalog::new([
            record("scholar", vec![PointGroup::Edu]),
            record("brute", vec![PointGroup::EduStr]),
            record("charmer", vec![PointGroup::EduApp]),
        ])
        .expect("catalog");
        let occupations = resolver_with(catalog, SeededRandom::new(3));
        // EDU*2 + STR*2 = 260 beats EDU*4 = 200
        for _ in 0..20 {
            let name = occupations
                .resolve_occupation(&attrs(50, 20, 20, 20, 80), false, None, &OccupationFilter::new())
                .expect("occupation");
            assert_eq!(name, "brute");
        }
    }

    #[test]
    fn test_ties_pick_any_tied_group() {
        let catalog = OccupationCatalog::new([
            record("scholar", vec![PointGroup::Edu]),
            record("brute", vec![PointGroup::EduStr]),
            record("dancer", vec![PointGroup::EduDex]),
        ])
        .expect("catalog");
        let occupations = resolver_with(catalog, SeededRandom::new(4));
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..100 {
            let name = occupations
                .resolve_occupation(&attrs(50, 20, 80, 20, 80), false, None, &OccupationFilter::new())
                .expect("occupation");
            seen.insert(name);
        }
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec!["brute", "dancer"]);
    }

    #[test]
    fn test_filter_narrows_before_ranking() {
        let occupations = resolver(FixedRandom(0));
        let filter = OccupationFilter::new().with_type("custom");
        let name = occupations
            .resolve_occupation(&attrs(40, 90, 90, 90, 90), false, None, &filter)
            .expect("occupation");
        assert_eq!(name, "software tester");
    }

    #[test]
    fn test_occupation_points_use_the_occupation_groups() {
        let occupations = resolver(FixedRandom(0));
        let attrs = attrs(50, 80, 30, 40, 70);
        // farmer: EDU*2 + DEX*2 = 160, EDU*2 + STR*2 = 240
        assert_eq!(occupations.occupation_points(&attrs, "farmer", None), Ok(240));
        // librarian: EDU*4 = 200, even though EDU*2 + POW*2 = 260 is higher
        assert_eq!(occupations.occupation_points(&attrs, "librarian", None), Ok(200));
        assert_eq!(occupations.occupation_points(&attrs, "farmer", Some(12)), Ok(12));
        assert!(occupations.occupation_points(&attrs, "wizard", None).is_err());
    }

    #[test]
    fn test_hobby_points() {
        let occupations = resolver(FixedRandom(0));
        let attrs = attrs(50, 50, 50, 50, 50);
        assert_eq!(occupations.hobby_points(&attrs, None), 120);
        assert_eq!(occupations.hobby_points(&attrs, Some(7)), 7);
    }
}
