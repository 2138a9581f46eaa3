//! Character generation request.

use serde_json::{Map, Value};

use cochar_domain::{non_negative, DomainError, OccupationFilter, Sex, SkillTable};

use crate::infrastructure::settings::{DEFAULT_COUNTRY, DEFAULT_YEAR};

/// Inputs of one character generation. Everything except year and country
/// is optional; missing values are generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRequest {
    pub year: i32,
    pub country: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Checked against the configured age bounds
    pub age: Option<i64>,
    pub sex: Sex,
    /// Pick the occupation uniformly from the whole catalog
    pub random_mode: bool,
    pub occupation: Option<String>,
    pub filter: OccupationFilter,
    /// Use these skills instead of allocating points
    pub skills: Option<SkillTable>,
    pub occupation_points: Option<u32>,
    pub hobby_points: Option<u32>,
}

impl CharacterRequest {
    pub fn new(year: i32, country: impl Into<String>) -> Self {
        Self {
            year,
            country: country.into(),
            first_name: None,
            last_name: None,
            age: None,
            sex: Sex::NonBinary,
            random_mode: false,
            occupation: None,
            filter: OccupationFilter::default(),
            skills: None,
            occupation_points: None,
            hobby_points: None,
        }
    }

    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    pub fn with_random_mode(mut self, random_mode: bool) -> Self {
        self.random_mode = random_mode;
        self
    }

    pub fn with_occupation(mut self, occupation: impl Into<String>) -> Self {
        self.occupation = Some(occupation.into());
        self
    }

    pub fn with_filter(mut self, filter: OccupationFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_skills(mut self, skills: SkillTable) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn with_occupation_points(mut self, points: u32) -> Self {
        self.occupation_points = Some(points);
        self
    }

    pub fn with_hobby_points(mut self, points: u32) -> Self {
        self.hobby_points = Some(points);
        self
    }

    /// Parse a loosely typed JSON request.
    ///
    /// Missing `year` and `country` default to 1925 and `US`. `null` or
    /// `false` mean "not given" for every optional field.
    ///
    /// # Errors
    ///
    /// - `InvalidYear` when `year` is not an integer
    /// - `InvalidAge` when `age` is not an integer
    /// - `InvalidSex` when `sex` is not one of M, m, F, f, None
    /// - `SkillsNotAMapping`, `InvalidSkillValue`, `SkillBelowZero` for bad skills
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        let Value::Object(fields) = value else {
            return Err(DomainError::validation(format!(
                "Character request must be a JSON object, got {value}"
            )));
        };

        let year = match given(fields, "year") {
            None => DEFAULT_YEAR,
            Some(year) => year
                .as_i64()
                .and_then(|year| i32::try_from(year).ok())
                .ok_or_else(|| DomainError::InvalidYear(year.to_string()))?,
        };
        let country = match given(fields, "country") {
            None => DEFAULT_COUNTRY.to_string(),
            Some(country) => string_field("country", country)?,
        };

        let mut request = Self::new(year, country);
        request.first_name = given(fields, "first_name")
            .map(|name| string_field("first_name", name))
            .transpose()?;
        request.last_name = given(fields, "last_name")
            .map(|name| string_field("last_name", name))
            .transpose()?;
        request.age = given(fields, "age")
            .map(|age| age.as_i64().ok_or_else(|| DomainError::InvalidAge(age.to_string())))
            .transpose()?;
        request.sex = parse_sex(given(fields, "sex"))?;
        request.random_mode = given(fields, "random_mode")
            .map(|mode| {
                mode.as_bool().ok_or_else(|| {
                    DomainError::validation(format!("random_mode must be a boolean, got {mode}"))
                })
            })
            .transpose()?
            .unwrap_or(false);
        request.occupation = given(fields, "occupation")
            .map(|occupation| string_field("occupation", occupation))
            .transpose()?;
        request.filter = OccupationFilter {
            occup_type: given(fields, "occup_type")
                .map(|t| string_field("occup_type", t))
                .transpose()?,
            era: string_list("era", given(fields, "era"))?,
            tags: string_list("tags", given(fields, "tags"))?,
        };
        request.skills = match given(fields, "skills") {
            // An empty mapping means "generate"
            Some(Value::Object(map)) if map.is_empty() => None,
            Some(skills) => Some(SkillTable::from_json(skills)?),
            None => None,
        };
        request.occupation_points = points_field(fields, "occupation_points")?;
        request.hobby_points = points_field(fields, "hobby_points")?;
        Ok(request)
    }
}

/// Field value unless it is missing, `null` or `false`.
fn given<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields
        .get(key)
        .filter(|value| !matches!(value, Value::Null | Value::Bool(false)))
}

fn string_field(key: &str, value: &Value) -> Result<String, DomainError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DomainError::validation(format!("{key} must be a string, got {value}")))
}

/// A single string or a list of strings.
fn string_list(key: &str, value: Option<&Value>) -> Result<Vec<String>, DomainError> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(|item| string_field(key, item)).collect(),
        Some(other) => Ok(vec![string_field(key, other)?]),
    }
}

fn points_field(fields: &Map<String, Value>, key: &str) -> Result<Option<u32>, DomainError> {
    given(fields, key)
        .map(|points| match points.as_i64() {
            Some(points) => non_negative(key, points),
            None => Err(DomainError::InvalidCharacteristicValue {
                name: key.to_string(),
                value: points.to_string(),
            }),
        })
        .transpose()
}

fn parse_sex(value: Option<&Value>) -> Result<Sex, DomainError> {
    match value {
        None => Ok(Sex::NonBinary),
        Some(Value::String(sex)) if sex == "None" => Ok(Sex::NonBinary),
        Some(Value::String(sex)) => sex.parse(),
        Some(other) => other.to_string().parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_for_empty_object() {
        let request = CharacterRequest::from_json(&json!({})).expect("valid request");
        assert_eq!(request, CharacterRequest::new(1925, "US"));
    }

    #[test]
    fn test_full_request() {
        let request = CharacterRequest::from_json(&json!({
            "year": 1890,
            "country": "GB",
            "first_name": "Arthur",
            "last_name": false,
            "age": 44,
            "sex": "m",
            "random_mode": false,
            "occupation": null,
            "occup_type": "classic",
            "era": "classic-1920",
            "tags": ["lovecraftian"],
            "skills": {},
            "occupation_points": 300,
            "hobby_points": 120
        }))
        .expect("valid request");

        assert_eq!(request.year, 1890);
        assert_eq!(request.country, "GB");
        assert_eq!(request.first_name.as_deref(), Some("Arthur"));
        assert_eq!(request.last_name, None);
        assert_eq!(request.age, Some(44));
        assert_eq!(request.sex, Sex::Male);
        assert_eq!(request.occupation, None);
        assert_eq!(
            request.filter,
            OccupationFilter::new()
                .with_type("classic")
                .with_era("classic-1920")
                .with_tag("lovecraftian")
        );
        assert_eq!(request.skills, None);
        assert_eq!(request.occupation_points, Some(300));
        assert_eq!(request.hobby_points, Some(120));
    }

    #[test]
    fn test_non_integer_year() {
        assert_eq!(
            CharacterRequest::from_json(&json!({"year": "1925"})),
            Err(DomainError::InvalidYear("\"1925\"".to_string()))
        );
        assert!(matches!(
            CharacterRequest::from_json(&json!({"year": 19.25})),
            Err(DomainError::InvalidYear(_))
        ));
    }

    #[test]
    fn test_non_integer_age() {
        assert!(matches!(
            CharacterRequest::from_json(&json!({"age": "old"})),
            Err(DomainError::InvalidAge(_))
        ));
    }

    #[test]
    fn test_sex_values() {
        let sex = |value: Value| CharacterRequest::from_json(&json!({ "sex": value })).map(|r| r.sex);
        assert_eq!(sex(json!("F")), Ok(Sex::Female));
        assert_eq!(sex(json!("None")), Ok(Sex::NonBinary));
        assert_eq!(sex(Value::Null), Ok(Sex::NonBinary));
        assert!(matches!(sex(json!("X")), Err(DomainError::InvalidSex { .. })));
        assert!(matches!(sex(json!(1)), Err(DomainError::InvalidSex { .. })));
    }

    #[test]
    fn test_skills_are_validated() {
        assert!(matches!(
            CharacterRequest::from_json(&json!({"skills": ["listen"]})),
            Err(DomainError::SkillsNotAMapping(_))
        ));
        assert!(matches!(
            CharacterRequest::from_json(&json!({"skills": {"listen": "a lot"}})),
            Err(DomainError::InvalidSkillValue { ref skill, .. }) if skill == "listen"
        ));
        assert!(matches!(
            CharacterRequest::from_json(&json!({"skills": {"listen": -5}})),
            Err(DomainError::SkillBelowZero { ref skill, value: -5 }) if skill == "listen"
        ));

        let request = CharacterRequest::from_json(&json!({"skills": {"listen": 55}}))
            .expect("valid skills");
        assert_eq!(request.skills.and_then(|s| s.get("listen")), Some(55));
    }

    #[test]
    fn test_negative_point_override() {
        assert!(matches!(
            CharacterRequest::from_json(&json!({"hobby_points": -1})),
            Err(DomainError::CharacteristicBelowMinimum { .. })
        ));
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(
            CharacterRequest::from_json(&json!([1925, "US"])),
            Err(DomainError::Validation(_))
        ));
    }
}
