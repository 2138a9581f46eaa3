//! Character sex value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Values accepted from callers. An absent value is accepted as well.
pub const ACCEPTED_SEX_VALUES: [&str; 5] = ["M", "m", "F", "f", "None"];

/// Sex of a character.
///
/// `NonBinary` is what an unspecified sex resolves to. It serialises as
/// `null` and is passed to the name provider as `N`, so the provider can fall
/// back to whatever name lists it has for the country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub enum Sex {
    Male,
    Female,
    #[default]
    NonBinary,
}

impl Sex {
    /// Short code used by the name database and population pyramid ("M", "F", "N").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::NonBinary => "N",
        }
    }

    /// Parse an optional caller supplied value. `None` means unspecified.
    pub fn from_optional(value: Option<&str>) -> Result<Self, DomainError> {
        match value {
            None => Ok(Self::NonBinary),
            Some(value) => value.parse(),
        }
    }

    pub fn is_binary(&self) -> bool {
        !matches!(self, Self::NonBinary)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonBinary => write!(f, "None"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for Sex {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" | "m" => Ok(Self::Male),
            "F" | "f" => Ok(Self::Female),
            _ => Err(DomainError::InvalidSex {
                value: s.to_string(),
                accepted: ACCEPTED_SEX_VALUES.to_vec(),
            }),
        }
    }
}

impl TryFrom<Option<String>> for Sex {
    type Error = DomainError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        Self::from_optional(value.as_deref())
    }
}

impl From<Sex> for Option<String> {
    fn from(sex: Sex) -> Self {
        sex.is_binary().then(|| sex.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_cases() {
        assert_eq!("M".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!("m".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!("F".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!("f".parse::<Sex>(), Ok(Sex::Female));
    }

    #[test]
    fn test_missing_sex_is_non_binary() {
        assert_eq!(Sex::from_optional(None), Ok(Sex::NonBinary));
        assert_eq!(Sex::NonBinary.as_str(), "N");
    }

    #[test]
    fn test_unknown_sex_rejected() {
        let err = "N".parse::<Sex>().expect_err("N is not a caller value");
        match err {
            DomainError::InvalidSex { value, accepted } => {
                assert_eq!(value, "N");
                assert!(accepted.contains(&"None"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_serde_uses_null_for_unspecified() {
        assert_eq!(serde_json::to_string(&Sex::Female).expect("json"), "\"F\"");
        assert_eq!(serde_json::to_string(&Sex::NonBinary).expect("json"), "null");
        let parsed: Sex = serde_json::from_str("null").expect("json");
        assert_eq!(parsed, Sex::NonBinary);
    }
}
