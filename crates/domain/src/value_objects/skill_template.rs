//! Occupation skill templates.
//!
//! Occupation records list their skills as a small template language:
//!
//! - `"library use"` - a literal skill name
//! - `"2a"` - draw two skills from the art/craft category
//! - `"language"` - a bare category name, draw one skill from it
//! - `[1, "occult", "natural world"]` - pick one distinct option
//!
//! Templates are parsed once when reference data is loaded.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::DomainError;

// ============================================================================
// SkillCategory
// ============================================================================

/// Skill families a template may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillCategory {
    ArtCraft,
    Science,
    Fighting,
    Firearms,
    Interpersonal,
    Language,
    Survival,
    Special,
    /// Any basic skill (`*`)
    Basic,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 9] = [
        Self::ArtCraft,
        Self::Science,
        Self::Fighting,
        Self::Firearms,
        Self::Interpersonal,
        Self::Language,
        Self::Survival,
        Self::Special,
        Self::Basic,
    ];

    /// Category name as used in the skills reference data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArtCraft => "art/craft",
            Self::Science => "science",
            Self::Fighting => "fighting",
            Self::Firearms => "firearms",
            Self::Interpersonal => "interpersonal",
            Self::Language => "language",
            Self::Survival => "survival",
            Self::Special => "special",
            Self::Basic => "basic",
        }
    }

    /// One-character template code.
    pub fn code(&self) -> char {
        match self {
            Self::ArtCraft => 'a',
            Self::Science => 's',
            Self::Fighting => 'f',
            Self::Firearms => 'g',
            Self::Interpersonal => 'i',
            Self::Language => 'l',
            Self::Survival => 'v',
            Self::Special => 'p',
            Self::Basic => '*',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SkillToken
// ============================================================================

/// One parsed entry of an occupation skill template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillToken {
    /// A skill name taken as is
    Literal(String),
    /// Draw `count` distinct options, expanding any category options
    ChoiceOf {
        count: usize,
        options: Vec<SkillToken>,
    },
    /// Draw `count` skills from a category, with replacement
    CategoryPick { count: usize, category: SkillCategory },
}

impl SkillToken {
    /// Parse a template entry from reference data.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSkillTemplate` for empty strings, two
    /// character strings that are not category codes, nested choices, and
    /// choices asking for more options than they list.
    pub fn parse(value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::String(text) => Self::parse_str(text),
            Value::Array(items) => Self::parse_choice(items),
            other => Err(DomainError::skill_template(format!(
                "expected a string or a list, got {other}"
            ))),
        }
    }

    /// Parse a string token: literal, bare category or `<k><code>`.
    pub fn parse_str(text: &str) -> Result<Self, DomainError> {
        if let Some(category) = SkillCategory::from_name(text) {
            return Ok(Self::CategoryPick { count: 1, category });
        }

        let chars: Vec<char> = text.chars().collect();
        match chars.as_slice() {
            [] => Err(DomainError::skill_template("empty skill name")),
            [count, code] => {
                let count = count
                    .to_digit(10)
                    .filter(|count| *count > 0)
                    .ok_or_else(|| DomainError::skill_template(text))?;
                let category =
                    SkillCategory::from_code(*code).ok_or_else(|| DomainError::skill_template(text))?;
                Ok(Self::CategoryPick {
                    count: count as usize,
                    category,
                })
            }
            [_] => Err(DomainError::skill_template(text)),
            _ => Ok(Self::Literal(text.to_string())),
        }
    }

    fn parse_choice(items: &[Value]) -> Result<Self, DomainError> {
        let Some((count, options)) = items.split_first() else {
            return Err(DomainError::skill_template("empty choice list"));
        };
        let count = count
            .as_u64()
            .and_then(|c| usize::try_from(c).ok())
            .filter(|c| *c > 0)
            .ok_or_else(|| {
                DomainError::skill_template(format!("choice count must be a positive integer, got {count}"))
            })?;

        let options = options
            .iter()
            .map(|option| match option {
                Value::String(text) => Self::parse_str(text),
                other => Err(DomainError::skill_template(format!(
                    "choice options must be strings, got {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if count > options.len() {
            return Err(DomainError::skill_template(format!(
                "choice asks for {count} of {} options",
                options.len()
            )));
        }

        Ok(Self::ChoiceOf { count, options })
    }

    /// Serialise back to the reference data shape.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Literal(name) => Value::String(name.clone()),
            Self::CategoryPick { count, category } => {
                Value::String(format!("{count}{}", category.code()))
            }
            Self::ChoiceOf { count, options } => {
                let mut items = vec![Value::from(*count)];
                items.extend(options.iter().map(Self::to_value));
                Value::Array(items)
            }
        }
    }
}

impl Serialize for SkillToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SkillToken {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
