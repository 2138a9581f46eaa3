//! Generator settings loaded from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `COCHAR_MIN_AGE` | 15 |
//! | `COCHAR_MAX_AGE` | 90 |
//! | `COCHAR_MAX_SKILL_LEVEL` | 90 |
//! | `COCHAR_USE_NAME_WEIGHTS` | true |
//! | `COCHAR_SKILL_ERAS` | classic-1920,modern |
//! | `COCHAR_SEED` | unset |
//! | `COCHAR_DEFAULT_YEAR` | 1925 |
//! | `COCHAR_DEFAULT_COUNTRY` | US |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use cochar_domain::{AgeBounds, DEFAULT_MAX_AGE, DEFAULT_MIN_AGE};

pub const DEFAULT_MAX_SKILL_LEVEL: u32 = 90;
pub const DEFAULT_YEAR: i32 = 1925;
pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_SKILL_ERAS: [&str; 2] = ["classic-1920", "modern"];

/// Invalid generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("min_age ({min}) cannot exceed max_age ({max})")]
    InvertedAgeBounds { min: u32, max: u32 },

    #[error("max_skill_level must be greater than 0")]
    ZeroSkillLevel,

    #[error("At least one skill era is required")]
    NoSkillEras,
}

/// Knobs of the character generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    pub min_age: u32,
    pub max_age: u32,
    /// Cap for points allocated into a single skill
    pub max_skill_level: u32,
    /// Weight names by popularity
    pub use_name_weights: bool,
    /// A skill is available when its era list covers all of these
    pub skill_eras: Vec<String>,
    /// Seed for reproducible generation
    pub seed: Option<u64>,
    pub default_year: i32,
    pub default_country: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            max_skill_level: DEFAULT_MAX_SKILL_LEVEL,
            use_name_weights: true,
            skill_eras: DEFAULT_SKILL_ERAS.iter().map(|e| e.to_string()).collect(),
            seed: None,
            default_year: DEFAULT_YEAR,
            default_country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl GeneratorSettings {
    /// Load settings from `COCHAR_*` environment variables.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`, falling back to defaults for missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let settings = Self {
            min_age: parse_or(&lookup, "COCHAR_MIN_AGE", defaults.min_age)?,
            max_age: parse_or(&lookup, "COCHAR_MAX_AGE", defaults.max_age)?,
            max_skill_level: parse_or(
                &lookup,
                "COCHAR_MAX_SKILL_LEVEL",
                defaults.max_skill_level,
            )?,
            use_name_weights: parse_bool_or(
                &lookup,
                "COCHAR_USE_NAME_WEIGHTS",
                defaults.use_name_weights,
            )?,
            skill_eras: lookup("COCHAR_SKILL_ERAS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or(defaults.skill_eras),
            seed: match non_empty(&lookup, "COCHAR_SEED") {
                Some(raw) => Some(parse_value("COCHAR_SEED", &raw)?),
                None => None,
            },
            default_year: parse_or(&lookup, "COCHAR_DEFAULT_YEAR", defaults.default_year)?,
            default_country: non_empty(&lookup, "COCHAR_DEFAULT_COUNTRY")
                .unwrap_or(defaults.default_country),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_age > self.max_age {
            return Err(SettingsError::InvertedAgeBounds {
                min: self.min_age,
                max: self.max_age,
            });
        }
        if self.max_skill_level == 0 {
            return Err(SettingsError::ZeroSkillLevel);
        }
        if self.skill_eras.is_empty() {
            return Err(SettingsError::NoSkillEras);
        }
        Ok(())
    }

    pub fn age_bounds(&self) -> Result<AgeBounds, SettingsError> {
        AgeBounds::new(self.min_age, self.max_age).map_err(|_| SettingsError::InvertedAgeBounds {
            min: self.min_age,
            max: self.max_age,
        })
    }

    pub fn with_age_bounds(mut self, min_age: u32, max_age: u32) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    pub fn with_max_skill_level(mut self, max_skill_level: u32) -> Self {
        self.max_skill_level = max_skill_level;
        self
    }

    pub fn with_name_weights(mut self, use_name_weights: bool) -> Self {
        self.use_name_weights = use_name_weights;
        self
    }

    pub fn with_skill_eras(mut self, eras: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.skill_eras = eras.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, SettingsError> {
    raw.parse().map_err(|_| SettingsError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, SettingsError> {
    match non_empty(lookup, key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_bool_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, SettingsError> {
    match non_empty(lookup, key).map(|raw| raw.to_ascii_lowercase()) {
        None => Ok(default),
        Some(raw) => match raw.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(SettingsError::InvalidValue { key, value: raw }),
        },
    }
}
