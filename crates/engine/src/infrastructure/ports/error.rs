//! Error types for port operations.

/// Name provider errors with enough context to act on.
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    /// Country has no name data at all.
    #[error("No name data for country {country}, available: {available:?}")]
    UnknownCountry {
        country: String,
        available: Vec<String>,
    },

    /// Country exists but has no usable list of the requested kind.
    #[error("No {kind} available for country {country}")]
    NoNames {
        kind: &'static str,
        country: String,
    },

    /// The embedded name database could not be parsed.
    #[error("Invalid name database: {0}")]
    Database(#[from] serde_json::Error),
}

impl NameError {
    pub fn no_names(kind: &'static str, country: impl Into<String>) -> Self {
        Self::NoNames {
            kind,
            country: country.into(),
        }
    }
}
