//! External service ports.

use cochar_domain::Sex;

use super::error::NameError;

/// Name database.
///
/// When the requested sex has no names for a country the provider picks a
/// substitute itself: the non-binary list if there is one, else a random list
/// that exists.
#[cfg_attr(test, mockall::automock)]
pub trait NamePort: Send + Sync {
    fn first_name(
        &self,
        year: i32,
        sex: Sex,
        country: &str,
        use_weights: bool,
    ) -> Result<String, NameError>;

    fn last_name(
        &self,
        year: i32,
        sex: Sex,
        country: &str,
        use_weights: bool,
    ) -> Result<String, NameError>;

    /// Country codes with name data, sorted.
    fn available_countries(&self) -> Vec<String>;
}
