//! Character generation errors.

use cochar_domain::DomainError;

use crate::infrastructure::ports::NameError;

/// Errors that can occur while generating a character.
///
/// Generation is all or nothing: the first failure aborts the whole request.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Name lookup failed: {0}")]
    Names(#[from] NameError),
}
