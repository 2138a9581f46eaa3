//! Cochar Engine library.
//!
//! Generates Call of Cthulhu 7e characters from a handful of inputs.
//!
//! ## Structure
//!
//! - `use_cases/` - The generation pipeline
//! - `infrastructure/` - Ports, their implementations, reference data and settings
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

/// End to end generation tests.
#[cfg(test)]
mod e2e_tests;

pub use app::{App, StartupError};
pub use infrastructure::settings::GeneratorSettings;
pub use use_cases::character::{CharacterError, CharacterRequest};
