//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Name lookups (could swap the embedded database for a service)
//! - Random draws (for testing and reproducible runs)

mod error;
mod external;
mod testing;

// =============================================================================
// Errors
// =============================================================================
pub use error::NameError;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::NamePort;

#[cfg(test)]
pub use external::MockNamePort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::RandomPort;

#[cfg(test)]
pub use testing::MockRandomPort;
