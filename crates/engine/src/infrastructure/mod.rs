//! Infrastructure implementations.
//!
//! Contains port trait implementations, embedded reference data and settings.

pub mod names;
pub mod ports;
pub mod random;
pub mod reference_data;
pub mod settings;
