//! Use cases - User story orchestration.
//!
//! Use cases orchestrate the ports and reference data to fulfil a request.

pub mod character;

pub use character::CharacterUseCases;
