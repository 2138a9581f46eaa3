//! End to end generation tests.
//!
//! These tests validate the full pipeline using:
//! - The embedded reference data and name database
//! - A seeded random source
//! - Complete App construction with all use cases
//!
//! # Running
//!
//! ```bash
//! cargo test -p cochar-engine --lib e2e_tests
//! ```
