//! Aggregate roots - domain objects that own their related data
//!
//! | Pattern | Rustic Equivalent |
//! |---------|-------------------|
//! | Private fields + getters | Newtypes valid by construction |
//! | Property validators | Explicit setters returning `Result` |
//! | Factory pattern | `::new()` taking pre-validated parts |

pub mod character;

pub use character::{Character, CharacterParts};
