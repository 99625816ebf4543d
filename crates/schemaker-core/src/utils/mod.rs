//! Utility functions.
//!
//! - [`text`]: label helpers (capitalization, title-casing, key humanizing).

pub mod text;
