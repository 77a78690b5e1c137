//! Data models for the team member roster application.
//!
//! Wire names are camelCase to match what the single-page client expects.

mod member;

pub use member::*;
