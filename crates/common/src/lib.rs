//! Cross-cutting helpers shared by the employee directory crates.

pub mod types;
pub mod utils;
pub mod env;
