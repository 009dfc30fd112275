//! Service layer for the employee directory.
//! - `validation` turns untrusted request maps into trusted payloads.
//! - `file` persists the employee collection as a JSON file.
//! - `repository` is the seam the HTTP layer depends on.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod file;
pub mod repository;
pub mod validation;
