//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores for small collections persisted as JSON.

pub mod json_list_store;
