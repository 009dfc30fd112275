//! File-backed implementations of service stores.

pub mod employee_store;
