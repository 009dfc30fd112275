//! Domain records shared by the service and HTTP layers.

pub mod employee;

pub use employee::{CreateEmployeePayload, Employee};
