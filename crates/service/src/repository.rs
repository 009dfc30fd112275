use async_trait::async_trait;
use models::{CreateEmployeePayload, Employee};

use crate::errors::ServiceError;

/// Trait abstraction for employee persistence (CRUD over the whole collection).
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Employee>, ServiceError>;
    async fn create(&self, payload: CreateEmployeePayload) -> Result<Employee, ServiceError>;
    async fn update(&self, id: &str, payload: CreateEmployeePayload) -> Result<Employee, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
