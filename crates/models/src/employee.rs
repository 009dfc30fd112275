use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A persisted employee record.
///
/// `id` is assigned by the store and never taken from client input.
/// `hire_date` serializes as `hireDate` in `YYYY-MM-DD` form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub title: String,
    pub department: String,
    pub location: String,
    pub salary: i64,
    pub hire_date: NaiveDate,
}

/// Client-suppliable fields: an employee without its id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    pub name: String,
    pub title: String,
    pub department: String,
    pub location: String,
    pub salary: i64,
    pub hire_date: NaiveDate,
}

impl Employee {
    /// Attach an id to a payload.
    pub fn from_payload(id: impl Into<String>, payload: CreateEmployeePayload) -> Self {
        Self {
            id: id.into(),
            name: payload.name,
            title: payload.title,
            department: payload.department,
            location: payload.location,
            salary: payload.salary,
            hire_date: payload.hire_date,
        }
    }

    /// Overwrite every client-suppliable field, keeping `id`.
    pub fn apply(&mut self, payload: CreateEmployeePayload) {
        self.name = payload.name;
        self.title = payload.title;
        self.department = payload.department;
        self.location = payload.location;
        self.salary = payload.salary;
        self.hire_date = payload.hire_date;
    }
}
