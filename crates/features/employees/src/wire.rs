//! Request and response shapes of the upstream registry.

use crate::model::{CreateEmployee, Employee};
use serde::{Deserialize, Serialize};

/// An employee as the registry stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEmployee {
    pub id: String,
    pub employee_name: String,
    pub employee_salary: u32,
    pub employee_age: u32,
    #[serde(default)]
    pub employee_title: String,
    #[serde(default)]
    pub employee_email: Option<String>,
}

impl From<RegistryEmployee> for Employee {
    fn from(record: RegistryEmployee) -> Self {
        Self {
            id: record.id,
            name: record.employee_name,
            salary: record.employee_salary,
            age: record.employee_age,
            title: record.employee_title,
            email: record.employee_email,
        }
    }
}

/// Create body sent to the registry. Carries no id and no email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateInput {
    pub name: String,
    pub salary: u32,
    pub age: u32,
    pub title: String,
}

impl From<&CreateEmployee> for CreateInput {
    fn from(employee: &CreateEmployee) -> Self {
        Self {
            name: employee.name.clone(),
            salary: employee.salary,
            age: employee.age,
            title: employee.title.clone(),
        }
    }
}

/// Delete body sent to the registry.
///
/// The registry addresses delete targets through a field called `name`, and that
/// field carries the employee **identifier**, not the employee's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteInput {
    pub name: String,
}

impl DeleteInput {
    pub fn for_id(id: impl Into<String>) -> Self {
        Self { name: id.into() }
    }
}

/// Envelope wrapping every registry answer: `{"data": ..., "status": ..., "error": ...}`.
#[derive(Debug, Deserialize)]
pub struct RegistryEnvelope<T> {
    pub data: Option<T>,
    pub status: Option<String>,
    pub error: Option<String>,
}
