use crate::error::EmployeeError;
use roster_derive::api_model;

/// An employee as the facade exposes it.
///
/// Values are rebuilt from every registry response and never mutated afterwards.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct Employee {
    /// Opaque identifier assigned by the registry
    pub id: String,
    pub name: String,
    pub salary: u32,
    pub age: u32,
    pub title: String,
    /// Display only; never sent back to the registry
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `POST /api/v1/employees`. Unknown fields such as `id` or `email` are ignored.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct CreateEmployee {
    pub name: String,
    pub salary: u32,
    pub age: u32,
    #[serde(default)]
    pub title: String,
}

impl CreateEmployee {
    /// Basic shape checks; `salary` is unsigned and needs none.
    ///
    /// # Errors
    /// [`EmployeeError::Validation`] for a blank name or a zero age.
    pub fn validate(&self) -> Result<(), EmployeeError> {
        if self.name.trim().is_empty() {
            return Err(EmployeeError::validation("name must not be blank"));
        }
        if self.age == 0 {
            return Err(EmployeeError::validation("age must be a positive integer"));
        }
        Ok(())
    }
}
