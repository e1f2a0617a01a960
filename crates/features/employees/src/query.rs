//! In-memory queries over a registry snapshot.
//!
//! The free functions are pure and work on whatever snapshot they are given.
//! [`QueryEngine`] fetches a fresh snapshot from its [`EmployeeSource`] for every
//! call and applies one of them; nothing is kept between calls.

use crate::client::RegistryClient;
use crate::error::EmployeeError;
use crate::model::Employee;
use std::future::Future;

/// How many names the top earners route returns.
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Records whose name contains `query`, ignoring case, in snapshot order.
///
/// Both sides are folded with Unicode lowercasing, so the match does not depend
/// on the host locale. The empty query matches every record.
#[must_use]
pub fn search_by_name(employees: Vec<Employee>, query: &str) -> Vec<Employee> {
    let needle = query.to_lowercase();
    employees.into_iter().filter(|e| e.name.to_lowercase().contains(&needle)).collect()
}

/// First record whose id equals `id` exactly.
#[must_use]
pub fn find_by_id(employees: Vec<Employee>, id: &str) -> Option<Employee> {
    employees.into_iter().find(|e| e.id == id)
}

/// Largest salary in the snapshot, `0` when it is empty.
#[must_use]
pub fn highest_salary(employees: &[Employee]) -> u32 {
    employees.iter().map(|e| e.salary).max().unwrap_or(0)
}

/// Names of the `n` best paid records, highest first.
///
/// The sort is stable: equal salaries keep their snapshot order.
#[must_use]
pub fn top_earners(employees: &[Employee], n: usize) -> Vec<String> {
    let mut ranked: Vec<&Employee> = employees.iter().collect();
    ranked.sort_by(|a, b| b.salary.cmp(&a.salary));
    ranked.into_iter().take(n).map(|e| e.name.clone()).collect()
}

/// Anything that can produce the full employee list on demand.
pub trait EmployeeSource: Send + Sync {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Employee>, EmployeeError>> + Send;
}

impl EmployeeSource for RegistryClient {
    async fn fetch_all(&self) -> Result<Vec<Employee>, EmployeeError> {
        self.list_all().await
    }
}

/// Read side of the slice: one fetch, one pure transformation.
#[derive(Debug, Clone)]
pub struct QueryEngine<S> {
    source: S,
}

impl<S: EmployeeSource> QueryEngine<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// # Errors
    /// Whatever the source fails with.
    pub async fn list_all(&self) -> Result<Vec<Employee>, EmployeeError> {
        self.source.fetch_all().await
    }

    /// # Errors
    /// Whatever the source fails with.
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<Employee>, EmployeeError> {
        Ok(search_by_name(self.source.fetch_all().await?, query))
    }

    /// `Ok(None)` for an unknown id; absence is not an error here.
    ///
    /// # Errors
    /// Whatever the source fails with.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, EmployeeError> {
        Ok(find_by_id(self.source.fetch_all().await?, id))
    }

    /// # Errors
    /// Whatever the source fails with.
    pub async fn highest_salary(&self) -> Result<u32, EmployeeError> {
        Ok(highest_salary(&self.source.fetch_all().await?))
    }

    /// # Errors
    /// Whatever the source fails with.
    pub async fn top_earners(&self, n: usize) -> Result<Vec<String>, EmployeeError> {
        Ok(top_earners(&self.source.fetch_all().await?, n))
    }
}
