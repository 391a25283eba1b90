// src/services/lookup.rs
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const EMPLOYEE_COLLECTION: &str = "employee";
pub const ATTENDANCE_COLLECTION: &str = "attendance";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub emp_id: String,
}

impl Employee {
    pub fn new(email: impl Into<String>, emp_id: impl Into<String>) -> Self {
        Self { email: email.into(), emp_id: emp_id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRecord {
    #[serde(default)]
    pub emp_id: String,
    #[serde(default)]
    pub deduction_reason: Option<String>,
}

impl DeductionRecord {
    pub fn new(emp_id: impl Into<String>, reason: Option<&str>) -> Self {
        Self {
            emp_id: emp_id.into(),
            deduction_reason: reason.map(str::to_string),
        }
    }

    /// The stated reason, ignoring blank values.
    pub fn reason(&self) -> Option<&str> {
        self.deduction_reason
            .as_deref()
            .filter(|r| !r.trim().is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document store query timed out after {0:?}")]
    Timeout(Duration),
    #[error("document store query failed: {0}")]
    Query(String),
}

/// Read-only access to the employee and attendance collections.
///
/// Both lookups are exact-match point reads. When the store holds several
/// matching documents the first one it returns is used.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, LookupError>;

    async fn find_deduction_by_employee_id(
        &self,
        emp_id: &str,
    ) -> Result<Option<DeductionRecord>, LookupError>;
}

/// Stand-in used when no store could be configured. Every lookup fails.
#[derive(Debug, Clone)]
pub struct UnavailableDirectory {
    reason: String,
}

impl UnavailableDirectory {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl EmployeeDirectory for UnavailableDirectory {
    async fn find_employee_by_email(&self, _email: &str) -> Result<Option<Employee>, LookupError> {
        Err(LookupError::Unavailable(self.reason.clone()))
    }

    async fn find_deduction_by_employee_id(
        &self,
        _emp_id: &str,
    ) -> Result<Option<DeductionRecord>, LookupError> {
        Err(LookupError::Unavailable(self.reason.clone()))
    }
}
