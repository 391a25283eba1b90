#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use deduction_assistant::services::completion::{CompletionClient, CompletionError};
use deduction_assistant::services::lookup::{
    DeductionRecord, Employee, EmployeeDirectory, LookupError,
};

/// In-memory directory that counts every lookup it serves.
#[derive(Default)]
pub struct FakeDirectory {
    pub employees: Vec<Employee>,
    pub deductions: Vec<DeductionRecord>,
    pub fail_with: Option<String>,
    pub fail_attendance_with: Option<String>,
    pub employee_calls: AtomicUsize,
    pub deduction_calls: AtomicUsize,
}

impl FakeDirectory {
    pub fn with_jane(reason: Option<&str>) -> Self {
        let mut dir = Self {
            employees: vec![Employee::new("jane@co.com", "E1")],
            ..Default::default()
        };
        if let Some(reason) = reason {
            dir.deductions.push(DeductionRecord::new("E1", Some(reason)));
        }
        dir
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Employee lookups succeed; the attendance lookup fails.
    pub fn failing_attendance(message: &str) -> Self {
        Self {
            fail_attendance_with: Some(message.to_string()),
            ..Self::with_jane(Some("late arrival 3 times"))
        }
    }

    pub fn total_calls(&self) -> usize {
        self.employee_calls.load(Ordering::SeqCst) + self.deduction_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmployeeDirectory for FakeDirectory {
    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, LookupError> {
        self.employee_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = &self.fail_with {
            return Err(LookupError::Query(msg.clone()));
        }
        Ok(self.employees.iter().find(|e| e.email == email).cloned())
    }

    async fn find_deduction_by_employee_id(
        &self,
        emp_id: &str,
    ) -> Result<Option<DeductionRecord>, LookupError> {
        self.deduction_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.fail_with.as_ref().or(self.fail_attendance_with.as_ref()) {
            return Err(LookupError::Query(msg.clone()));
        }
        Ok(self.deductions.iter().find(|d| d.emp_id == emp_id).cloned())
    }
}

/// Replies with the prompt it was given.
#[derive(Default)]
pub struct EchoCompletion {
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionClient for EchoCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(prompt.to_string())
    }
}

pub struct FailingCompletion;

#[async_trait]
impl CompletionClient for FailingCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Status {
            status: 429,
            body: "rate limited".to_string(),
        })
    }
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
