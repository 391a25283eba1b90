// src/services/mongo_store.rs
use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc},
    error::ErrorKind,
    options::ClientOptions,
};
use tracing::debug;

use super::lookup::{
    ATTENDANCE_COLLECTION, DeductionRecord, EMPLOYEE_COLLECTION, Employee, EmployeeDirectory,
    LookupError,
};

/// `EmployeeDirectory` backed by a MongoDB database.
///
/// The client is created once at startup and shared by every request; the
/// driver pools connections internally.
#[derive(Clone)]
pub struct MongoDirectory {
    db: Database,
    employees: Collection<Employee>,
    attendance: Collection<DeductionRecord>,
    timeout: Duration,
}

impl MongoDirectory {
    /// Parses the connection string and builds a client. No round trip is made
    /// here; use [`MongoDirectory::ping`] to check reachability.
    pub async fn connect(uri: &str, db_name: &str, timeout: Duration) -> Result<Self, LookupError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| LookupError::Unavailable(format!("invalid connection string: {e}")))?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options).map_err(map_driver_error)?;
        let db = client.database(db_name);

        Ok(Self {
            employees: db.collection(EMPLOYEE_COLLECTION),
            attendance: db.collection(ATTENDANCE_COLLECTION),
            db,
            timeout,
        })
    }

    pub async fn ping(&self) -> Result<(), LookupError> {
        self.bounded(self.db.run_command(doc! { "ping": 1 })).await?;
        Ok(())
    }

    async fn bounded<F, T>(&self, query: F) -> Result<T, LookupError>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(result) => result.map_err(map_driver_error),
            Err(_) => Err(LookupError::Timeout(self.timeout)),
        }
    }
}

fn email_filter(email: &str) -> Document {
    doc! { "email": email }
}

fn emp_id_filter(emp_id: &str) -> Document {
    doc! { "emp_id": emp_id }
}

fn map_driver_error(err: mongodb::error::Error) -> LookupError {
    match *err.kind {
        ErrorKind::ServerSelection { .. } => LookupError::Unavailable(err.to_string()),
        _ => LookupError::Query(err.to_string()),
    }
}

#[async_trait]
impl EmployeeDirectory for MongoDirectory {
    async fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, LookupError> {
        debug!(collection = EMPLOYEE_COLLECTION, "find_one by email");
        self.bounded(self.employees.find_one(email_filter(email))).await
    }

    async fn find_deduction_by_employee_id(
        &self,
        emp_id: &str,
    ) -> Result<Option<DeductionRecord>, LookupError> {
        debug!(collection = ATTENDANCE_COLLECTION, emp_id, "find_one by emp_id");
        self.bounded(self.attendance.find_one(emp_id_filter(emp_id))).await
    }
}
