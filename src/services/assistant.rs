// src/services/assistant.rs
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::AppError;
use crate::services::{
    completion::CompletionClient,
    email::extract_email,
    lookup::{DeductionRecord, EmployeeDirectory},
    prompt::{Persona, ResolvedContext, build_prompt, missing_deduction_message},
};

pub const NO_EMAIL_REPLY: &str = "Please provide a valid email address.";

/// Terminal outcome of one chat request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    NoEmail,
    EmployeeNotFound { email: String },
    DeductionNotFound { email: String },
    Answered { email: String, reply: String },
}

impl Resolution {
    pub fn reply(&self) -> String {
        match self {
            Resolution::NoEmail => NO_EMAIL_REPLY.to_string(),
            Resolution::EmployeeNotFound { email } => {
                format!("I couldn't find any information for the email {email}.")
            }
            Resolution::DeductionNotFound { email } => missing_deduction_message(email),
            Resolution::Answered { reply, .. } => reply.clone(),
        }
    }

    /// True when the reply was produced without asking the model.
    pub fn is_short_circuit(&self) -> bool {
        !matches!(self, Resolution::Answered { .. })
    }
}

/// Email extraction, two lookups, prompt assembly and the model call, run in
/// sequence for a single message.
pub struct DeductionAssistant {
    directory: Arc<dyn EmployeeDirectory>,
    completion: Arc<dyn CompletionClient>,
    persona: Persona,
    consult_model_without_deduction: bool,
}

impl DeductionAssistant {
    pub fn new(directory: Arc<dyn EmployeeDirectory>, completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            directory,
            completion,
            persona: Persona::default(),
            consult_model_without_deduction: false,
        }
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    /// When enabled, a missing deduction record is passed to the model as
    /// context instead of being answered directly.
    pub fn consult_model_without_deduction(mut self, enabled: bool) -> Self {
        self.consult_model_without_deduction = enabled;
        self
    }

    pub async fn resolve(&self, message: &str) -> Result<Resolution, AppError> {
        let Some(email) = extract_email(message) else {
            info!("no email address in message");
            return Ok(Resolution::NoEmail);
        };
        let email = email.to_string();

        let emp_id = self
            .directory
            .find_employee_by_email(&email)
            .await?
            .map(|employee| employee.emp_id)
            .filter(|id| !id.trim().is_empty());
        let Some(emp_id) = emp_id else {
            info!(%email, "employee not found");
            return Ok(Resolution::EmployeeNotFound { email });
        };

        let record = self.directory.find_deduction_by_employee_id(&emp_id).await?;
        let context = match record.as_ref().and_then(DeductionRecord::reason) {
            Some(reason) => ResolvedContext::deduction(&email, reason),
            None if self.consult_model_without_deduction => ResolvedContext::missing_deduction(&email),
            None => {
                info!(%email, %emp_id, "no deduction reason on record");
                return Ok(Resolution::DeductionNotFound { email });
            }
        };

        let prompt = build_prompt(&self.persona, &context, message);
        debug!(%emp_id, found = context.found, "prompt built");

        let reply = self.completion.complete(&prompt).await?;
        Ok(Resolution::Answered {
            email,
            reply: reply.trim().to_string(),
        })
    }
}
