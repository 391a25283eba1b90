// src/services/prompt.rs

/// Who the assistant claims to be in the prompt preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub assistant_name: String,
    pub organization: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            assistant_name: "Rafeeq".to_string(),
            organization: "Jawwal".to_string(),
        }
    }
}

/// Context sentence retrieved for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    pub found: bool,
    pub text: String,
}

impl ResolvedContext {
    pub fn deduction(email: &str, reason: &str) -> Self {
        Self {
            found: true,
            text: format!("The reason for the deduction for email {email} is: {reason}"),
        }
    }

    pub fn missing_deduction(email: &str) -> Self {
        Self {
            found: false,
            text: missing_deduction_message(email),
        }
    }
}

pub fn missing_deduction_message(email: &str) -> String {
    format!("I couldn't find any deduction reason for the email {email}.")
}

pub fn build_prompt(persona: &Persona, context: &ResolvedContext, user_query: &str) -> String {
    format!(
        "You are {name}, an AI assistant for {org}. Your task is to answer questions related to \
         the reasons for deductions provided to employees. Please use the following context to \
         answer the employee's query: {context} User: {user_query}",
        name = persona.assistant_name,
        org = persona.organization,
        context = context.text,
    )
}
