use crate::domain::BelgianNumberingPlan;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Phone value that installers historically gave the bootstrap admin person.
pub const DEFAULT_BOOTSTRAP_PHONE: &str = "+00 000 000 000";

/// User-input failures reported by the pre-write check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("invalid phone number")]
    InvalidPhoneNumber,
    #[error("invalid mobile phone number")]
    InvalidMobilePhoneNumber,
    #[error("invalid email address")]
    InvalidEmail,
}

impl ValidationError {
    pub fn key(self) -> &'static str {
        match self {
            ValidationError::InvalidPhoneNumber => "invalid_phone_number",
            ValidationError::InvalidMobilePhoneNumber => "invalid_mobile_phone_number",
            ValidationError::InvalidEmail => "invalid_email",
        }
    }
}

/// Display strings for each [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub invalid_phone_number: String,
    pub invalid_mobile_phone_number: String,
    pub invalid_email: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_phone_number: "Invalid phone number: expected a Belgian land line number \
                                   (0 or +32 followed by 8 digits) or a foreign number."
                .to_string(),
            invalid_mobile_phone_number: "Invalid mobile phone number: expected a Belgian mobile \
                                          number (044 to 049, 9 digits after 0 or +32) or a \
                                          foreign number."
                .to_string(),
            invalid_email: "Invalid email address.".to_string(),
        }
    }
}

impl Messages {
    pub fn lookup(&self, error: ValidationError) -> &str {
        match error {
            ValidationError::InvalidPhoneNumber => &self.invalid_phone_number,
            ValidationError::InvalidMobilePhoneNumber => &self.invalid_mobile_phone_number,
            ValidationError::InvalidEmail => &self.invalid_email,
        }
    }

    pub fn render(&self, errors: &[ValidationError]) -> Vec<String> {
        errors
            .iter()
            .map(|error| self.lookup(*error).to_string())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyOptions {
    pub plan: BelgianNumberingPlan,
    /// Reject phone values containing anything besides digits, spaces, dots,
    /// slashes and a leading `+`.
    pub strict_characters: bool,
    /// Phone value accepted on a person that has not been saved yet.
    pub bootstrap_phone_sentinel: String,
}

impl Default for PolicyOptions {
    fn default() -> Self {
        Self {
            plan: BelgianNumberingPlan::default(),
            strict_characters: false,
            bootstrap_phone_sentinel: DEFAULT_BOOTSTRAP_PHONE.to_string(),
        }
    }
}
