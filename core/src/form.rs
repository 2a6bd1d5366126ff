use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

pub const ERROR_BORDER_COLOR: &str = "#FF3B30";
pub const VALID_BORDER_COLOR: &str = "#D1D1D6";
pub const COUNTER_ERROR_COLOR: &str = "#FF3B30";
pub const COUNTER_OK_COLOR: &str = "#6C6C70";

pub const SUBMIT_DELAY_MS: u32 = 1500;
pub const SUCCESS_HIDE_MS: u32 = 5000;
pub const SENDING_LABEL_HTML: &str = "<span class=\"loading\"></span> Sending...";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    /// Validation and focus order.
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Subject,
        ContactField::Message,
    ];

    pub fn input_id(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }

    pub fn error_id(self) -> &'static str {
        match self {
            ContactField::Name => "nameError",
            ContactField::Email => "emailError",
            ContactField::Subject => "subjectError",
            ContactField::Message => "messageError",
        }
    }

    /// Event that re-checks a field once its error is showing.
    pub fn live_event(self) -> &'static str {
        match self {
            ContactField::Subject => "change",
            _ => "input",
        }
    }

    fn index(self) -> usize {
        match self {
            ContactField::Name => 0,
            ContactField::Email => 1,
            ContactField::Subject => 2,
            ContactField::Message => 3,
        }
    }

    /// Applies the field's rule to a raw control value.
    pub fn validate(self, raw: &str) -> Result<(), FieldError> {
        match self {
            ContactField::Name => {
                let value = raw.trim();
                if value.is_empty() {
                    return Err(FieldError::NameMissing);
                }
                if value.chars().count() < NAME_MIN_CHARS {
                    return Err(FieldError::NameTooShort);
                }
                Ok(())
            }
            ContactField::Email => {
                let value = raw.trim();
                if value.is_empty() {
                    return Err(FieldError::EmailMissing);
                }
                if !EMAIL_PATTERN.is_match(value) {
                    return Err(FieldError::EmailInvalid);
                }
                Ok(())
            }
            ContactField::Subject => {
                if raw.is_empty() {
                    return Err(FieldError::SubjectMissing);
                }
                Ok(())
            }
            ContactField::Message => {
                let value = raw.trim();
                if value.is_empty() {
                    return Err(FieldError::MessageMissing);
                }
                if value.chars().count() < MESSAGE_MIN_CHARS {
                    return Err(FieldError::MessageTooShort);
                }
                Ok(())
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Please enter your name")]
    NameMissing,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Please enter your email address")]
    EmailMissing,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Please select a subject")]
    SubjectMissing,
    #[error("Please enter your message")]
    MessageMissing,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("contact transport unavailable: {0}")]
    Unavailable(String),
}

/// Values and visible errors of the four contact fields.
#[derive(Clone, Debug, Default)]
pub struct FormState {
    values: [String; 4],
    errors: [Option<FieldError>; 4],
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: ContactField) -> &str {
        &self.values[field.index()]
    }

    pub fn set_value(&mut self, field: ContactField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn error(&self, field: ContactField) -> Option<FieldError> {
        self.errors[field.index()]
    }

    pub fn error_showing(&self, field: ContactField) -> bool {
        self.error(field).is_some()
    }

    /// Validates one field and records the outcome.
    pub fn validate(&mut self, field: ContactField) -> Result<(), FieldError> {
        let result = field.validate(self.value(field));
        self.errors[field.index()] = result.err();
        result
    }

    /// Input/change handling: only re-checks a field that already shows an error.
    pub fn revalidate_if_showing(&mut self, field: ContactField) -> Option<Result<(), FieldError>> {
        if self.error_showing(field) {
            Some(self.validate(field))
        } else {
            None
        }
    }

    /// Runs every validator (so every error is shown) and returns the first
    /// invalid field in focus order, if any.
    pub fn validate_all(&mut self) -> Option<ContactField> {
        let mut first_invalid = None;
        for field in ContactField::ALL {
            if self.validate(field).is_err() && first_invalid.is_none() {
                first_invalid = Some(field);
            }
        }
        first_invalid
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn submission(&self, timestamp: impl Into<String>) -> ContactSubmission {
        ContactSubmission {
            name: self.value(ContactField::Name).trim().to_string(),
            email: self.value(ContactField::Email).trim().to_string(),
            subject: self.value(ContactField::Subject).to_string(),
            message: self.value(ContactField::Message).trim().to_string(),
            timestamp: timestamp.into(),
        }
    }
}

/// Body a future contact endpoint would receive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: String,
}

impl ContactSubmission {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterCount {
    pub length: usize,
}

impl CharacterCount {
    pub fn of(raw: &str) -> Self {
        Self {
            length: raw.chars().count(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} characters", self.length)
    }

    pub fn below_minimum(&self) -> bool {
        self.length < MESSAGE_MIN_CHARS
    }

    pub fn color(&self) -> &'static str {
        if self.below_minimum() {
            COUNTER_ERROR_COLOR
        } else {
            COUNTER_OK_COLOR
        }
    }
}
