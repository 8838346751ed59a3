//! Field-level validation for transport records.
//!
//! Validators are synchronous and collect every violated rule before
//! failing, so callers get the full list in one response.

mod event;
mod event_user;
mod user;

use std::fmt;

use thiserror::Error;

pub use event::EventValidator;
pub use event_user::EventUserValidator;
pub use user::UserValidator;

/// Messages shared by the validators.
pub mod messages {
    pub const REQUIRED: &str = "is required";
    pub const MUST_BE_POSITIVE: &str = "must be greater than zero";
    pub const MUST_NOT_BE_NEGATIVE: &str = "must not be negative";
    pub const PARAMETER_IS_LESS_THAN_ZERO: &str = "Parameter must not be less than zero";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join("; "))]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Synchronous validator over one transport record type.
pub trait Validator<T>: Send + Sync {
    fn validate(&self, item: &T) -> Result<(), ValidationErrors>;
}

/// Accumulates rule violations for a single record.
#[derive(Default)]
pub(crate) struct Rules {
    messages: Vec<String>,
}

impl Rules {
    pub(crate) fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, messages::REQUIRED);
        }
        self
    }

    pub(crate) fn positive(&mut self, field: &str, value: i32) -> &mut Self {
        if value <= 0 {
            self.fail(field, messages::MUST_BE_POSITIVE);
        }
        self
    }

    pub(crate) fn non_negative(&mut self, field: &str, value: i32) -> &mut Self {
        if value < 0 {
            self.fail(field, messages::MUST_NOT_BE_NEGATIVE);
        }
        self
    }

    pub(crate) fn check(&mut self, ok: bool, message: impl fmt::Display) -> &mut Self {
        if !ok {
            self.messages.push(message.to_string());
        }
        self
    }

    fn fail(&mut self, field: &str, rule: &str) {
        self.messages.push(format!("{field} {rule}"));
    }

    pub(crate) fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                messages: std::mem::take(&mut self.messages),
            })
        }
    }
}
