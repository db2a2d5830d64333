//! Field rules for contact forms.
//!
//! Each validator returns every rule the value breaks, so a form can show
//! all messages at once. Length and format rules only run on non-empty
//! values; emptiness is reported once, as [`FieldError::Required`].

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

pub const NAME_MIN_CHARS: usize = 8;
pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const EMAIL_LOCAL_MAX_CHARS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("value is required")]
    Required,
    #[error("must have at least {min} characters")]
    TooShort { min: usize },
    #[error("must have at most {max} characters")]
    TooLong { max: usize },
    #[error("must be a valid email address")]
    InvalidEmail,
    #[error("must match (DD) DDDDD-DDDD")]
    InvalidPhone,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Overall and local-part lengths are checked separately.
        let pattern = r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\([0-9]{2}\) [0-9]{5}-[0-9]{4}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

pub fn validate_name(value: &str) -> Vec<FieldError> {
    if value.is_empty() {
        return vec![FieldError::Required];
    }
    let length = value.chars().count();
    let mut errors = Vec::new();
    if length < NAME_MIN_CHARS {
        errors.push(FieldError::TooShort {
            min: NAME_MIN_CHARS,
        });
    }
    if length > NAME_MAX_CHARS {
        errors.push(FieldError::TooLong {
            max: NAME_MAX_CHARS,
        });
    }
    errors
}

pub fn is_valid_email(value: &str) -> bool {
    if value.chars().count() > EMAIL_MAX_CHARS {
        return false;
    }
    let Some((local, _domain)) = value.split_once('@') else {
        return false;
    };
    if local.chars().count() > EMAIL_LOCAL_MAX_CHARS {
        return false;
    }
    email_regex().is_match(value)
}

pub fn validate_email(value: &str) -> Vec<FieldError> {
    if value.is_empty() {
        return vec![FieldError::Required];
    }
    if is_valid_email(value) {
        Vec::new()
    } else {
        vec![FieldError::InvalidEmail]
    }
}

pub fn is_valid_phone(value: &str) -> bool {
    phone_regex().is_match(value)
}

pub fn validate_phone(value: &str) -> Vec<FieldError> {
    if value.is_empty() {
        return vec![FieldError::Required];
    }
    if is_valid_phone(value) {
        Vec::new()
    } else {
        vec![FieldError::InvalidPhone]
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
