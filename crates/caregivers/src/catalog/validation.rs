//! Field constraints applied to payloads before the marketplace writes them.

/// Passwords shorter than this are refused.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Constraint violations detected on an incoming payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayloadViolation {
    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },
    #[error("password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must be greater than or equal to zero")]
    Negative { field: &'static str },
    #[error("Sender is required")]
    MissingSender,
    #[error("Receiver is required")]
    MissingReceiver,
    #[error("message must name exactly one sender")]
    AmbiguousSender,
    #[error("message must name exactly one receiver")]
    AmbiguousReceiver,
}

impl PayloadViolation {
    /// Violations about who is talking rather than the shape of a field.
    pub fn concerns_participants(&self) -> bool {
        matches!(
            self,
            PayloadViolation::MissingSender
                | PayloadViolation::MissingReceiver
                | PayloadViolation::AmbiguousSender
                | PayloadViolation::AmbiguousReceiver
        )
    }
}

/// Implemented by every create and update payload.
pub trait Validate {
    fn validate(&self) -> Result<(), PayloadViolation>;
}

pub(crate) fn check_email(value: &str) -> Result<(), PayloadViolation> {
    let invalid = || PayloadViolation::InvalidEmail {
        value: value.to_string(),
    };

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

pub(crate) fn check_password(value: &str) -> Result<(), PayloadViolation> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PayloadViolation::PasswordTooShort);
    }
    Ok(())
}

pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), PayloadViolation> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PayloadViolation::NotPositive { field })
    }
}

pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<(), PayloadViolation> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PayloadViolation::Negative { field })
    }
}
