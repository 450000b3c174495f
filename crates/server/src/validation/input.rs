use thiserror::Error;

/// Max lengths mirror the column sizes in the schema.
pub const MAX_NUMBER_LEN: usize = 20;
pub const MAX_OPERATION_NAME_LEN: usize = 100;
pub const MAX_TAG_NAME_LEN: usize = 50;
pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("phone number contains invalid character '{0}'")]
    InvalidNumberCharacter(char),
    #[error("risk score {0} is outside 0..=100")]
    RiskScoreOutOfRange(i32),
    #[error("color must be a hex code like #1a2b3c, got '{0}'")]
    InvalidColor(String),
}

/// Required free text with a length cap.
pub fn validate_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Digits plus the usual formatting characters (`+`, space, `-`, parentheses).
pub fn validate_number(number: &str) -> Result<(), ValidationError> {
    validate_text("number", number, MAX_NUMBER_LEN)?;
    if let Some(c) = number
        .chars()
        .find(|c| !c.is_ascii_digit() && !matches!(c, '+' | ' ' | '-' | '(' | ')'))
    {
        return Err(ValidationError::InvalidNumberCharacter(c));
    }
    Ok(())
}

pub fn validate_risk_score(score: i32) -> Result<(), ValidationError> {
    if !(0..=100).contains(&score) {
        return Err(ValidationError::RiskScoreOutOfRange(score));
    }
    Ok(())
}

pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(ValidationError::InvalidColor(color.to_string()));
    }
    Ok(())
}
