use super::input::{
    MAX_OPERATION_NAME_LEN, MAX_TAG_NAME_LEN, MAX_TITLE_LEN, ValidationError, validate_color,
    validate_number, validate_risk_score, validate_text,
};
use crate::store::{
    NewNotification, NewOperation, NewPhoneNumber, NewSystemAlert, NewTag, OperationPatch,
    PhoneNumberPatch, UserProfilePatch,
};

/// Request bodies checked before they reach the store.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for NewOperation {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("name", &self.name, MAX_OPERATION_NAME_LEN)
    }
}

impl Validate for OperationPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_text("name", name, MAX_OPERATION_NAME_LEN)?;
        }
        Ok(())
    }
}

impl Validate for NewPhoneNumber {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_number(&self.number)?;
        if let Some(score) = self.risk_score {
            validate_risk_score(score)?;
        }
        Ok(())
    }
}

impl Validate for PhoneNumberPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(number) = &self.number {
            validate_number(number)?;
        }
        if let Some(Some(score)) = self.risk_score {
            validate_risk_score(score)?;
        }
        Ok(())
    }
}

impl Validate for NewTag {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("name", &self.name, MAX_TAG_NAME_LEN)?;
        if let Some(color) = &self.color {
            validate_color(color)?;
        }
        Ok(())
    }
}

impl Validate for UserProfilePatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(Some(name)) = &self.name {
            validate_text("name", name, MAX_TITLE_LEN)?;
        }
        Ok(())
    }
}

impl Validate for NewNotification {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("title", &self.title, MAX_TITLE_LEN)?;
        validate_text("message", &self.message, usize::MAX)
    }
}

impl Validate for NewSystemAlert {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_text("title", &self.title, MAX_TITLE_LEN)?;
        validate_text("message", &self.message, usize::MAX)
    }
}
