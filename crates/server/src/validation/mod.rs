//! Input checks applied before anything is written.

pub mod input;
pub mod requests;

pub use input::{
    ValidationError, validate_color, validate_number, validate_risk_score, validate_text,
};
pub use requests::Validate;
