//! Request and response DTOs.

pub mod request;
pub mod response;

use validator::Validate;

use agrolink_core::error::AppError;

use crate::error::ApiError;

/// Run declarative validation on a request body, collecting field-level
/// messages into one validation error.
pub fn validate_body(body: &impl Validate) -> Result<(), ApiError> {
    body.validate().map_err(|errors| {
        let detail = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("invalid value for {field}"))
                    })
                    .collect();
                format!("{field}: {}", messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");
        ApiError(AppError::validation(detail))
    })
}
