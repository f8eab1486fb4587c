//! Request-level error taxonomy and its HTTP mapping.
//!
//! Every failure in the swap pipeline converts into a `SwapError` variant,
//! which renders as a structured JSON body. Client-caused failures (bad
//! payload, missing field, bad key, no quote) map to 4xx; post-validation
//! failures map to 500.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Example body echoed back with field-level validation errors.
const EXAMPLE_REQUEST: &str = r#"{"private_key": "your_private_key", "token_mint": "token_address", "gas_fee": 0.000001, "amount_sol": 0.1}"#;

/// Structured error body. Optional fields are omitted from the JSON when
/// unset.
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Error)]
pub enum SwapError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount_sol")]
    InvalidAmount,

    #[error("Invalid private_key: {0}")]
    InvalidKey(String),

    #[error("Failed to get quote: {0}")]
    Quote(String),

    #[error("Failed to get swap instructions: {0}")]
    SwapInstructions(String),

    #[error("Failed to assemble transaction: {0}")]
    Assembly(String),

    #[error("Failed to sign transaction: {0}")]
    Signing(String),

    #[error("Failed to send transaction on-chain: {0}")]
    Broadcast(String),

    #[error("Invalid request payload")]
    InvalidPayload,

    #[error("Method Not Allowed: {0}")]
    MethodNotAllowed(String),
}

impl SwapError {
    fn body(&self) -> ErrorResponse {
        match self {
            SwapError::MissingField(field) => {
                let hint = match *field {
                    "private_key" => "Provide your private key in the 'private_key' field.",
                    "token_mint" => "Provide the token mint address in the 'token_mint' field.",
                    _ => "Provide the missing field and try again.",
                };
                ErrorResponse {
                    error: format!("Missing field: {field}"),
                    description: Some(format!("The '{field}' field is required.")),
                    hint: Some(hint.to_string()),
                    example: Some(EXAMPLE_REQUEST.to_string()),
                }
            }
            SwapError::InvalidAmount => ErrorResponse {
                error: "Invalid amount_sol".to_string(),
                description: Some("The 'amount_sol' must be greater than zero.".to_string()),
                hint: Some("Provide a valid amount in SOL to swap.".to_string()),
                example: Some(EXAMPLE_REQUEST.to_string()),
            },
            SwapError::InvalidKey(_) => ErrorResponse {
                error: "Invalid private_key".to_string(),
                description: Some(
                    "Failed to create wallet from the provided private key.".to_string(),
                ),
                hint: Some(
                    "Ensure that the 'private_key' is correct and properly formatted.".to_string(),
                ),
                example: None,
            },
            SwapError::Quote(_) => ErrorResponse {
                error: "Failed to get quote".to_string(),
                description: Some(
                    "Unable to retrieve a quote for the given token mint address.".to_string(),
                ),
                hint: Some(
                    "Check if the 'token_mint' address is correct and try again.".to_string(),
                ),
                example: Some(r#"{"token_mint": "token_address"}"#.to_string()),
            },
            SwapError::SwapInstructions(description) => ErrorResponse {
                error: "Failed to get swap instructions".to_string(),
                description: Some(description.clone()),
                hint: Some("Check your inputs and try again.".to_string()),
                example: None,
            },
            SwapError::Assembly(description) => ErrorResponse {
                error: "Failed to assemble transaction".to_string(),
                description: Some(description.clone()),
                hint: None,
                example: None,
            },
            SwapError::Signing(description) => ErrorResponse {
                error: "Failed to sign transaction".to_string(),
                description: Some(description.clone()),
                hint: Some("Ensure your private key is correct and try again.".to_string()),
                example: None,
            },
            SwapError::Broadcast(description) => ErrorResponse {
                error: "Failed to send transaction on-chain".to_string(),
                description: Some(description.clone()),
                hint: Some(
                    "Ensure your account has sufficient funds and try again.".to_string(),
                ),
                example: None,
            },
            SwapError::InvalidPayload => ErrorResponse {
                error: "Invalid request payload".to_string(),
                description: Some(
                    "The JSON payload is malformed or missing required fields.".to_string(),
                ),
                hint: Some(
                    "Check the JSON syntax and ensure all required fields are included."
                        .to_string(),
                ),
                example: Some(EXAMPLE_REQUEST.to_string()),
            },
            SwapError::MethodNotAllowed(method) => ErrorResponse {
                error: "Method Not Allowed".to_string(),
                description: Some(format!(
                    "The {method} method is not supported for this endpoint."
                )),
                hint: Some("Use the POST method to access this endpoint.".to_string()),
                example: None,
            },
        }
    }
}

impl ResponseError for SwapError {
    fn status_code(&self) -> StatusCode {
        match self {
            SwapError::MissingField(_)
            | SwapError::InvalidAmount
            | SwapError::InvalidKey(_)
            | SwapError::Quote(_)
            | SwapError::InvalidPayload => StatusCode::BAD_REQUEST,
            SwapError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            SwapError::SwapInstructions(_)
            | SwapError::Assembly(_)
            | SwapError::Signing(_)
            | SwapError::Broadcast(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}
