//! # API Routes Module
//!
//! Configures HTTP routes for the swap gateway.
//!
//! ## Routes
//!
//! * `/` - Swap endpoint (POST only)
//! * `/health` - Health check endpoint
//! * `/api-docs/openapi.json` - OpenAPI document

pub mod docs;
pub mod health;
pub mod swap;

use actix_web::{error::InternalError, web, ResponseError};

use crate::models::SwapError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(swap::init)
        .configure(health::init)
        .configure(docs::init);
}

/// JSON extractor configuration that turns malformed payloads into the
/// structured 400 body instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        InternalError::from_response(err, SwapError::InvalidPayload.error_response()).into()
    })
}
