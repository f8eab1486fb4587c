//! This module defines the HTTP route for the swap endpoint.
//!
//! `POST /` runs the swap pipeline; every other method on `/` answers with
//! a structured 405 body.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::controllers::swap;
use crate::models::{AppState, ErrorResponse, SwapError, SwapRequest, SwapResponse};

/// Buys a token: swaps SOL for the requested mint and broadcasts the
/// signed transaction.
#[utoipa::path(
    post,
    path = "/",
    tag = "Swap",
    request_body = SwapRequest,
    responses(
        (status = 200, description = "Swap transaction broadcast", body = SwapResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Swap failed", body = ErrorResponse),
    )
)]
pub async fn buy_token(
    request: web::Json<SwapRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, SwapError> {
    swap::buy_token(request.into_inner(), &data.config).await
}

pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, SwapError> {
    Err(SwapError::MethodNotAllowed(req.method().to_string()))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::post().to(buy_token))
            .route(web::route().to(method_not_allowed)),
    );
}
