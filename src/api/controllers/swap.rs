//! Swap controller.
//!
//! Validates the request, builds the per-request service clients from the
//! shared configuration, and runs the pipeline. Exactly one response is
//! written per request.

use actix_web::HttpResponse;
use log::info;

use crate::config::ServerConfig;
use crate::domain::SwapPipeline;
use crate::models::{SwapError, SwapRequest, SwapResponse};
use crate::services::{JupiterService, SolanaProvider};

pub async fn buy_token(
    request: SwapRequest,
    config: &ServerConfig,
) -> Result<HttpResponse, SwapError> {
    // SecretString keeps the private key out of this log line.
    info!("Request decoded: {:?}", request);
    let validated = request.validate()?;

    let provider = SolanaProvider::new(&config.solana_rpc_url);
    let jupiter = JupiterService::new(config.jupiter_base_url.clone());
    let pipeline = SwapPipeline::new(provider, jupiter);

    let signature = pipeline.execute(validated).await?;
    Ok(HttpResponse::Ok().json(SwapResponse::success(signature.to_string())))
}
