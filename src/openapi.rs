use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Solana Swap Gateway API",
        description = "Swaps SOL for a requested SPL token via a swap-routing API and broadcasts the signed transaction."
    ),
    paths(
        crate::api::routes::swap::buy_token,
        crate::api::routes::health::health,
    ),
    components(schemas(
        crate::models::SwapRequest,
        crate::models::SwapResponse,
        crate::models::ErrorResponse,
    )),
    tags(
        (name = "Swap", description = "Token swap operations"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
