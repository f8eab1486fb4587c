//! Client for the swap-routing API (Jupiter-style quote and
//! swap-instructions endpoints).
//!
//! The quote is treated as opaque: beyond the mint and amount fields, the
//! response body is captured in a flattened map and handed back verbatim to
//! the swap-instructions call.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_HTTP_CLIENT_TIMEOUT_SECONDS;

#[derive(Debug, Error)]
pub enum JupiterServiceError {
    #[error("Request failed with status {status}: {body}")]
    RequestFailed {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Failed to deserialize response: {0}")]
    DeserializationError(#[from] serde_json::Error),
}

/// Parameters of a quote request. The input side is always wrapped SOL in
/// this service; the caller supplies the output mint and lamport amount.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub input_mint: String,
    pub output_mint: String,
    pub amount: u64,
    pub slippage_bps: u16,
}

/// Quote returned by the routing API. Only the fields this service reads
/// are typed; everything else round-trips through `other` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub input_mint: String,
    pub in_amount: String,
    pub output_mint: String,
    pub out_amount: String,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// Prioritization fee encoding accepted by the swap-instructions endpoint:
/// either a flat lamport amount or an object selecting a fee mode.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PrioritizationFeeLamports {
    Lamports(u64),
    #[serde(rename_all = "camelCase")]
    JitoTipLamports { jito_tip_lamports: u64 },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInstructionsRequest {
    pub user_public_key: String,
    pub quote_response: QuoteResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioritization_fee_lamports: Option<PrioritizationFeeLamports>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_compute_unit_limit: Option<bool>,
}

/// Externally-supplied instruction descriptor: base58 program id, ordered
/// account list, base64 payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstructionSpec {
    pub program_id: String,
    pub accounts: Vec<AccountMetaSpec>,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetaSpec {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// Instruction groups returned by the swap-instructions endpoint, in the
/// API's grouping: compute-budget and setup are optional lists, the swap
/// instruction is mandatory, cleanup is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInstructionsResponse {
    #[serde(default)]
    pub compute_budget_instructions: Vec<InstructionSpec>,
    #[serde(default)]
    pub setup_instructions: Vec<InstructionSpec>,
    pub swap_instruction: InstructionSpec,
    #[serde(default)]
    pub cleanup_instruction: Option<InstructionSpec>,
    #[serde(default)]
    pub address_lookup_table_addresses: Vec<String>,
}

/// Trait for the swap-routing API operations used by the pipeline.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait JupiterServiceTrait: Send + Sync {
    /// Requests a price quote for swapping `amount` lamports of the input
    /// mint into the output mint.
    async fn get_quote(&self, request: QuoteRequest)
        -> Result<QuoteResponse, JupiterServiceError>;

    /// Requests the instruction set that executes the quoted swap for the
    /// given user.
    async fn get_swap_instructions(
        &self,
        request: SwapInstructionsRequest,
    ) -> Result<SwapInstructionsResponse, JupiterServiceError>;
}

pub struct JupiterService {
    client: reqwest::Client,
    base_url: String,
}

impl JupiterService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn timeout() -> Duration {
        Duration::from_secs(DEFAULT_HTTP_CLIENT_TIMEOUT_SECONDS)
    }

    async fn check_response(response: Response) -> Result<Response, JupiterServiceError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(JupiterServiceError::RequestFailed { status, body })
    }
}

#[async_trait]
impl JupiterServiceTrait for JupiterService {
    async fn get_quote(
        &self,
        request: QuoteRequest,
    ) -> Result<QuoteResponse, JupiterServiceError> {
        let params = [
            ("inputMint", request.input_mint.clone()),
            ("outputMint", request.output_mint.clone()),
            ("amount", request.amount.to_string()),
            ("slippageBps", request.slippage_bps.to_string()),
        ];

        let response = self
            .client
            .get(format!("{}/quote", self.base_url))
            .query(&params)
            .timeout(Self::timeout())
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_swap_instructions(
        &self,
        request: SwapInstructionsRequest,
    ) -> Result<SwapInstructionsResponse, JupiterServiceError> {
        let response = self
            .client
            .post(format!("{}/swap-instructions", self.base_url))
            .json(&request)
            .timeout(Self::timeout())
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SOL_MINT;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn quote_request(output_mint: &str) -> QuoteRequest {
        QuoteRequest {
            input_mint: SOL_MINT.to_string(),
            output_mint: output_mint.to_string(),
            amount: 100_000_000,
            slippage_bps: 1_000,
        }
    }

    #[tokio::test]
    async fn test_get_quote_builds_query_and_parses_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .and(query_param("inputMint", SOL_MINT))
            .and(query_param("outputMint", "Mint111"))
            .and(query_param("amount", "100000000"))
            .and(query_param("slippageBps", "1000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "inputMint": SOL_MINT,
                "inAmount": "100000000",
                "outputMint": "Mint111",
                "outAmount": "42000",
                "priceImpactPct": "0.01",
                "routePlan": [{"percent": 100}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = JupiterService::new(server.uri());
        let quote = service.get_quote(quote_request("Mint111")).await.unwrap();

        assert_eq!(quote.out_amount, "42000");
        // Untyped fields are preserved for the swap-instructions call.
        assert!(quote.other.contains_key("routePlan"));
        assert!(quote.other.contains_key("priceImpactPct"));
    }

    #[tokio::test]
    async fn test_get_quote_non_success_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"error":"Could not find any route"}"#),
            )
            .mount(&server)
            .await;

        let service = JupiterService::new(server.uri());
        let err = service.get_quote(quote_request("Unknown")).await.unwrap_err();

        match err {
            JupiterServiceError::RequestFailed { status, body } => {
                assert_eq!(status.as_u16(), 400);
                assert!(body.contains("Could not find any route"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_get_swap_instructions_posts_quote_and_fee() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/swap-instructions"))
            .and(body_partial_json(json!({
                "userPublicKey": "User111",
                "prioritizationFeeLamports": 1000,
                "dynamicComputeUnitLimit": true,
                "quoteResponse": {"outAmount": "42000", "routePlan": [{"percent": 100}]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "computeBudgetInstructions": [
                    {"programId": "ComputeBudget111111111111111111111111111111",
                     "accounts": [], "data": "AwQ="}
                ],
                "setupInstructions": [],
                "swapInstruction": {
                    "programId": "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4",
                    "accounts": [
                        {"pubkey": "User111", "isSigner": true, "isWritable": true}
                    ],
                    "data": "AQID"
                },
                "cleanupInstruction": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let quote = QuoteResponse {
            input_mint: SOL_MINT.to_string(),
            in_amount: "100000000".to_string(),
            output_mint: "Mint111".to_string(),
            out_amount: "42000".to_string(),
            other: json!({"routePlan": [{"percent": 100}]})
                .as_object()
                .unwrap()
                .clone(),
        };

        let service = JupiterService::new(server.uri());
        let response = service
            .get_swap_instructions(SwapInstructionsRequest {
                user_public_key: "User111".to_string(),
                quote_response: quote,
                prioritization_fee_lamports: Some(PrioritizationFeeLamports::Lamports(1_000)),
                dynamic_compute_unit_limit: Some(true),
            })
            .await
            .unwrap();

        assert_eq!(response.compute_budget_instructions.len(), 1);
        assert!(response.setup_instructions.is_empty());
        assert_eq!(response.swap_instruction.accounts.len(), 1);
        assert!(response.swap_instruction.accounts[0].is_signer);
        assert!(response.cleanup_instruction.is_none());
    }

    #[test]
    fn test_prioritization_fee_serializes_as_number_or_object() {
        let flat = serde_json::to_value(PrioritizationFeeLamports::Lamports(1_000)).unwrap();
        assert_eq!(flat, json!(1000));

        let tip = serde_json::to_value(PrioritizationFeeLamports::JitoTipLamports {
            jito_tip_lamports: 5_000,
        })
        .unwrap();
        assert_eq!(tip, json!({"jitoTipLamports": 5000}));
    }

    #[test]
    fn test_quote_response_round_trips_unknown_fields() {
        let raw = json!({
            "inputMint": SOL_MINT,
            "inAmount": "1",
            "outputMint": "Mint111",
            "outAmount": "2",
            "contextSlot": 1234,
            "swapMode": "ExactIn"
        });
        let quote: QuoteResponse = serde_json::from_value(raw.clone()).unwrap();
        let back = serde_json::to_value(&quote).unwrap();
        assert_eq!(back, raw);
    }
}
