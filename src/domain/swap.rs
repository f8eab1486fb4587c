//! The swap pipeline: one linear chain per request.
//!
//! Derives the wallet key, fetches a quote and the swap instructions,
//! translates them, assembles and signs the transaction, and broadcasts
//! it. Failure at any hop short-circuits into a `SwapError`; network hops
//! attach a classified description.

use log::info;
use solana_sdk::{message::Message, signature::Signature, transaction::Transaction};

use crate::constants::{DEFAULT_SLIPPAGE_BPS, SOL_MINT};
use crate::domain::translate_instructions;
use crate::models::{SwapError, ValidatedSwap};
use crate::services::{
    classify_rpc_error, JupiterServiceTrait, LocalSigner, PrioritizationFeeLamports,
    QuoteRequest, SignerRegistry, SolanaProviderTrait, SolanaSignTrait,
    SwapInstructionsRequest,
};

pub struct SwapPipeline<P, J> {
    provider: P,
    jupiter: J,
}

impl<P, J> SwapPipeline<P, J>
where
    P: SolanaProviderTrait,
    J: JupiterServiceTrait,
{
    pub fn new(provider: P, jupiter: J) -> Self {
        Self { provider, jupiter }
    }

    /// Runs the full swap chain and returns the broadcast confirmation
    /// signature.
    pub async fn execute(&self, swap: ValidatedSwap) -> Result<Signature, SwapError> {
        let signer = LocalSigner::from_base58(swap.private_key.as_str())
            .map_err(|e| SwapError::InvalidKey(e.to_string()))?;
        let user_pubkey = signer.pubkey();
        info!("Derived public key: {user_pubkey}");

        let quote = self
            .jupiter
            .get_quote(QuoteRequest {
                input_mint: SOL_MINT.to_string(),
                output_mint: swap.token_mint.clone(),
                amount: swap.amount_lamports,
                slippage_bps: DEFAULT_SLIPPAGE_BPS,
            })
            .await
            .map_err(|e| SwapError::Quote(e.to_string()))?;
        info!(
            "Quote received: {} lamports of {} -> {} of {}",
            quote.in_amount, quote.input_mint, quote.out_amount, quote.output_mint
        );

        let swap_instructions = self
            .jupiter
            .get_swap_instructions(SwapInstructionsRequest {
                user_public_key: user_pubkey.to_string(),
                quote_response: quote,
                prioritization_fee_lamports: Some(PrioritizationFeeLamports::Lamports(
                    swap.prioritization_fee_lamports,
                )),
                dynamic_compute_unit_limit: Some(true),
            })
            .await
            .map_err(|e| SwapError::SwapInstructions(classify_rpc_error(&e.to_string())))?;

        let instructions = translate_instructions(&swap_instructions)
            .map_err(|e| SwapError::SwapInstructions(e.to_string()))?;
        info!("Translated {} instructions", instructions.len());

        let recent_blockhash = self
            .provider
            .get_latest_blockhash()
            .await
            .map_err(|e| SwapError::Assembly(e.description()))?;
        let message =
            Message::new_with_blockhash(&instructions, Some(&user_pubkey), &recent_blockhash);
        let transaction = Transaction::new_unsigned(message);

        let registry = SignerRegistry::single(signer);
        let (signed_transaction, _) = registry
            .sign_transaction(transaction)
            .map_err(|e| SwapError::Signing(e.to_string()))?;

        let signature = self
            .provider
            .send_transaction(&signed_transaction)
            .await
            .map_err(|e| SwapError::Broadcast(e.description()))?;
        info!("Transaction sent: {signature}");

        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SecretString;
    use crate::services::{
        AccountMetaSpec, InstructionSpec, JupiterServiceError, MockJupiterServiceTrait,
        MockSolanaProviderTrait, QuoteResponse, SolanaProviderError, SwapInstructionsResponse,
    };
    use crate::utils::base64_encode;
    use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Keypair, signer::Signer};

    fn validated_swap(keypair: &Keypair) -> ValidatedSwap {
        ValidatedSwap {
            private_key: SecretString::new(&keypair.to_base58_string()),
            token_mint: "Mint111".to_string(),
            amount_lamports: 100_000_000,
            prioritization_fee_lamports: 1_000,
        }
    }

    fn quote_response() -> QuoteResponse {
        QuoteResponse {
            input_mint: SOL_MINT.to_string(),
            in_amount: "100000000".to_string(),
            output_mint: "Mint111".to_string(),
            out_amount: "42000".to_string(),
            other: serde_json::Map::new(),
        }
    }

    fn swap_instructions_for(user: Pubkey) -> SwapInstructionsResponse {
        SwapInstructionsResponse {
            compute_budget_instructions: vec![InstructionSpec {
                program_id: Pubkey::new_unique().to_string(),
                accounts: vec![],
                data: base64_encode(&[0, 1]),
            }],
            setup_instructions: vec![],
            swap_instruction: InstructionSpec {
                program_id: Pubkey::new_unique().to_string(),
                accounts: vec![
                    AccountMetaSpec {
                        pubkey: user.to_string(),
                        is_signer: true,
                        is_writable: true,
                    },
                    AccountMetaSpec {
                        pubkey: Pubkey::new_unique().to_string(),
                        is_signer: false,
                        is_writable: true,
                    },
                ],
                data: base64_encode(&[9, 9, 9]),
            },
            cleanup_instruction: None,
            address_lookup_table_addresses: vec![],
        }
    }

    #[tokio::test]
    async fn test_execute_happy_path() {
        let keypair = Keypair::new();
        let user = keypair.pubkey();
        let expected_signature = Signature::new_unique();

        let mut jupiter = MockJupiterServiceTrait::new();
        jupiter
            .expect_get_quote()
            .withf(|request| {
                request.input_mint == SOL_MINT
                    && request.output_mint == "Mint111"
                    && request.amount == 100_000_000
                    && request.slippage_bps == 1_000
            })
            .returning(|_| Box::pin(async { Ok(quote_response()) }));
        jupiter
            .expect_get_swap_instructions()
            .withf(move |request| request.user_public_key == user.to_string())
            .returning(move |_| Box::pin(async move { Ok(swap_instructions_for(user)) }));

        let blockhash = Hash::new_unique();
        let mut provider = MockSolanaProviderTrait::new();
        provider
            .expect_get_latest_blockhash()
            .returning(move || Box::pin(async move { Ok(blockhash) }));
        provider
            .expect_send_transaction()
            .withf(move |transaction| {
                transaction.message.account_keys[0] == user && transaction.is_signed()
            })
            .returning(move |_| Box::pin(async move { Ok(expected_signature) }));

        let pipeline = SwapPipeline::new(provider, jupiter);
        let signature = pipeline.execute(validated_swap(&keypair)).await.unwrap();
        assert_eq!(signature, expected_signature);
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_key_before_any_call() {
        let jupiter = MockJupiterServiceTrait::new();
        let provider = MockSolanaProviderTrait::new();
        let pipeline = SwapPipeline::new(provider, jupiter);

        let swap = ValidatedSwap {
            private_key: SecretString::new("garbage-key"),
            token_mint: "Mint111".to_string(),
            amount_lamports: 1,
            prioritization_fee_lamports: 1_000,
        };

        let err = pipeline.execute(swap).await.unwrap_err();
        assert!(matches!(err, SwapError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_execute_surfaces_quote_failure() {
        let keypair = Keypair::new();
        let mut jupiter = MockJupiterServiceTrait::new();
        jupiter.expect_get_quote().returning(|_| {
            Box::pin(async {
                Err(JupiterServiceError::RequestFailed {
                    status: reqwest::StatusCode::BAD_REQUEST,
                    body: "Could not find any route".to_string(),
                })
            })
        });
        let provider = MockSolanaProviderTrait::new();

        let pipeline = SwapPipeline::new(provider, jupiter);
        let err = pipeline.execute(validated_swap(&keypair)).await.unwrap_err();
        assert!(matches!(err, SwapError::Quote(_)));
    }

    #[tokio::test]
    async fn test_execute_fails_when_swap_instruction_is_unusable() {
        let keypair = Keypair::new();
        let user = keypair.pubkey();

        let mut jupiter = MockJupiterServiceTrait::new();
        jupiter
            .expect_get_quote()
            .returning(|_| Box::pin(async { Ok(quote_response()) }));
        jupiter.expect_get_swap_instructions().returning(move |_| {
            let mut response = swap_instructions_for(user);
            response.swap_instruction.data = "%%not-base64%%".to_string();
            Box::pin(async move { Ok(response) })
        });
        let provider = MockSolanaProviderTrait::new();

        let pipeline = SwapPipeline::new(provider, jupiter);
        let err = pipeline.execute(validated_swap(&keypair)).await.unwrap_err();
        match err {
            SwapError::SwapInstructions(description) => {
                assert!(description.contains("swap instruction is unusable"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_execute_surfaces_blockhash_failure_as_assembly() {
        let keypair = Keypair::new();
        let user = keypair.pubkey();

        let mut jupiter = MockJupiterServiceTrait::new();
        jupiter
            .expect_get_quote()
            .returning(|_| Box::pin(async { Ok(quote_response()) }));
        jupiter
            .expect_get_swap_instructions()
            .returning(move |_| Box::pin(async move { Ok(swap_instructions_for(user)) }));

        let mut provider = MockSolanaProviderTrait::new();
        provider.expect_get_latest_blockhash().returning(|| {
            Box::pin(async {
                Err(SolanaProviderError::NetworkError(
                    "connection refused".to_string(),
                ))
            })
        });

        let pipeline = SwapPipeline::new(provider, jupiter);
        let err = pipeline.execute(validated_swap(&keypair)).await.unwrap_err();
        match err {
            SwapError::Assembly(description) => {
                assert_eq!(
                    description,
                    "An unknown RPC error occurred: connection refused"
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_execute_classifies_broadcast_failure() {
        let keypair = Keypair::new();
        let user = keypair.pubkey();

        let mut jupiter = MockJupiterServiceTrait::new();
        jupiter
            .expect_get_quote()
            .returning(|_| Box::pin(async { Ok(quote_response()) }));
        jupiter
            .expect_get_swap_instructions()
            .returning(move |_| Box::pin(async move { Ok(swap_instructions_for(user)) }));

        let blockhash = Hash::new_unique();
        let mut provider = MockSolanaProviderTrait::new();
        provider
            .expect_get_latest_blockhash()
            .returning(move || Box::pin(async move { Ok(blockhash) }));
        provider.expect_send_transaction().returning(|_| {
            Box::pin(async {
                Err(SolanaProviderError::RpcError(
                    "Transaction simulation failed: Attempt to debit an account".to_string(),
                ))
            })
        });

        let pipeline = SwapPipeline::new(provider, jupiter);
        let err = pipeline.execute(validated_swap(&keypair)).await.unwrap_err();
        match err {
            SwapError::Broadcast(description) => {
                assert_eq!(
                    description,
                    "Transaction simulation failed due to insufficient funds or invalid transaction."
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
