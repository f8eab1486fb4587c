//! Translation of externally-supplied instruction descriptors into
//! `solana_sdk` instructions.
//!
//! Output order is fixed: compute-budget, setup, swap, cleanup. Descriptors
//! that fail to decode (bad base64, empty payload, unparseable keys) are
//! skipped with a warning. The swap instruction is the exception: an
//! unusable swap descriptor aborts translation so a swap-less transaction
//! is never signed or broadcast.

use std::str::FromStr;

use log::warn;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use thiserror::Error;

use crate::services::{AccountMetaSpec, InstructionSpec, SwapInstructionsResponse};
use crate::utils::base64_decode;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("swap instruction is unusable: {0}")]
    InvalidSwapInstruction(String),
}

/// Position of a descriptor within the swap-instructions response.
#[derive(Debug, Clone, Copy, PartialEq)]
enum InstructionGroup {
    ComputeBudget,
    Setup,
    Swap,
    Cleanup,
}

impl InstructionGroup {
    fn label(&self) -> &'static str {
        match self {
            InstructionGroup::ComputeBudget => "compute budget",
            InstructionGroup::Setup => "setup",
            InstructionGroup::Swap => "swap",
            InstructionGroup::Cleanup => "cleanup",
        }
    }
}

#[derive(Error, Debug)]
enum ConvertError {
    #[error("invalid program id '{0}': {1}")]
    InvalidProgramId(String, String),
    #[error("invalid account key '{0}': {1}")]
    InvalidAccountKey(String, String),
    #[error("invalid base64 data: {0}")]
    InvalidData(#[from] base64::DecodeError),
    #[error("decoded instruction data is empty")]
    EmptyData,
}

fn convert_account(spec: &AccountMetaSpec) -> Result<AccountMeta, ConvertError> {
    let pubkey = Pubkey::from_str(&spec.pubkey)
        .map_err(|e| ConvertError::InvalidAccountKey(spec.pubkey.clone(), e.to_string()))?;
    Ok(AccountMeta {
        pubkey,
        is_signer: spec.is_signer,
        is_writable: spec.is_writable,
    })
}

fn convert_instruction(spec: &InstructionSpec) -> Result<Instruction, ConvertError> {
    let program_id = Pubkey::from_str(&spec.program_id)
        .map_err(|e| ConvertError::InvalidProgramId(spec.program_id.clone(), e.to_string()))?;
    let data = base64_decode(&spec.data)?;
    if data.is_empty() {
        return Err(ConvertError::EmptyData);
    }
    let accounts = spec
        .accounts
        .iter()
        .map(convert_account)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Instruction {
        program_id,
        accounts,
        data,
    })
}

/// Flattens the response's instruction groups into the fixed assembly
/// order, tagging each descriptor with its group.
fn grouped(response: &SwapInstructionsResponse) -> Vec<(InstructionGroup, &InstructionSpec)> {
    let mut ordered = Vec::new();
    for spec in &response.compute_budget_instructions {
        ordered.push((InstructionGroup::ComputeBudget, spec));
    }
    for spec in &response.setup_instructions {
        ordered.push((InstructionGroup::Setup, spec));
    }
    ordered.push((InstructionGroup::Swap, &response.swap_instruction));
    if let Some(spec) = &response.cleanup_instruction {
        ordered.push((InstructionGroup::Cleanup, spec));
    }
    ordered
}

/// Produces the ordered instruction sequence for transaction assembly.
///
/// The count of returned instructions equals the count of usable
/// descriptors; unusable non-swap descriptors reduce the count without
/// failing translation.
pub fn translate_instructions(
    response: &SwapInstructionsResponse,
) -> Result<Vec<Instruction>, TranslateError> {
    let mut instructions = Vec::new();

    for (group, spec) in grouped(response) {
        match convert_instruction(spec) {
            Ok(instruction) => instructions.push(instruction),
            Err(e) if group == InstructionGroup::Swap => {
                return Err(TranslateError::InvalidSwapInstruction(e.to_string()));
            }
            Err(e) => warn!(
                "Skipping {} instruction for program {}: {}",
                group.label(),
                spec.program_id,
                e
            ),
        }
    }

    Ok(instructions)
}
