use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::{MintConfig, WhaleLedger, WhalePolicy};

/// Outcome of a transfer that passed the policy check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferEvaluation {
    /// Ledger volume once the transfer is committed
    pub prospective_volume: u64,
    /// The transfer pushed the ledger over the threshold (Flag policy only)
    pub crosses_threshold: bool,
}

/// Apply the whale policy to one transfer without touching any state.
///
/// Equality with the threshold is allowed; only a strictly greater
/// prospective volume counts as a crossing.
pub fn evaluate_transfer(
    threshold: u64,
    policy: WhalePolicy,
    current_volume: u64,
    amount: u64,
) -> Result<TransferEvaluation> {
    let prospective_volume = current_volume
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    let crosses_threshold = prospective_volume > threshold;

    #[cfg(feature = "verbose")]
    msg!(
        "evaluate_transfer: current={}, amount={}, prospective={}, threshold={}",
        current_volume,
        amount,
        prospective_volume,
        threshold
    );

    if crosses_threshold && policy == WhalePolicy::Reject {
        return err!(ErrorCode::ThresholdExceeded);
    }

    Ok(TransferEvaluation {
        prospective_volume,
        crosses_threshold,
    })
}

/// Evaluate a transfer against `config` and commit it to `ledger`.
///
/// The ledger is written only when the transfer is accepted and moves
/// tokens; a rejected transfer returns the error with the ledger exactly
/// as it was. Zero-amount transfers are accepted without a write.
pub fn apply_transfer(
    config: &MintConfig,
    ledger: &mut WhaleLedger,
    amount: u64,
    slot: u64,
    now: i64,
) -> Result<TransferEvaluation> {
    require!(config.is_initialized, ErrorCode::ConfigMissing);
    require_keys_eq!(ledger.mint, config.mint, ErrorCode::MintMismatch);

    if amount == 0 {
        return Ok(TransferEvaluation {
            prospective_volume: ledger.cumulative_volume,
            crosses_threshold: false,
        });
    }

    let evaluation = evaluate_transfer(
        config.threshold,
        config.policy,
        ledger.cumulative_volume,
        amount,
    )?;
    ledger.record(evaluation.prospective_volume, slot, now)?;

    Ok(evaluation)
}
