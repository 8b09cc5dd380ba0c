use anchor_lang::prelude::*;

use crate::state::WhalePolicy;

// ══════════════════════════════════════════════════════════════════════════════
// CONFIG EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a mint config is created
#[event]
pub struct ConfigInitialized {
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub threshold: u64,
    pub timestamp: i64,
}

/// Emitted when the whale threshold changes
#[event]
pub struct ThresholdUpdated {
    pub mint: Pubkey,
    pub old_threshold: u64,
    pub new_threshold: u64,
    pub timestamp: i64,
}

/// Emitted when the crossing policy changes
#[event]
pub struct PolicyUpdated {
    pub mint: Pubkey,
    pub policy: WhalePolicy,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// AUTHORITY EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when an authority transfer is proposed (two-step transfer)
#[event]
pub struct AuthorityTransferProposed {
    pub mint: Pubkey,
    pub current_authority: Pubkey,
    pub proposed_authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted when a pending authority transfer is cancelled
#[event]
pub struct AuthorityTransferCancelled {
    pub mint: Pubkey,
    pub cancelled_authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the proposed authority accepts
#[event]
pub struct AuthorityTransferred {
    pub mint: Pubkey,
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

// ══════════════════════════════════════════════════════════════════════════════
// LEDGER EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a ledger entry is created (lazily or via open_ledger)
#[event]
pub struct LedgerOpened {
    pub mint: Pubkey,
    pub subject: Pubkey,
    pub slot: u64,
}

/// Emitted when the authority zeroes a ledger entry
#[event]
pub struct LedgerReset {
    pub mint: Pubkey,
    pub subject: Pubkey,
    pub previous_volume: u64,
    pub reset_count: u32,
    pub timestamp: i64,
}

/// Emitted when the rent vault receives lamports
#[event]
pub struct RentVaultFunded {
    pub mint: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub balance: u64,
}

// ══════════════════════════════════════════════════════════════════════════════
// TRANSFER EVENTS
// ══════════════════════════════════════════════════════════════════════════════

/// Emitted when a transfer crosses the threshold under the Flag policy
#[event]
pub struct WhaleTransferDetected {
    pub mint: Pubkey,
    pub whale_address: Pubkey,
    pub destination: Pubkey,
    pub transfer_amount: u64,
    pub cumulative_volume: u64,
    pub threshold: u64,
    pub slot: u64,
}
