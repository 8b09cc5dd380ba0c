use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// Running transfer volume received by one destination token account
///
/// Created on the first transfer into the account (or ahead of time via
/// `open_ledger`) and only ever grows, except through `reset_ledger`.
///
/// PDA Seeds: ["whale_ledger", mint, destination_token]
#[account]
#[derive(Default, Debug)]
pub struct WhaleLedger {
    /// Mint whose transfers are counted
    pub mint: Pubkey,

    /// Destination token account being tracked
    pub subject: Pubkey,

    /// Sum of accepted transfer amounts since the last reset
    pub cumulative_volume: u64,

    /// Accepted transfers since the last reset
    pub transfer_count: u64,

    /// Administrative resets (lifetime)
    pub reset_count: u32,

    /// Slot of last modification
    pub last_update_slot: u64,

    /// Timestamp of last modification
    pub last_update_timestamp: i64,

    /// Threshold crossings let through under the Flag policy (lifetime)
    pub flagged_transfers: u64,

    /// Owner (or delegate) behind the last flagged transfer
    pub last_whale: Pubkey,

    /// Amount of the last flagged transfer
    pub last_whale_amount: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Reserved for future use
    pub _reserved: [u8; 16],
}

impl WhaleLedger {
    /// Account size calculation:
    /// - mint, subject, last_whale: 32 * 3 = 96 bytes
    /// - cumulative_volume, transfer_count, last_update_slot: 8 * 3 = 24 bytes
    /// - flagged_transfers, last_whale_amount: 8 * 2 = 16 bytes
    /// - last_update_timestamp: 8 bytes (i64)
    /// - reset_count: 4 bytes (u32)
    /// - bump: 1 byte
    /// - _reserved: 16 bytes
    /// Total: 165 bytes
    pub const LEN: usize = 32 * 3 + 8 * 3 + 8 * 2 + 8 + 4 + 1 + 16;

    /// Fresh entry with zero volume
    pub fn open(mint: Pubkey, subject: Pubkey, bump: u8, slot: u64, now: i64) -> Self {
        Self {
            mint,
            subject,
            bump,
            last_update_slot: slot,
            last_update_timestamp: now,
            ..Self::default()
        }
    }

    /// Commit an accepted transfer. Volume never moves backwards here.
    pub fn record(&mut self, new_volume: u64, slot: u64, now: i64) -> Result<()> {
        require!(new_volume >= self.cumulative_volume, ErrorCode::InvalidLedger);

        self.cumulative_volume = new_volume;
        self.transfer_count = self
            .transfer_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        self.last_update_slot = slot;
        self.last_update_timestamp = now;
        Ok(())
    }

    /// Zero the running totals. Returns the volume that was cleared.
    pub fn reset(&mut self, slot: u64, now: i64) -> Result<u64> {
        let previous = self.cumulative_volume;
        self.cumulative_volume = 0;
        self.transfer_count = 0;
        self.reset_count = self
            .reset_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        self.last_update_slot = slot;
        self.last_update_timestamp = now;
        Ok(previous)
    }

    /// Bookkeeping for a crossing let through under the Flag policy
    pub fn record_whale(&mut self, whale: Pubkey, amount: u64) -> Result<()> {
        self.flagged_transfers = self
            .flagged_transfers
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        self.last_whale = whale;
        self.last_whale_amount = amount;
        Ok(())
    }
}
