use anchor_lang::prelude::*;

use crate::constants::MIN_THRESHOLD;
use crate::errors::ErrorCode;

/// What the hook does when a transfer pushes a ledger over the threshold
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhalePolicy {
    /// Fail the transfer with ThresholdExceeded
    #[default]
    Reject,
    /// Let the transfer through, record the whale and emit an event
    Flag,
}

/// Per-mint whale configuration
///
/// One account per mint, created by `initialize` and never closed.
/// The hook only reads it, so transfers to different destinations
/// do not contend on this account.
///
/// PDA Seeds: ["mint_config", mint]
#[account]
#[derive(Default, Debug)]
pub struct MintConfig {
    /// Token mint this config governs
    pub mint: Pubkey,

    /// Identity allowed to administer this config
    pub authority: Pubkey,

    /// Two-step authority transfer: proposed new authority
    pub pending_authority: Option<Pubkey>,

    /// Whale threshold in base token units (always > 0)
    pub threshold: u64,

    /// Behaviour on threshold crossing
    pub policy: WhalePolicy,

    /// Set once by `initialize`
    pub is_initialized: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Timestamp of creation
    pub created_at: i64,

    /// Timestamp of the last administrative change
    pub updated_at: i64,

    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl MintConfig {
    /// Account size calculation:
    /// - 2 Pubkeys: 32 * 2 = 64 bytes (mint, authority)
    /// - 1 Option<Pubkey>: 33 bytes (pending_authority)
    /// - threshold: 8 bytes (u64)
    /// - 2 i64: 8 * 2 = 16 bytes (created_at, updated_at)
    /// - 3 u8/bool/enum: 3 bytes (policy, is_initialized, bump)
    /// - _reserved: 32 bytes
    /// Total: 64 + 33 + 8 + 16 + 3 + 32 = 156 bytes
    pub const LEN: usize = 32 * 2 + 33 + 8 + 8 * 2 + 3 + 32;

    pub fn validate_threshold(threshold: u64) -> Result<()> {
        require!(threshold >= MIN_THRESHOLD, ErrorCode::InvalidThreshold);
        Ok(())
    }

    /// Populate a freshly opened account. Fails if it was initialized before,
    /// leaving the stored values untouched.
    pub fn initialize(
        &mut self,
        mint: Pubkey,
        authority: Pubkey,
        threshold: u64,
        bump: u8,
        now: i64,
    ) -> Result<()> {
        require!(!self.is_initialized, ErrorCode::AlreadyInitialized);
        Self::validate_threshold(threshold)?;

        self.mint = mint;
        self.authority = authority;
        self.pending_authority = None;
        self.threshold = threshold;
        self.policy = WhalePolicy::Reject;
        self.is_initialized = true;
        self.bump = bump;
        self.created_at = now;
        self.updated_at = now;
        Ok(())
    }

    pub fn require_authority(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.authority, ErrorCode::Unauthorized);
        Ok(())
    }

    /// Returns the previous threshold.
    pub fn set_threshold(&mut self, signer: &Pubkey, new_threshold: u64, now: i64) -> Result<u64> {
        self.require_authority(signer)?;
        Self::validate_threshold(new_threshold)?;

        let old = self.threshold;
        self.threshold = new_threshold;
        self.updated_at = now;
        Ok(old)
    }

    pub fn set_policy(&mut self, signer: &Pubkey, policy: WhalePolicy, now: i64) -> Result<()> {
        self.require_authority(signer)?;
        self.policy = policy;
        self.updated_at = now;
        Ok(())
    }

    pub fn propose_authority(&mut self, signer: &Pubkey, proposed: Pubkey, now: i64) -> Result<()> {
        self.require_authority(signer)?;
        self.pending_authority = Some(proposed);
        self.updated_at = now;
        Ok(())
    }

    /// Returns the authority that was pending.
    pub fn cancel_authority_transfer(&mut self, signer: &Pubkey, now: i64) -> Result<Pubkey> {
        self.require_authority(signer)?;
        let pending = self
            .pending_authority
            .take()
            .ok_or(ErrorCode::NoPendingAuthority)?;
        self.updated_at = now;
        Ok(pending)
    }

    /// Returns the outgoing authority.
    pub fn accept_authority(&mut self, signer: &Pubkey, now: i64) -> Result<Pubkey> {
        let pending = self.pending_authority.ok_or(ErrorCode::NoPendingAuthority)?;
        require_keys_eq!(*signer, pending, ErrorCode::Unauthorized);

        let old = self.authority;
        self.authority = pending;
        self.pending_authority = None;
        self.updated_at = now;
        Ok(old)
    }
}
