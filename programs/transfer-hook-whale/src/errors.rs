use anchor_lang::prelude::*;

/// Transfer Hook Whale Error Codes
///
/// Every error aborts the enclosing instruction. When raised from the
/// transfer hook, Token-2022 fails the whole transfer.
#[error_code]
pub enum ErrorCode {
    // Config lifecycle
    #[msg("Mint config already initialized")]
    AlreadyInitialized,

    #[msg("Threshold must be greater than zero")]
    InvalidThreshold,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("No config for this mint - transfers are blocked")]
    ConfigMissing,

    // Hook decisions
    #[msg("Transfer would push destination volume over the whale threshold")]
    ThresholdExceeded,

    #[msg("Arithmetic overflow")]
    MathOverflow,

    #[msg("Hook invoked outside of a token transfer")]
    NotTransferring,

    #[msg("Rent vault cannot fund a new ledger entry")]
    RentVaultDepleted,

    // Account validation
    #[msg("No pending authority transfer")]
    NoPendingAuthority,

    #[msg("Invalid whale ledger account")]
    InvalidLedger,

    #[msg("Mint mismatch between accounts")]
    MintMismatch,
}
