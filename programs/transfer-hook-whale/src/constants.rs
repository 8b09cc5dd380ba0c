// ══════════════════════════════════════════════════════════════════════════════
// PDA SEEDS
// ══════════════════════════════════════════════════════════════════════════════

/// Per-mint configuration PDA seed: ["mint_config", mint]
pub const MINT_CONFIG_SEED: &[u8] = b"mint_config";

/// Per-destination ledger PDA seed: ["whale_ledger", mint, destination_token]
pub const WHALE_LEDGER_SEED: &[u8] = b"whale_ledger";

/// Per-mint rent vault PDA seed: ["rent_vault", mint]
/// System-owned, pays for ledger entries created on the transfer path.
pub const RENT_VAULT_SEED: &[u8] = b"rent_vault";

/// ExtraAccountMetaList PDA seed, fixed by the transfer hook interface
pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";

// ══════════════════════════════════════════════════════════════════════════════
// EXECUTE ACCOUNT LAYOUT
// ══════════════════════════════════════════════════════════════════════════════
// [0] source token   [1] mint   [2] destination token   [3] owner/delegate
// [4] extra account meta list, then the extra accounts below.

/// Index of the mint in the Execute instruction
pub const MINT_INDEX: u8 = 1;

/// Index of the destination token account in the Execute instruction
pub const DESTINATION_TOKEN_INDEX: u8 = 2;

/// Number of extra accounts declared in the meta list
/// (mint_config, whale_ledger, rent_vault, system_program)
pub const EXTRA_ACCOUNT_COUNT: usize = 4;

// ══════════════════════════════════════════════════════════════════════════════
// OPERATIONAL LIMITS
// ══════════════════════════════════════════════════════════════════════════════

/// Smallest accepted whale threshold (base units)
pub const MIN_THRESHOLD: u64 = 1;
