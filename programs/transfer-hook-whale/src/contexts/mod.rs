use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token_interface::{Mint, TokenAccount};
use spl_tlv_account_resolution::state::ExtraAccountMetaList;

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::*;

// ACCOUNTS - Instruction account validation structs

/// Only the mint authority may configure a mint that still has one.
///
/// An existing config always passes so that a repeated `initialize`
/// reaches the handler and fails with AlreadyInitialized.
pub fn can_configure(
    config_initialized: bool,
    mint_authority: &COption<Pubkey>,
    signer: &Pubkey,
) -> bool {
    if config_initialized {
        return true;
    }
    match mint_authority {
        COption::Some(authority) => authority == signer,
        COption::None => true,
    }
}

/// Initialize - create the per-mint config
///
/// Opened with init_if_needed so that a second call reaches the handler
/// and fails with AlreadyInitialized instead of a system program error.
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + MintConfig::LEN,
        seeds = [MINT_CONFIG_SEED, mint.key().as_ref()],
        bump
    )]
    pub mint_config: Account<'info, MintConfig>,
    #[account(constraint = can_configure(
            mint_config.is_initialized,
            &mint.mint_authority,
            &payer.key()
        ) @ ErrorCode::Unauthorized)]
    pub mint: InterfaceAccount<'info, Mint>,
    #[account(mut)]
    pub payer: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// AuthorityControl - config changes signed by the current authority
///
/// The signer is checked against the stored authority by the MintConfig
/// methods, so a wrong signer surfaces as Unauthorized.
#[derive(Accounts)]
pub struct AuthorityControl<'info> {
    #[account(
        mut,
        seeds = [MINT_CONFIG_SEED, mint_config.mint.as_ref()],
        bump = mint_config.bump
    )]
    pub mint_config: Account<'info, MintConfig>,
    pub authority: Signer<'info>,
}

/// AcceptAuthority - proposed authority accepts the transfer (two-step transfer)
#[derive(Accounts)]
pub struct AcceptAuthority<'info> {
    #[account(
        mut,
        seeds = [MINT_CONFIG_SEED, mint_config.mint.as_ref()],
        bump = mint_config.bump
    )]
    pub mint_config: Account<'info, MintConfig>,
    pub new_authority: Signer<'info>,
}

/// ResetLedger - authority zeroes one destination's running volume
#[derive(Accounts)]
pub struct ResetLedger<'info> {
    #[account(
        seeds = [MINT_CONFIG_SEED, mint_config.mint.as_ref()],
        bump = mint_config.bump
    )]
    pub mint_config: Account<'info, MintConfig>,
    #[account(
        mut,
        seeds = [WHALE_LEDGER_SEED, mint_config.mint.as_ref(), whale_ledger.subject.as_ref()],
        bump = whale_ledger.bump,
        constraint = whale_ledger.mint == mint_config.mint @ ErrorCode::MintMismatch
    )]
    pub whale_ledger: Account<'info, WhaleLedger>,
    pub authority: Signer<'info>,
}

/// InitializeExtraAccountMetaList - declare the hook's extra accounts for a mint
#[derive(Accounts)]
pub struct InitializeExtraAccountMetaList<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    /// CHECK: ExtraAccountMetaList Account, must use these exact seeds
    #[account(
        init,
        payer = payer,
        space = ExtraAccountMetaList::size_of(EXTRA_ACCOUNT_COUNT)?,
        seeds = [EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()],
        bump
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,
    pub mint: InterfaceAccount<'info, Mint>,
    pub system_program: Program<'info, System>,
}

/// FundRentVault - top up the lamports used for lazily created ledgers
#[derive(Accounts)]
pub struct FundRentVault<'info> {
    #[account(mut, seeds = [RENT_VAULT_SEED, mint.key().as_ref()], bump)]
    pub rent_vault: SystemAccount<'info>,
    pub mint: InterfaceAccount<'info, Mint>,
    #[account(mut)]
    pub funder: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// OpenLedger - pre-create a destination's ledger at the payer's expense
#[derive(Accounts)]
pub struct OpenLedger<'info> {
    #[account(
        seeds = [MINT_CONFIG_SEED, mint.key().as_ref()],
        bump = mint_config.bump,
        constraint = mint_config.is_initialized @ ErrorCode::ConfigMissing
    )]
    pub mint_config: Account<'info, MintConfig>,
    pub mint: InterfaceAccount<'info, Mint>,
    #[account(token::mint = mint)]
    pub destination_token: InterfaceAccount<'info, TokenAccount>,
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + WhaleLedger::LEN,
        seeds = [WHALE_LEDGER_SEED, mint.key().as_ref(), destination_token.key().as_ref()],
        bump
    )]
    pub whale_ledger: Account<'info, WhaleLedger>,
    #[account(mut)]
    pub payer: Signer<'info>,
    pub system_program: Program<'info, System>,
}

/// TransferHook - accounts of the SPL transfer hook Execute instruction
///
/// Order matters. The first five are fixed by the interface
/// (source, mint, destination, owner, meta list); the rest are resolved
/// by Token-2022 from the ExtraAccountMetaList.
///
/// mint_config and whale_ledger are unchecked so that a missing config
/// maps to ConfigMissing and a missing ledger can be created in place.
#[derive(Accounts)]
pub struct TransferHook<'info> {
    #[account(token::mint = mint)]
    pub source_token: InterfaceAccount<'info, TokenAccount>,
    pub mint: InterfaceAccount<'info, Mint>,
    #[account(token::mint = mint)]
    pub destination_token: InterfaceAccount<'info, TokenAccount>,
    /// CHECK: source token owner or delegate, can be SystemAccount or PDA owned by another program
    pub owner: UncheckedAccount<'info>,
    /// CHECK: ExtraAccountMetaList Account
    #[account(seeds = [EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()], bump)]
    pub extra_account_meta_list: UncheckedAccount<'info>,
    /// CHECK: MintConfig PDA, loaded manually (fail-closed when absent)
    #[account(seeds = [MINT_CONFIG_SEED, mint.key().as_ref()], bump)]
    pub mint_config: UncheckedAccount<'info>,
    /// CHECK: WhaleLedger PDA, created on first transfer into destination_token
    #[account(
        mut,
        seeds = [WHALE_LEDGER_SEED, mint.key().as_ref(), destination_token.key().as_ref()],
        bump
    )]
    pub whale_ledger: UncheckedAccount<'info>,
    #[account(mut, seeds = [RENT_VAULT_SEED, mint.key().as_ref()], bump)]
    pub rent_vault: SystemAccount<'info>,
    pub system_program: Program<'info, System>,
}
