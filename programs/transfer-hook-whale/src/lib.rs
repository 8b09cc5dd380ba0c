#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use spl_discriminator::SplDiscriminate;
use spl_tlv_account_resolution::state::ExtraAccountMetaList;
use spl_transfer_hook_interface::instruction::ExecuteInstruction;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod state;

#[cfg(test)]
mod formal_verification;

pub use constants::*;
pub use contexts::*;
pub use errors::ErrorCode;
pub use events::*;
pub use helpers::*;
pub use state::*;

declare_id!("C5wGVxugHPB9VBZKZdSnPYXoVkxgfN1YnYtqF5V8Ljsu");

#[program]
pub mod transfer_hook_whale {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, threshold: u64, authority: Pubkey) -> Result<()> {
        let config = &mut ctx.accounts.mint_config;
        let clock = Clock::get()?;

        config.initialize(
            ctx.accounts.mint.key(),
            authority,
            threshold,
            ctx.bumps.mint_config,
            clock.unix_timestamp,
        )?;

        msg!(
            "Whale config initialized: mint={}, threshold={}",
            config.mint,
            config.threshold
        );

        emit!(ConfigInitialized {
            mint: config.mint,
            authority,
            threshold,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    // Update the whale threshold (authority only)
    pub fn update_threshold(ctx: Context<AuthorityControl>, new_threshold: u64) -> Result<()> {
        let config = &mut ctx.accounts.mint_config;
        let clock = Clock::get()?;

        let old_threshold =
            config.set_threshold(&ctx.accounts.authority.key(), new_threshold, clock.unix_timestamp)?;

        emit!(ThresholdUpdated {
            mint: config.mint,
            old_threshold,
            new_threshold,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    // Switch between rejecting and flagging threshold crossings (authority only)
    pub fn update_policy(ctx: Context<AuthorityControl>, policy: WhalePolicy) -> Result<()> {
        let config = &mut ctx.accounts.mint_config;
        let clock = Clock::get()?;

        config.set_policy(&ctx.accounts.authority.key(), policy, clock.unix_timestamp)?;

        emit!(PolicyUpdated {
            mint: config.mint,
            policy,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    pub fn propose_authority(ctx: Context<AuthorityControl>, new_authority: Pubkey) -> Result<()> {
        let config = &mut ctx.accounts.mint_config;
        let clock = Clock::get()?;

        config.propose_authority(&ctx.accounts.authority.key(), new_authority, clock.unix_timestamp)?;

        emit!(AuthorityTransferProposed {
            mint: config.mint,
            current_authority: config.authority,
            proposed_authority: new_authority,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    pub fn cancel_authority_transfer(ctx: Context<AuthorityControl>) -> Result<()> {
        let config = &mut ctx.accounts.mint_config;
        let clock = Clock::get()?;

        let cancelled_authority =
            config.cancel_authority_transfer(&ctx.accounts.authority.key(), clock.unix_timestamp)?;

        emit!(AuthorityTransferCancelled {
            mint: config.mint,
            cancelled_authority,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    pub fn accept_authority(ctx: Context<AcceptAuthority>) -> Result<()> {
        let config = &mut ctx.accounts.mint_config;
        let clock = Clock::get()?;

        let old_authority =
            config.accept_authority(&ctx.accounts.new_authority.key(), clock.unix_timestamp)?;

        emit!(AuthorityTransferred {
            mint: config.mint,
            old_authority,
            new_authority: config.authority,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    pub fn reset_ledger(ctx: Context<ResetLedger>) -> Result<()> {
        ctx.accounts
            .mint_config
            .require_authority(&ctx.accounts.authority.key())?;

        let ledger = &mut ctx.accounts.whale_ledger;
        let clock = Clock::get()?;
        let previous_volume = ledger.reset(clock.slot, clock.unix_timestamp)?;

        msg!(
            "Ledger reset: subject={}, cleared={}",
            ledger.subject,
            previous_volume
        );

        emit!(LedgerReset {
            mint: ledger.mint,
            subject: ledger.subject,
            previous_volume,
            reset_count: ledger.reset_count,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    pub fn initialize_extra_account_meta_list(
        ctx: Context<InitializeExtraAccountMetaList>,
    ) -> Result<()> {
        let account_metas = extra_account_metas()?;

        ExtraAccountMetaList::init::<ExecuteInstruction>(
            &mut ctx.accounts.extra_account_meta_list.try_borrow_mut_data()?,
            &account_metas,
        )?;

        msg!(
            "Extra account metas written for mint {}",
            ctx.accounts.mint.key()
        );

        Ok(())
    }

    pub fn fund_rent_vault(ctx: Context<FundRentVault>, lamports: u64) -> Result<()> {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.funder.to_account_info(),
                    to: ctx.accounts.rent_vault.to_account_info(),
                },
            ),
            lamports,
        )?;

        emit!(RentVaultFunded {
            mint: ctx.accounts.mint.key(),
            funder: ctx.accounts.funder.key(),
            amount: lamports,
            balance: ctx.accounts.rent_vault.lamports(),
        });

        Ok(())
    }

    pub fn open_ledger(ctx: Context<OpenLedger>) -> Result<()> {
        let ledger = &mut ctx.accounts.whale_ledger;

        // Idempotent: an entry that already exists keeps its totals
        if ledger.mint != Pubkey::default() {
            return Ok(());
        }

        let clock = Clock::get()?;
        ledger.set_inner(WhaleLedger::open(
            ctx.accounts.mint.key(),
            ctx.accounts.destination_token.key(),
            ctx.bumps.whale_ledger,
            clock.slot,
            clock.unix_timestamp,
        ));

        emit!(LedgerOpened {
            mint: ledger.mint,
            subject: ledger.subject,
            slot: clock.slot,
        });

        Ok(())
    }

    // Token-2022 CPIs this on every transfer of a mint that points at this program
    #[instruction(discriminator = ExecuteInstruction::SPL_DISCRIMINATOR_SLICE)]
    pub fn transfer_hook(ctx: Context<TransferHook>, amount: u64) -> Result<()> {
        let accounts = &ctx.accounts;
        check_is_transferring(&accounts.source_token.to_account_info())?;

        let config = load_mint_config(&accounts.mint_config.to_account_info())?;
        require_keys_eq!(config.mint, accounts.mint.key(), ErrorCode::MintMismatch);

        // Nothing to record, and no ledger rent to spend on it
        if amount == 0 {
            return Ok(());
        }

        let clock = Clock::get()?;
        let mint = accounts.mint.key();
        let destination = accounts.destination_token.key();
        let ledger_info = accounts.whale_ledger.to_account_info();

        let mut ledger = if ledger_info.data_is_empty() {
            create_ledger_account(
                &ledger_info,
                &accounts.rent_vault.to_account_info(),
                &accounts.system_program.to_account_info(),
                &mint,
                &destination,
                ctx.bumps.whale_ledger,
                ctx.bumps.rent_vault,
            )?;

            emit!(LedgerOpened {
                mint,
                subject: destination,
                slot: clock.slot,
            });

            WhaleLedger::open(
                mint,
                destination,
                ctx.bumps.whale_ledger,
                clock.slot,
                clock.unix_timestamp,
            )
        } else {
            load_ledger(&ledger_info)?
        };

        msg!("Transfer hook fired for an amount of {}", amount);

        let evaluation = apply_transfer(
            &config,
            &mut ledger,
            amount,
            clock.slot,
            clock.unix_timestamp,
        )?;

        if evaluation.crosses_threshold {
            // we have a whale!
            ledger.record_whale(accounts.owner.key(), amount)?;

            msg!(
                "Whale transfer: destination={}, volume={}, threshold={}",
                destination,
                evaluation.prospective_volume,
                config.threshold
            );

            emit!(WhaleTransferDetected {
                mint,
                whale_address: accounts.owner.key(),
                destination,
                transfer_amount: amount,
                cumulative_volume: evaluation.prospective_volume,
                threshold: config.threshold,
                slot: clock.slot,
            });
        }

        store_account(&ledger_info, &ledger)?;

        #[cfg(feature = "verbose")]
        msg!(
            "Ledger committed: subject={}, volume={}, transfers={}",
            ledger.subject,
            ledger.cumulative_volume,
            ledger.transfer_count
        );

        Ok(())
    }
}
