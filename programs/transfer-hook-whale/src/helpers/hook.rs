use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use anchor_spl::token_2022::spl_token_2022::{
    extension::{
        transfer_hook::TransferHookAccount, BaseStateWithExtensions, PodStateWithExtensions,
    },
    pod::PodAccount,
};
use spl_tlv_account_resolution::{account::ExtraAccountMeta, seeds::Seed};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::{MintConfig, WhaleLedger};

/// Extra accounts Token-2022 resolves for every Execute CPI, in order:
/// [5] mint_config, [6] whale_ledger, [7] rent_vault, [8] system program.
/// Each entry may only reference accounts that come before it.
///
/// mint_config is read-only: the only per-transfer writes go to the
/// destination's ledger and, on first sight of a destination, the rent vault.
pub fn extra_account_metas() -> Result<Vec<ExtraAccountMeta>> {
    Ok(vec![
        // [5] ["mint_config", mint]
        ExtraAccountMeta::new_with_seeds(
            &[
                Seed::Literal {
                    bytes: MINT_CONFIG_SEED.to_vec(),
                },
                Seed::AccountKey { index: MINT_INDEX },
            ],
            false,
            false,
        )?,
        // [6] ["whale_ledger", mint, destination_token]
        ExtraAccountMeta::new_with_seeds(
            &[
                Seed::Literal {
                    bytes: WHALE_LEDGER_SEED.to_vec(),
                },
                Seed::AccountKey { index: MINT_INDEX },
                Seed::AccountKey {
                    index: DESTINATION_TOKEN_INDEX,
                },
            ],
            false,
            true,
        )?,
        // [7] ["rent_vault", mint]
        ExtraAccountMeta::new_with_seeds(
            &[
                Seed::Literal {
                    bytes: RENT_VAULT_SEED.to_vec(),
                },
                Seed::AccountKey { index: MINT_INDEX },
            ],
            false,
            true,
        )?,
        // [8] system program, for lazy ledger creation
        ExtraAccountMeta::new_with_pubkey(&system_program::ID, false, false)?,
    ])
}

/// Reject calls that do not come from an in-flight Token-2022 transfer.
/// The runtime sets `transferring` on the source account for the duration
/// of the Execute CPI.
pub fn check_is_transferring(source_token: &AccountInfo) -> Result<()> {
    let data = source_token.try_borrow_data()?;
    let account = PodStateWithExtensions::<PodAccount>::unpack(&data)
        .map_err(|_| ErrorCode::NotTransferring)?;
    let extension = account
        .get_extension::<TransferHookAccount>()
        .map_err(|_| ErrorCode::NotTransferring)?;

    require!(
        bool::from(extension.transferring),
        ErrorCode::NotTransferring
    );
    Ok(())
}

/// Load the mint config, failing closed when it is absent.
pub fn load_mint_config(info: &AccountInfo) -> Result<MintConfig> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return err!(ErrorCode::ConfigMissing);
    }

    let data = info.try_borrow_data()?;
    let config = MintConfig::try_deserialize(&mut &data[..])
        .map_err(|_| error!(ErrorCode::ConfigMissing))?;
    require!(config.is_initialized, ErrorCode::ConfigMissing);

    Ok(config)
}

pub fn load_ledger(info: &AccountInfo) -> Result<WhaleLedger> {
    require_keys_eq!(*info.owner, crate::ID, ErrorCode::InvalidLedger);

    let data = info.try_borrow_data()?;
    WhaleLedger::try_deserialize(&mut &data[..]).map_err(|_| error!(ErrorCode::InvalidLedger))
}

/// Write an account struct (discriminator included) back into its buffer.
pub fn store_account<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    value.try_serialize(&mut writer)?;
    Ok(())
}

/// Lamports the rent vault must hand over to make `ledger` rent-exempt
/// at `space` bytes, while keeping the vault itself rent-exempt.
pub fn ledger_funding_shortfall(
    rent: &Rent,
    space: usize,
    ledger_lamports: u64,
    vault_lamports: u64,
) -> Result<u64> {
    let required = rent.minimum_balance(space).saturating_sub(ledger_lamports);
    let available = vault_lamports.saturating_sub(rent.minimum_balance(0));
    require!(available >= required, ErrorCode::RentVaultDepleted);
    Ok(required)
}

/// Create the ledger PDA on the transfer path, paid by the mint's rent vault.
///
/// Both PDAs sign through this program. An address that already holds
/// lamports cannot go through `create_account`, so it is topped up,
/// allocated and assigned instead.
#[inline(never)]
#[allow(clippy::too_many_arguments)]
pub fn create_ledger_account<'info>(
    ledger: &AccountInfo<'info>,
    rent_vault: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    mint: &Pubkey,
    subject: &Pubkey,
    ledger_bump: u8,
    vault_bump: u8,
) -> Result<()> {
    let space = 8 + WhaleLedger::LEN;
    let rent = Rent::get()?;
    let lamports =
        ledger_funding_shortfall(&rent, space, ledger.lamports(), rent_vault.lamports())?;

    let ledger_bump_seed = [ledger_bump];
    let vault_bump_seed = [vault_bump];
    let ledger_seeds: &[&[u8]] = &[
        WHALE_LEDGER_SEED,
        mint.as_ref(),
        subject.as_ref(),
        &ledger_bump_seed,
    ];
    let vault_seeds: &[&[u8]] = &[RENT_VAULT_SEED, mint.as_ref(), &vault_bump_seed];

    if ledger.lamports() == 0 {
        system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: rent_vault.clone(),
                    to: ledger.clone(),
                },
                &[vault_seeds, ledger_seeds],
            ),
            lamports,
            space as u64,
            &crate::ID,
        )?;
        return Ok(());
    }

    if lamports > 0 {
        system_program::transfer(
            CpiContext::new_with_signer(
                system_program.clone(),
                Transfer {
                    from: rent_vault.clone(),
                    to: ledger.clone(),
                },
                &[vault_seeds],
            ),
            lamports,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: ledger.clone(),
            },
            &[ledger_seeds],
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            Assign {
                account_to_assign: ledger.clone(),
            },
            &[ledger_seeds],
        ),
        &crate::ID,
    )?;

    Ok(())
}
