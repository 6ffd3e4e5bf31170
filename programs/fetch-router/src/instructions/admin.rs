use anchor_lang::prelude::*;
use fetch_staking::{Vault, VaultKind};
use crate::{
    error::RouterError,
    events::{BurnPercentUpdated, SplitUpdated, StakeVaultUpdated},
    state::{RouterConfig, SplitConfig},
};

pub fn update_split_handler(ctx: Context<RouterAdmin>, sale_percent: u8, pool_percent: u8) -> Result<()> {
    SplitConfig::validate_split(sale_percent, pool_percent)?;
    let config = &mut ctx.accounts.config;
    config.split.sale_percent = sale_percent;
    config.split.pool_percent = pool_percent;
    emit!(SplitUpdated {
        config: config.key(),
        sale_percent,
        pool_percent,
    });
    msg!("Split updated: sale={}% pool={}%", sale_percent, pool_percent);
    Ok(())
}

pub fn update_burn_percent_handler(ctx: Context<RouterAdmin>, burn_percent: u8) -> Result<()> {
    SplitConfig::validate_burn(burn_percent)?;
    let config = &mut ctx.accounts.config;
    config.split.burn_percent = burn_percent;
    emit!(BurnPercentUpdated {
        config: config.key(),
        burn_percent,
    });
    msg!("Burn percent updated: {}%", burn_percent);
    Ok(())
}

/// Point one of the two vault slots at a new vault of the matching kind.
pub fn change_stake_vault_handler(ctx: Context<ChangeStakeVault>, claimable: bool) -> Result<()> {
    let vault = &ctx.accounts.vault;
    let expected = if claimable { VaultKind::Claimable } else { VaultKind::Locked };
    require!(vault.kind == expected, RouterError::InvalidConfig);

    let config = &mut ctx.accounts.config;
    require_keys_eq!(vault.staking_mint, config.lp_mint, RouterError::MintMismatch);
    if claimable {
        config.split.stake_claimable = vault.key();
    } else {
        config.split.stake_non_claimable = vault.key();
    }

    emit!(StakeVaultUpdated {
        config: config.key(),
        claimable,
        vault: vault.key(),
    });
    msg!("Stake vault updated: claimable={} vault={}", claimable, vault.key());
    Ok(())
}

#[derive(Accounts)]
pub struct RouterAdmin<'info> {
    pub owner: Signer<'info>,

    #[account(mut, has_one = owner @ RouterError::Unauthorized)]
    pub config: Box<Account<'info, RouterConfig>>,
}

#[derive(Accounts)]
pub struct ChangeStakeVault<'info> {
    pub owner: Signer<'info>,

    #[account(mut, has_one = owner @ RouterError::Unauthorized)]
    pub config: Box<Account<'info, RouterConfig>>,

    pub vault: Box<Account<'info, Vault>>,
}
