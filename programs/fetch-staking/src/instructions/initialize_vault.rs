use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::{
    constants::*,
    engine::RewardState,
    error::StakingError,
    events::VaultInitialized,
    state::{Vault, VaultKind},
};

/// Deploy a vault. A Locked vault matures one rewards duration after deployment.
pub fn handler(ctx: Context<InitializeVault>, claimable: bool, rewards_duration: i64) -> Result<()> {
    require!(rewards_duration > 0, StakingError::InvalidDuration);
    let now = Clock::get()?.unix_timestamp;

    let vault = &mut ctx.accounts.vault;
    vault.owner = ctx.accounts.owner.key();
    vault.rewards_distribution = ctx.accounts.owner.key();
    vault.staking_mint = ctx.accounts.staking_mint.key();
    vault.rewards_mint = ctx.accounts.rewards_mint.key();
    vault.staking_vault = ctx.accounts.staking_vault.key();
    vault.rewards_vault = ctx.accounts.rewards_vault.key();
    vault.authority_bump = ctx.bumps.vault_authority;
    vault.kind = if claimable { VaultKind::Claimable } else { VaultKind::Locked };
    vault.deployed_at = now;
    vault.matures_at = now
        .checked_add(rewards_duration)
        .ok_or(StakingError::MathOverflow)?;
    vault.rewards = RewardState::new(rewards_duration);

    emit!(VaultInitialized {
        vault: vault.key(),
        owner: vault.owner,
        staking_mint: vault.staking_mint,
        rewards_mint: vault.rewards_mint,
        claimable,
        matures_at: vault.matures_at,
    });
    msg!(
        "Vault created: kind={:?} duration={}s matures_at={}",
        vault.kind, rewards_duration, vault.matures_at
    );
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(init, payer = owner, space = Vault::LEN)]
    pub vault: Box<Account<'info, Vault>>,

    /// LP mint of the pool being staked
    pub staking_mint: Box<Account<'info, Mint>>,
    pub rewards_mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA authority over the vault's token accounts, holds no data
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = owner,
        seeds = [STAKING_VAULT_SEED, vault.key().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = vault_authority,
    )]
    pub staking_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        seeds = [REWARDS_VAULT_SEED, vault.key().as_ref()],
        bump,
        token::mint = rewards_mint,
        token::authority = vault_authority,
    )]
    pub rewards_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
