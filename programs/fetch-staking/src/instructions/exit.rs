use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use super::withdraw::vault_transfer;
use crate::{
    constants::*,
    error::StakingError,
    events::{RewardPaid, Withdrawn},
    state::{StakeAccount, Vault},
};

/// Withdraw the full balance and claim rewards in one instruction.
/// Gated like get_reward, so a Locked vault refuses the whole exit before maturity.
pub fn handler(ctx: Context<Exit>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();
    let user = ctx.accounts.owner.key();
    let vault = &mut ctx.accounts.vault;
    let (amount, reward) = vault.exit_all(&mut ctx.accounts.stake_account.position, now)?;

    vault_transfer(
        &ctx.accounts.token_program,
        &ctx.accounts.staking_vault,
        &ctx.accounts.owner_lp,
        &ctx.accounts.vault_authority,
        vault_key,
        vault.authority_bump,
        amount,
    )?;
    emit!(Withdrawn {
        vault: vault_key,
        user,
        amount,
        balance: 0,
        total_staked: vault.rewards.total_staked,
        timestamp: now,
    });

    if reward > 0 {
        vault_transfer(
            &ctx.accounts.token_program,
            &ctx.accounts.rewards_vault,
            &ctx.accounts.owner_reward_account,
            &ctx.accounts.vault_authority,
            vault_key,
            vault.authority_bump,
            reward,
        )?;
        emit!(RewardPaid {
            vault: vault_key,
            user,
            amount: reward,
            timestamp: now,
        });
    }

    msg!("Exit: user={} withdrawn={} reward={}", user, amount, reward);
    Ok(())
}

#[derive(Accounts)]
pub struct Exit<'info> {
    pub owner: Signer<'info>,

    #[account(mut)]
    pub vault: Box<Account<'info, Vault>>,

    /// CHECK: PDA authority over the vault's token accounts
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump = vault.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [STAKE_SEED, vault.key().as_ref(), owner.key().as_ref()],
        bump = stake_account.bump,
        has_one = owner @ StakingError::Unauthorized,
        has_one = vault @ StakingError::Unauthorized,
    )]
    pub stake_account: Box<Account<'info, StakeAccount>>,

    #[account(
        mut,
        address = vault.staking_vault @ StakingError::MintMismatch,
    )]
    pub staking_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = vault.rewards_vault @ StakingError::MintMismatch,
    )]
    pub rewards_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = owner_lp.mint == vault.staking_mint @ StakingError::MintMismatch,
    )]
    pub owner_lp: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = owner_reward_account.mint == vault.rewards_mint @ StakingError::MintMismatch,
    )]
    pub owner_reward_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
