use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use super::withdraw::vault_transfer;
use crate::{
    constants::*,
    error::StakingError,
    events::RewardPaid,
    state::{StakeAccount, Vault},
};

/// Pay out accrued rewards. Succeeds with nothing transferred when nothing
/// is owed; a Locked vault refuses before maturity.
pub fn handler(ctx: Context<GetReward>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();
    let vault = &mut ctx.accounts.vault;
    let reward = vault.claim(&mut ctx.accounts.stake_account.position, now)?;
    if reward == 0 {
        msg!("No reward owed");
        return Ok(());
    }

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
        user: ctx.accounts.owner.key(),
        amount: reward,
        timestamp: now,
    });
    msg!("Reward paid: user={} amount={}", ctx.accounts.owner.key(), reward);
    Ok(())
}

#[derive(Accounts)]
pub struct GetReward<'info> {
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
        address = vault.rewards_vault @ StakingError::MintMismatch,
    )]
    pub rewards_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = owner_reward_account.mint == vault.rewards_mint @ StakingError::MintMismatch,
    )]
    pub owner_reward_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
