use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    error::StakingError,
    events::Withdrawn,
    state::{StakeAccount, Vault},
};

/// Transfer out of one of the vault's token accounts, signed by the vault authority.
pub(crate) fn vault_transfer<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    vault_authority: &UncheckedAccount<'info>,
    vault_key: Pubkey,
    authority_bump: u8,
    amount: u64,
) -> Result<()> {
    let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, vault_key.as_ref(), &[authority_bump]];
    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to: to.to_account_info(),
                authority: vault_authority.to_account_info(),
            },
            &[seeds],
        ),
        amount,
    )
}

/// Withdraw staked LP shares. Never time-gated, in either vault kind.
pub fn handler(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();
    let vault = &mut ctx.accounts.vault;
    vault.withdraw(&mut ctx.accounts.stake_account.position, amount, now)?;

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
        user: ctx.accounts.owner.key(),
        amount,
        balance: ctx.accounts.stake_account.position.balance,
        total_staked: vault.rewards.total_staked,
        timestamp: now,
    });
    msg!("Withdrawn: user={} amount={}", ctx.accounts.owner.key(), amount);
    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
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
        constraint = owner_lp.mint == vault.staking_mint @ StakingError::MintMismatch,
    )]
    pub owner_lp: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
