use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{
    constants::*,
    error::StakingError,
    events::Staked,
    state::{StakeAccount, Vault},
};

/// Credit `amount` to `beneficiary`'s position. State is updated before the
/// token transfer that funds it.
fn credit(
    vault: &mut Vault,
    vault_key: Pubkey,
    stake_account: &mut StakeAccount,
    beneficiary: Pubkey,
    bump: u8,
    amount: u64,
    now: i64,
) -> Result<()> {
    if stake_account.owner == Pubkey::default() {
        stake_account.owner = beneficiary;
        stake_account.vault = vault_key;
        stake_account.bump = bump;
    }
    vault.stake(&mut stake_account.position, amount, now)
}

pub fn stake_handler(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();
    let owner = ctx.accounts.owner.key();
    credit(
        &mut ctx.accounts.vault,
        vault_key,
        &mut ctx.accounts.stake_account,
        owner,
        ctx.bumps.stake_account,
        amount,
        now,
    )?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.owner_lp.to_account_info(),
                to: ctx.accounts.staking_vault.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(Staked {
        vault: vault_key,
        user: owner,
        depositor: owner,
        amount,
        balance: ctx.accounts.stake_account.position.balance,
        total_staked: ctx.accounts.vault.rewards.total_staked,
        timestamp: now,
    });
    msg!("Staked: user={} amount={}", owner, amount);
    Ok(())
}

/// Stake on behalf of `beneficiary`. The depositor's tokens move, the
/// beneficiary's position grows.
pub fn stake_for_handler(ctx: Context<StakeFor>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault_key = ctx.accounts.vault.key();
    let beneficiary = ctx.accounts.beneficiary.key();
    credit(
        &mut ctx.accounts.vault,
        vault_key,
        &mut ctx.accounts.stake_account,
        beneficiary,
        ctx.bumps.stake_account,
        amount,
        now,
    )?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor_lp.to_account_info(),
                to: ctx.accounts.staking_vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(Staked {
        vault: vault_key,
        user: beneficiary,
        depositor: ctx.accounts.depositor.key(),
        amount,
        balance: ctx.accounts.stake_account.position.balance,
        total_staked: ctx.accounts.vault.rewards.total_staked,
        timestamp: now,
    });
    msg!("Staked for: user={} amount={}", beneficiary, amount);
    Ok(())
}

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(mut)]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = StakeAccount::LEN,
        seeds = [STAKE_SEED, vault.key().as_ref(), owner.key().as_ref()],
        bump,
    )]
    pub stake_account: Box<Account<'info, StakeAccount>>,

    #[account(
        mut,
        constraint = owner_lp.mint == vault.staking_mint @ StakingError::MintMismatch,
        constraint = owner_lp.owner == owner.key(),
    )]
    pub owner_lp: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = vault.staking_vault @ StakingError::MintMismatch,
    )]
    pub staking_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct StakeFor<'info> {
    /// Pays rent if the beneficiary has no stake account yet
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Authority over `depositor_lp`; a PDA when called by the router
    pub depositor: Signer<'info>,

    /// CHECK: any wallet; only used as the stake account owner and seed
    pub beneficiary: UncheckedAccount<'info>,

    #[account(mut)]
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = StakeAccount::LEN,
        seeds = [STAKE_SEED, vault.key().as_ref(), beneficiary.key().as_ref()],
        bump,
    )]
    pub stake_account: Box<Account<'info, StakeAccount>>,

    #[account(
        mut,
        constraint = depositor_lp.mint == vault.staking_mint @ StakingError::MintMismatch,
        constraint = depositor_lp.owner == depositor.key(),
    )]
    pub depositor_lp: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = vault.staking_vault @ StakingError::MintMismatch,
    )]
    pub staking_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
