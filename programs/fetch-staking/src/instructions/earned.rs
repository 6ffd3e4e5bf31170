use anchor_lang::prelude::*;
use crate::{constants::*, state::{StakeAccount, Vault}};

/// View: rewards `stake_account` could claim right now.
pub fn handler(ctx: Context<Earned>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .vault
        .rewards
        .earned(&ctx.accounts.stake_account.position, now)
}

#[derive(Accounts)]
pub struct Earned<'info> {
    pub vault: Box<Account<'info, Vault>>,

    #[account(
        seeds = [STAKE_SEED, vault.key().as_ref(), stake_account.owner.as_ref()],
        bump = stake_account.bump,
    )]
    pub stake_account: Box<Account<'info, StakeAccount>>,
}
