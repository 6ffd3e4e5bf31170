use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use crate::{error::StakingError, events::RewardAdded, state::Vault};

/// Start a reward period for `amount`. The tokens must already sit in the
/// rewards vault; the new rate is checked against that balance.
pub fn handler(ctx: Context<NotifyRewardAmount>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let funded_balance = ctx.accounts.rewards_vault.amount;
    let vault = &mut ctx.accounts.vault;
    vault.rewards.notify_reward_amount(amount, funded_balance, now)?;

    emit!(RewardAdded {
        vault: vault.key(),
        amount,
        reward_rate: vault.rewards.reward_rate,
        period_finish: vault.rewards.period_finish,
    });
    msg!(
        "Reward added: amount={} rate={}/s finish={}",
        amount, vault.rewards.reward_rate, vault.rewards.period_finish
    );
    Ok(())
}

#[derive(Accounts)]
pub struct NotifyRewardAmount<'info> {
    pub rewards_distribution: Signer<'info>,

    #[account(
        mut,
        has_one = rewards_distribution @ StakingError::Unauthorized,
        has_one = rewards_vault @ StakingError::MintMismatch,
    )]
    pub vault: Box<Account<'info, Vault>>,

    pub rewards_vault: Box<Account<'info, TokenAccount>>,
}
