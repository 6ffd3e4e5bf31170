use anchor_lang::prelude::*;
use crate::{
    error::StakingError,
    events::{RewardsDistributionUpdated, RewardsDurationUpdated},
    state::Vault,
};

pub fn set_rewards_distribution_handler(
    ctx: Context<VaultAdmin>,
    rewards_distribution: Pubkey,
) -> Result<()> {
    let vault = &mut ctx.accounts.vault;
    vault.rewards_distribution = rewards_distribution;
    emit!(RewardsDistributionUpdated {
        vault: vault.key(),
        rewards_distribution,
    });
    msg!("Rewards distribution set: {}", rewards_distribution);
    Ok(())
}

/// Only between reward periods. A Locked vault's maturity does not move.
pub fn set_rewards_duration_handler(ctx: Context<VaultAdmin>, rewards_duration: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault = &mut ctx.accounts.vault;
    vault.rewards.set_rewards_duration(rewards_duration, now)?;
    emit!(RewardsDurationUpdated {
        vault: vault.key(),
        rewards_duration,
    });
    msg!("Rewards duration set: {}s", rewards_duration);
    Ok(())
}

#[derive(Accounts)]
pub struct VaultAdmin<'info> {
    pub owner: Signer<'info>,

    #[account(mut, has_one = owner @ StakingError::Unauthorized)]
    pub vault: Box<Account<'info, Vault>>,
}
