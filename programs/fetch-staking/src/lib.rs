/// Fetch Staking: LP-share vaults that stream project-token rewards.
///
/// A vault is either Claimable (rewards at any time) or Locked (rewards and
/// exit wait until one rewards duration after deployment). Both share one
/// reward engine; the kind is only a release policy.
///
///   initialize_vault          : deploy a vault and its PDA token accounts
///   stake / stake_for         : deposit LP shares for yourself or a beneficiary
///   withdraw                  : take LP shares back (never time-gated)
///   get_reward / exit         : claim, or withdraw everything and claim
///   notify_reward_amount      : start a reward period (rewards distribution)
///   set_rewards_distribution  : owner
///   set_rewards_duration      : owner, between periods
///   earned                    : view

use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name:             "Fetch Staking",
    project_url:      "https://github.com/fetch-protocol/fetch",
    contacts:         "email:security@fetch-protocol.dev",
    policy:           "Please report security vulnerabilities by email. \
                       We aim to respond within 48 hours.",
    source_code:      "https://github.com/fetch-protocol/fetch",
    preferred_languages: "en"
}

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;
pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("8KnjGSs2ztuH5kGUJdbtF9PtL7qEKEUb5utQv5NWNHZY");

#[program]
pub mod fetch_staking {
    use super::*;

    pub fn initialize_vault(
        ctx: Context<InitializeVault>,
        claimable: bool,
        rewards_duration: i64,
    ) -> Result<()> {
        initialize_vault::handler(ctx, claimable, rewards_duration)
    }

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        stake::stake_handler(ctx, amount)
    }

    /// Credits `beneficiary`; the router stakes LP shares for depositors this way.
    pub fn stake_for(ctx: Context<StakeFor>, amount: u64) -> Result<()> {
        stake::stake_for_handler(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        withdraw::handler(ctx, amount)
    }

    pub fn get_reward(ctx: Context<GetReward>) -> Result<()> {
        get_reward::handler(ctx)
    }

    pub fn exit(ctx: Context<Exit>) -> Result<()> {
        exit::handler(ctx)
    }

    pub fn set_rewards_distribution(
        ctx: Context<VaultAdmin>,
        rewards_distribution: Pubkey,
    ) -> Result<()> {
        admin::set_rewards_distribution_handler(ctx, rewards_distribution)
    }

    pub fn notify_reward_amount(ctx: Context<NotifyRewardAmount>, amount: u64) -> Result<()> {
        notify_reward_amount::handler(ctx, amount)
    }

    pub fn set_rewards_duration(ctx: Context<VaultAdmin>, rewards_duration: i64) -> Result<()> {
        admin::set_rewards_duration_handler(ctx, rewards_duration)
    }

    pub fn earned(ctx: Context<Earned>) -> Result<u64> {
        earned::handler(ctx)
    }
}
