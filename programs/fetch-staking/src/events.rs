use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub staking_mint: Pubkey,
    pub rewards_mint: Pubkey,
    pub claimable: bool,
    pub matures_at: i64,
}

#[event]
pub struct Staked {
    pub vault: Pubkey,
    pub user: Pubkey,
    /// Signer whose tokens moved; differs from `user` for stake_for
    pub depositor: Pubkey,
    pub amount: u64,
    pub balance: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub balance: u64,
    pub total_staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardPaid {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct RewardAdded {
    pub vault: Pubkey,
    pub amount: u64,
    pub reward_rate: u64,
    pub period_finish: i64,
}

#[event]
pub struct RewardsDurationUpdated {
    pub vault: Pubkey,
    pub rewards_duration: i64,
}

#[event]
pub struct RewardsDistributionUpdated {
    pub vault: Pubkey,
    pub rewards_distribution: Pubkey,
}
