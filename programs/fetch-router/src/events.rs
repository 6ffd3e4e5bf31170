use anchor_lang::prelude::*;

#[event]
pub struct RouterInitialized {
    pub config: Pubkey,
    pub owner: Pubkey,
    pub token_mint: Pubkey,
    pub pool: Pubkey,
    pub sale: Pubkey,
    pub stake_claimable: Pubkey,
    pub stake_non_claimable: Pubkey,
}

/// One per successful deposit / deposit_with_token
#[event]
pub struct Deposited {
    pub user: Pubkey,
    pub vault: Pubkey,
    pub claimable_vault: bool,
    pub lamports: u64,
    pub token_amount: u64,
    pub sale_lamports: u64,
    pub swap_lamports: u64,
    pub liquidity_lamports: u64,
    pub shares: u64,
    pub burned: u64,
    pub staked: u64,
    pub timestamp: i64,
}

#[event]
pub struct SplitUpdated {
    pub config: Pubkey,
    pub sale_percent: u8,
    pub pool_percent: u8,
}

#[event]
pub struct BurnPercentUpdated {
    pub config: Pubkey,
    pub burn_percent: u8,
}

#[event]
pub struct StakeVaultUpdated {
    pub config: Pubkey,
    pub claimable: bool,
    pub vault: Pubkey,
}
