use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    #[msg("Caller is not allowed to perform this action")]
    Unauthorized,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Withdraw exceeds staked balance")]
    InsufficientBalance,
    #[msg("Rewards are locked until the vault matures")]
    NotMatured,
    #[msg("Reward rate exceeds the rewards vault balance")]
    UnderFunded,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Reward period is still active")]
    RewardPeriodActive,
    #[msg("Rewards duration must be greater than zero")]
    InvalidDuration,
    #[msg("Token mint does not match vault")]
    MintMismatch,
}
