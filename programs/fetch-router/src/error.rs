use anchor_lang::prelude::*;

#[error_code]
pub enum RouterError {
    #[msg("Caller is not the router owner")]
    Unauthorized,
    #[msg("Invalid router configuration")]
    InvalidConfig,
    #[msg("Deposit must include native currency")]
    ZeroDeposit,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Vault does not match the configured vault for this deposit")]
    VaultMismatch,
    #[msg("Account mint does not match router configuration")]
    MintMismatch,
    #[msg("Burn account must be an incinerator-owned LP account")]
    InvalidBurnAccount,
    #[msg("Math overflow")]
    MathOverflow,
}
