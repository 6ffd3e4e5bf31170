use anchor_lang::prelude::*;

#[error_code]
pub enum SaleError {
    #[msg("Caller is not the sale owner")]
    Unauthorized,
    #[msg("Sale is paused")]
    Paused,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Sale inventory cannot cover this purchase")]
    InsufficientInventory,
    #[msg("Pool does not pair the sale token with wSOL")]
    MintMismatch,
}
