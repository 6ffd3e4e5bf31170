use anchor_lang::prelude::*;

#[event]
pub struct SaleInitialized {
    pub sale: Pubkey,
    pub token_mint: Pubkey,
    pub beneficiary: Pubkey,
    pub pool: Pubkey,
}

#[event]
pub struct TokensPurchased {
    pub buyer: Pubkey,
    pub recipient: Pubkey,
    pub lamports: u64,
    pub tokens: u64,
    pub timestamp: i64,
}

#[event]
pub struct SalePauseChanged {
    pub sale: Pubkey,
    pub paused: bool,
}

#[event]
pub struct BeneficiaryUpdated {
    pub sale: Pubkey,
    pub beneficiary: Pubkey,
}

#[event]
pub struct UnusedWithdrawn {
    pub sale: Pubkey,
    pub amount: u64,
}
