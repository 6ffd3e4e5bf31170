use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use fetch_amm::Pool;
use crate::{error::SaleError, pricing, state::Sale};

/// View: tokens a `buy` of `lamports` would deliver right now.
pub fn handler(ctx: Context<GetSalePrice>, lamports: u64) -> Result<u64> {
    pricing::sale_price(
        lamports,
        &ctx.accounts.pool,
        ctx.accounts.pool_token_a_vault.amount,
        ctx.accounts.pool_token_b_vault.amount,
    )
}

#[derive(Accounts)]
pub struct GetSalePrice<'info> {
    pub sale: Box<Account<'info, Sale>>,

    #[account(address = sale.pool @ SaleError::MintMismatch)]
    pub pool: Box<Account<'info, Pool>>,

    #[account(address = pool.token_a_vault @ SaleError::MintMismatch)]
    pub pool_token_a_vault: Box<Account<'info, TokenAccount>>,

    #[account(address = pool.token_b_vault @ SaleError::MintMismatch)]
    pub pool_token_b_vault: Box<Account<'info, TokenAccount>>,
}
