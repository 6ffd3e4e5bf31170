use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use fetch_amm::Pool;
use crate::{constants::*, error::SaleError, events::SaleInitialized, pricing, state::Sale};

/// Create the sale for `token_mint`, priced against `pool`.
/// Inventory is funded afterwards by plain token transfers into it.
pub fn handler(ctx: Context<InitializeSale>, beneficiary: Pubkey) -> Result<()> {
    let pool = &ctx.accounts.pool;
    // the pool must pair wSOL with the sale token
    pricing::native_reserves(pool, 0, 0)?;
    require!(
        pool.token_a_mint == ctx.accounts.token_mint.key()
            || pool.token_b_mint == ctx.accounts.token_mint.key(),
        SaleError::MintMismatch
    );

    let sale = &mut ctx.accounts.sale;
    sale.owner = ctx.accounts.owner.key();
    sale.token_mint = ctx.accounts.token_mint.key();
    sale.beneficiary = beneficiary;
    sale.pool = pool.key();
    sale.inventory = ctx.accounts.inventory.key();
    sale.authority_bump = ctx.bumps.sale_authority;
    sale.paused = false;
    sale.bump = ctx.bumps.sale;

    emit!(SaleInitialized {
        sale: sale.key(),
        token_mint: sale.token_mint,
        beneficiary,
        pool: sale.pool,
    });
    msg!("Sale created: mint={} beneficiary={}", sale.token_mint, beneficiary);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeSale<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_mint: Box<Account<'info, Mint>>,

    pub pool: Box<Account<'info, Pool>>,

    #[account(
        init,
        payer = owner,
        space = Sale::LEN,
        seeds = [SALE_SEED, token_mint.key().as_ref()],
        bump,
    )]
    pub sale: Box<Account<'info, Sale>>,

    /// CHECK: PDA authority over the inventory, holds no data
    #[account(
        seeds = [SALE_AUTHORITY_SEED, sale.key().as_ref()],
        bump,
    )]
    pub sale_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = owner,
        seeds = [INVENTORY_SEED, sale.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = sale_authority,
    )]
    pub inventory: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
