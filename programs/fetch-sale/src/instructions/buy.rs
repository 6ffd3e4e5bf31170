use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use fetch_amm::Pool;
use crate::{
    constants::*,
    error::SaleError,
    events::TokensPurchased,
    pricing,
    state::Sale,
};

/// Buy tokens at the pool spot rate.
///
///   1. buyer → beneficiary  : lamports (system transfer)
///   2. inventory → recipient : tokens (PDA-signed)
///
/// The recipient may be any token account of the sale mint; the router
/// buys into its own PDA account this way.
pub fn handler(ctx: Context<Buy>, lamports: u64) -> Result<()> {
    let sale = &ctx.accounts.sale;
    require!(!sale.paused, SaleError::Paused);

    let tokens = pricing::sale_price(
        lamports,
        &ctx.accounts.pool,
        ctx.accounts.pool_token_a_vault.amount,
        ctx.accounts.pool_token_b_vault.amount,
    )?;
    require!(tokens > 0, SaleError::ZeroAmount);
    require!(
        ctx.accounts.inventory.amount >= tokens,
        SaleError::InsufficientInventory
    );

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.buyer.to_account_info(),
                to: ctx.accounts.beneficiary.to_account_info(),
            },
        ),
        lamports,
    )?;

    let sale_key = sale.key();
    let seeds: &[&[u8]] = &[SALE_AUTHORITY_SEED, sale_key.as_ref(), &[sale.authority_bump]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.inventory.to_account_info(),
                to: ctx.accounts.recipient.to_account_info(),
                authority: ctx.accounts.sale_authority.to_account_info(),
            },
            &[seeds],
        ),
        tokens,
    )?;

    emit!(TokensPurchased {
        buyer: ctx.accounts.buyer.key(),
        recipient: ctx.accounts.recipient.key(),
        lamports,
        tokens,
        timestamp: Clock::get()?.unix_timestamp,
    });
    msg!("Sale: lamports={} tokens={}", lamports, tokens);
    Ok(())
}

#[derive(Accounts)]
pub struct Buy<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    pub sale: Box<Account<'info, Sale>>,

    /// CHECK: PDA authority over the inventory
    #[account(
        seeds = [SALE_AUTHORITY_SEED, sale.key().as_ref()],
        bump = sale.authority_bump,
    )]
    pub sale_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = sale.inventory @ SaleError::MintMismatch,
    )]
    pub inventory: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = recipient.mint == sale.token_mint @ SaleError::MintMismatch,
    )]
    pub recipient: Box<Account<'info, TokenAccount>>,

    /// CHECK: receives lamports only; pinned to the stored beneficiary
    #[account(mut, address = sale.beneficiary @ SaleError::Unauthorized)]
    pub beneficiary: UncheckedAccount<'info>,

    #[account(address = sale.pool @ SaleError::MintMismatch)]
    pub pool: Box<Account<'info, Pool>>,

    #[account(address = pool.token_a_vault @ SaleError::MintMismatch)]
    pub pool_token_a_vault: Box<Account<'info, TokenAccount>>,

    #[account(address = pool.token_b_vault @ SaleError::MintMismatch)]
    pub pool_token_b_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
