use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::{constants::*, curve, error::AmmError, state::Pool};

/// Exact-input constant-product swap: x * y = k.
///
/// The LP fee (pool.fee_rate_bps) is taken from amount_in and stays in the
/// input vault, growing k for every LP share holder.
///
///   1. trader_token_in → vault_in   : amount_in
///   2. vault_out → trader_token_out : amount_out (PDA-signed)
pub fn handler(
    ctx: Context<Swap>,
    amount_in: u64,
    min_amount_out: u64,
    a_to_b: bool,
    deadline: i64,
) -> Result<()> {
    require!(
        Clock::get()?.unix_timestamp <= deadline,
        AmmError::Expired
    );

    let pool = &ctx.accounts.pool;
    let (mint_in, mint_out) = if a_to_b {
        (pool.token_a_mint, pool.token_b_mint)
    } else {
        (pool.token_b_mint, pool.token_a_mint)
    };
    require_keys_eq!(ctx.accounts.trader_token_in.mint, mint_in, AmmError::MintMismatch);
    require_keys_eq!(ctx.accounts.trader_token_out.mint, mint_out, AmmError::MintMismatch);

    let (reserve_in, reserve_out) = Pool::oriented(
        ctx.accounts.token_a_vault.amount,
        ctx.accounts.token_b_vault.amount,
        a_to_b,
    );
    let amount_out = curve::get_amount_out(amount_in, reserve_in, reserve_out, pool.fee_rate_bps)?;

    require!(amount_out > 0, AmmError::InsufficientLiquidity);
    require!(amount_out >= min_amount_out, AmmError::SlippageExceeded);

    let pool_key = pool.key();
    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[pool.authority_bump]];
    let signer = &[seeds];

    let (vault_in, vault_out) = if a_to_b {
        (&ctx.accounts.token_a_vault, &ctx.accounts.token_b_vault)
    } else {
        (&ctx.accounts.token_b_vault, &ctx.accounts.token_a_vault)
    };

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.trader_token_in.to_account_info(),
                to: vault_in.to_account_info(),
                authority: ctx.accounts.trader.to_account_info(),
            },
        ),
        amount_in,
    )?;
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: vault_out.to_account_info(),
                to: ctx.accounts.trader_token_out.to_account_info(),
                authority: ctx.accounts.pool_authority.to_account_info(),
            },
            signer,
        ),
        amount_out,
    )?;

    msg!("Swap: in={} out={} a_to_b={}", amount_in, amount_out, a_to_b);
    Ok(())
}

#[derive(Accounts)]
pub struct Swap<'info> {
    pub trader: Signer<'info>,

    pub pool: Account<'info, Pool>,

    /// CHECK: PDA vault authority
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = token_a_vault.key() == pool.token_a_vault @ AmmError::MintMismatch,
    )]
    pub token_a_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = token_b_vault.key() == pool.token_b_vault @ AmmError::MintMismatch,
    )]
    pub token_b_vault: Box<Account<'info, TokenAccount>>,

    /// Token account the trader is selling from
    #[account(
        mut,
        constraint = trader_token_in.owner == trader.key(),
    )]
    pub trader_token_in: Box<Account<'info, TokenAccount>>,

    /// Receives the output; mint checked against the swap direction
    #[account(mut)]
    pub trader_token_out: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
