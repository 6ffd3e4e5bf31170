use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};
use crate::{constants::*, curve, error::AmmError, state::Pool};

/// Add liquidity at the pool ratio and mint LP shares to `lp_recipient`.
/// The first depositor sets the price; later deposits are capped on the
/// side that exceeds the ratio, and the excess stays with the provider.
pub fn handler(
    ctx: Context<AddLiquidity>,
    amount_a_desired: u64,
    amount_b_desired: u64,
    amount_a_min: u64,
    amount_b_min: u64,
    deadline: i64,
) -> Result<()> {
    require!(
        Clock::get()?.unix_timestamp <= deadline,
        AmmError::Expired
    );
    require!(amount_a_desired > 0 && amount_b_desired > 0, AmmError::ZeroAmount);

    let reserve_a = ctx.accounts.token_a_vault.amount;
    let reserve_b = ctx.accounts.token_b_vault.amount;
    let lp_supply = ctx.accounts.lp_mint.supply;

    let (amount_a, amount_b) = curve::optimal_amounts(
        amount_a_desired,
        amount_b_desired,
        amount_a_min,
        amount_b_min,
        reserve_a,
        reserve_b,
    )?;
    let lp_minted = curve::liquidity_to_mint(amount_a, amount_b, reserve_a, reserve_b, lp_supply)?;
    require!(lp_minted > 0, AmmError::InsufficientLiquidity);

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.provider_token_a.to_account_info(),
                to: ctx.accounts.token_a_vault.to_account_info(),
                authority: ctx.accounts.provider.to_account_info(),
            },
        ),
        amount_a,
    )?;
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.provider_token_b.to_account_info(),
                to: ctx.accounts.token_b_vault.to_account_info(),
                authority: ctx.accounts.provider.to_account_info(),
            },
        ),
        amount_b,
    )?;

    let pool_key = ctx.accounts.pool.key();
    let seeds: &[&[u8]] = &[
        POOL_AUTHORITY_SEED,
        pool_key.as_ref(),
        &[ctx.accounts.pool.authority_bump],
    ];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.lp_mint.to_account_info(),
                to: ctx.accounts.lp_recipient.to_account_info(),
                authority: ctx.accounts.pool_authority.to_account_info(),
            },
            &[seeds],
        ),
        lp_minted,
    )?;

    msg!("Liquidity added: lp={} a={} b={}", lp_minted, amount_a, amount_b);
    Ok(())
}

#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    pub provider: Signer<'info>,

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

    #[account(
        mut,
        constraint = lp_mint.key() == pool.lp_mint @ AmmError::MintMismatch,
    )]
    pub lp_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        constraint = provider_token_a.mint == pool.token_a_mint @ AmmError::MintMismatch,
        constraint = provider_token_a.owner == provider.key(),
    )]
    pub provider_token_a: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = provider_token_b.mint == pool.token_b_mint @ AmmError::MintMismatch,
        constraint = provider_token_b.owner == provider.key(),
    )]
    pub provider_token_b: Box<Account<'info, TokenAccount>>,

    /// Receives the minted LP shares; any holder of the LP mint
    #[account(
        mut,
        constraint = lp_recipient.mint == pool.lp_mint @ AmmError::MintMismatch,
    )]
    pub lp_recipient: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
