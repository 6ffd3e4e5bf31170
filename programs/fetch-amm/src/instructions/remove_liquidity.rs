use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};
use crate::{constants::*, curve, error::AmmError, state::Pool};

/// Burn LP shares and withdraw proportional tokens from the pool.
pub fn handler(
    ctx: Context<RemoveLiquidity>,
    lp_amount: u64,
    min_a: u64,
    min_b: u64,
) -> Result<()> {
    let (amount_a, amount_b) = curve::liquidity_to_withdraw(
        lp_amount,
        ctx.accounts.token_a_vault.amount,
        ctx.accounts.token_b_vault.amount,
        ctx.accounts.lp_mint.supply,
    )?;
    require!(amount_a >= min_a, AmmError::SlippageExceeded);
    require!(amount_b >= min_b, AmmError::SlippageExceeded);

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.lp_mint.to_account_info(),
                from: ctx.accounts.owner_lp.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        lp_amount,
    )?;

    let pool_key = ctx.accounts.pool.key();
    let seeds: &[&[u8]] = &[
        POOL_AUTHORITY_SEED,
        pool_key.as_ref(),
        &[ctx.accounts.pool.authority_bump],
    ];
    let signer = &[seeds];

    if amount_a > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.token_a_vault.to_account_info(),
                    to: ctx.accounts.owner_token_a.to_account_info(),
                    authority: ctx.accounts.pool_authority.to_account_info(),
                },
                signer,
            ),
            amount_a,
        )?;
    }
    if amount_b > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.token_b_vault.to_account_info(),
                    to: ctx.accounts.owner_token_b.to_account_info(),
                    authority: ctx.accounts.pool_authority.to_account_info(),
                },
                signer,
            ),
            amount_b,
        )?;
    }

    msg!("Liquidity removed: lp={} a={} b={}", lp_amount, amount_a, amount_b);
    Ok(())
}

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    pub owner: Signer<'info>,

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
        constraint = owner_lp.mint == pool.lp_mint @ AmmError::MintMismatch,
        constraint = owner_lp.owner == owner.key(),
    )]
    pub owner_lp: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = owner_token_a.mint == pool.token_a_mint @ AmmError::MintMismatch,
    )]
    pub owner_token_a: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = owner_token_b.mint == pool.token_b_mint @ AmmError::MintMismatch,
    )]
    pub owner_token_b: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
