use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use fetch_amm::Pool;
use fetch_sale::Sale;
use fetch_staking::{Vault, VaultKind};
use crate::{
    constants::*,
    error::RouterError,
    events::RouterInitialized,
    state::{RouterConfig, SplitConfig},
};

/// Bind a project token's pool, sale and both vaults to a new router.
/// Starts with the default split: 50 sale / 50 pool, 10 % burn.
pub fn handler(ctx: Context<InitializeRouter>) -> Result<()> {
    let token_mint = ctx.accounts.token_mint.key();
    let pool = &ctx.accounts.pool;
    let native_is_a = if pool.token_a_mint == WSOL_MINT && pool.token_b_mint == token_mint {
        true
    } else if pool.token_b_mint == WSOL_MINT && pool.token_a_mint == token_mint {
        false
    } else {
        return err!(RouterError::MintMismatch);
    };

    let claimable = &ctx.accounts.stake_claimable;
    let locked = &ctx.accounts.stake_non_claimable;
    for (vault, kind) in [(claimable, VaultKind::Claimable), (locked, VaultKind::Locked)] {
        require!(vault.kind == kind, RouterError::InvalidConfig);
        require_keys_eq!(vault.staking_mint, pool.lp_mint, RouterError::MintMismatch);
    }

    let config = &mut ctx.accounts.config;
    config.owner = ctx.accounts.owner.key();
    config.token_mint = token_mint;
    config.pool = pool.key();
    config.lp_mint = pool.lp_mint;
    config.native_is_a = native_is_a;
    config.sale = ctx.accounts.sale.key();
    config.router_token = ctx.accounts.router_token.key();
    config.router_lp = ctx.accounts.router_lp.key();
    config.split = SplitConfig::new(claimable.key(), locked.key());
    config.authority_bump = ctx.bumps.router_authority;
    config.bump = ctx.bumps.config;

    emit!(RouterInitialized {
        config: config.key(),
        owner: config.owner,
        token_mint,
        pool: config.pool,
        sale: config.sale,
        stake_claimable: config.split.stake_claimable,
        stake_non_claimable: config.split.stake_non_claimable,
    });
    msg!("Router created: mint={} pool={} native_is_a={}", token_mint, config.pool, native_is_a);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRouter<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_mint: Box<Account<'info, Mint>>,

    pub pool: Box<Account<'info, Pool>>,

    #[account(address = pool.lp_mint @ RouterError::MintMismatch)]
    pub lp_mint: Box<Account<'info, Mint>>,

    #[account(
        constraint = sale.token_mint == token_mint.key() @ RouterError::MintMismatch,
        constraint = sale.pool == pool.key() @ RouterError::InvalidConfig,
    )]
    pub sale: Box<Account<'info, Sale>>,

    pub stake_claimable: Box<Account<'info, Vault>>,
    pub stake_non_claimable: Box<Account<'info, Vault>>,

    #[account(
        init,
        payer = owner,
        space = RouterConfig::LEN,
        seeds = [ROUTER_SEED, token_mint.key().as_ref()],
        bump,
    )]
    pub config: Box<Account<'info, RouterConfig>>,

    /// CHECK: PDA authority over the router's token accounts, holds no data
    #[account(
        seeds = [ROUTER_AUTHORITY_SEED, config.key().as_ref()],
        bump,
    )]
    pub router_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = owner,
        seeds = [ROUTER_TOKEN_SEED, config.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = router_authority,
    )]
    pub router_token: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = owner,
        seeds = [ROUTER_LP_SEED, config.key().as_ref()],
        bump,
        token::mint = lp_mint,
        token::authority = router_authority,
    )]
    pub router_lp: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
