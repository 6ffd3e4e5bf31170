use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, CloseAccount, Mint, SyncNative, Token, TokenAccount, Transfer};
use fetch_amm::{program::FetchAmm, Pool};
use fetch_sale::{program::FetchSale, Sale};
use fetch_staking::{program::FetchStaking, Vault};
use crate::{
    constants::*,
    error::RouterError,
    events::Deposited,
    plan,
    state::RouterConfig,
};

/// Native-only deposit.
pub fn deposit_handler(ctx: Context<Deposit>, use_claimable_vault: bool, lamports: u64) -> Result<()> {
    execute(ctx, use_claimable_vault, lamports, 0)
}

/// Native plus project-token deposit. The tokens are pulled from the
/// caller's account under the caller's signature and join the liquidity leg.
pub fn deposit_with_token_handler(
    ctx: Context<Deposit>,
    use_claimable_vault: bool,
    lamports: u64,
    token_amount: u64,
) -> Result<()> {
    require!(token_amount > 0, RouterError::ZeroAmount);
    execute(ctx, use_claimable_vault, lamports, token_amount)
}

/// The conversion pipeline shared by both entry points:
///
///   1. pull `token_amount` (token path only)
///   2. sale leg: caller pays the beneficiary, tokens land in router_token
///   3. wrap swap + liquidity lamports into the per-deposit wSOL escrow
///   4. swap leg: wSOL → router_token on the pool
///   5. add liquidity with everything held, LP shares land in router_lp
///   6. burn `burn_percent` of the shares, stake the rest for the caller
///   7. sweep router_token / router_lp to the caller, close the escrow to the caller
///
/// Every router-held balance is zero again when this returns.
fn execute(
    ctx: Context<Deposit>,
    use_claimable_vault: bool,
    lamports: u64,
    token_amount: u64,
) -> Result<()> {
    require!(lamports > 0, RouterError::ZeroDeposit);
    let accounts = ctx.accounts;
    let now = Clock::get()?.unix_timestamp;

    let config_key = accounts.config.key();
    let native_is_a = accounts.config.native_is_a;
    let split = accounts.config.split.clone();
    let bump = [accounts.config.authority_bump];
    let seeds: &[&[u8]] = &[ROUTER_AUTHORITY_SEED, config_key.as_ref(), &bump];
    let signer = &[seeds];

    // ── 1. Input normalisation ───────────────────────────────────────────────
    if token_amount > 0 {
        token::transfer(
            CpiContext::new(
                accounts.token_program.to_account_info(),
                Transfer {
                    from: accounts.user_token.to_account_info(),
                    to: accounts.router_token.to_account_info(),
                    authority: accounts.user.to_account_info(),
                },
            ),
            token_amount,
        )?;
    }

    let (reserve_native, reserve_token) = Pool::oriented(
        accounts.pool_token_a_vault.amount,
        accounts.pool_token_b_vault.amount,
        native_is_a,
    );
    let plan = plan::plan_conversion(
        lamports,
        &split,
        reserve_native,
        reserve_token,
        accounts.pool.fee_rate_bps,
    )?;

    // ── 2. Sale leg ──────────────────────────────────────────────────────────
    if plan.sale_lamports > 0 {
        fetch_sale::cpi::buy(
            CpiContext::new(
                accounts.sale_program.to_account_info(),
                fetch_sale::cpi::accounts::Buy {
                    buyer: accounts.user.to_account_info(),
                    sale: accounts.sale.to_account_info(),
                    sale_authority: accounts.sale_authority.to_account_info(),
                    inventory: accounts.sale_inventory.to_account_info(),
                    recipient: accounts.router_token.to_account_info(),
                    beneficiary: accounts.sale_beneficiary.to_account_info(),
                    pool: accounts.pool.to_account_info(),
                    pool_token_a_vault: accounts.pool_token_a_vault.to_account_info(),
                    pool_token_b_vault: accounts.pool_token_b_vault.to_account_info(),
                    token_program: accounts.token_program.to_account_info(),
                    system_program: accounts.system_program.to_account_info(),
                },
            ),
            plan.sale_lamports,
        )?;
    }

    // ── 3. Wrap ──────────────────────────────────────────────────────────────
    system_program::transfer(
        CpiContext::new(
            accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: accounts.user.to_account_info(),
                to: accounts.wsol_escrow.to_account_info(),
            },
        ),
        plan.wrapped_lamports(),
    )?;
    token::sync_native(CpiContext::new(
        accounts.token_program.to_account_info(),
        SyncNative {
            account: accounts.wsol_escrow.to_account_info(),
        },
    ))?;

    // ── 4. Swap leg ──────────────────────────────────────────────────────────
    if plan.swap_lamports > 0 {
        fetch_amm::cpi::swap_exact_tokens_for_tokens(
            CpiContext::new_with_signer(
                accounts.amm_program.to_account_info(),
                fetch_amm::cpi::accounts::Swap {
                    trader: accounts.router_authority.to_account_info(),
                    pool: accounts.pool.to_account_info(),
                    pool_authority: accounts.pool_authority.to_account_info(),
                    token_a_vault: accounts.pool_token_a_vault.to_account_info(),
                    token_b_vault: accounts.pool_token_b_vault.to_account_info(),
                    trader_token_in: accounts.wsol_escrow.to_account_info(),
                    trader_token_out: accounts.router_token.to_account_info(),
                    token_program: accounts.token_program.to_account_info(),
                },
                signer,
            ),
            plan.swap_lamports,
            // quoted against the same reserves in this instruction
            plan.swap_tokens,
            native_is_a,
            now,
        )?;
    }

    // ── 5. Liquidity ─────────────────────────────────────────────────────────
    accounts.wsol_escrow.reload()?;
    accounts.router_token.reload()?;
    let native_amount = accounts.wsol_escrow.amount;
    let token_side = accounts.router_token.amount;
    let (provider_token_a, provider_token_b, amount_a, amount_b) = if native_is_a {
        (
            accounts.wsol_escrow.to_account_info(),
            accounts.router_token.to_account_info(),
            native_amount,
            token_side,
        )
    } else {
        (
            accounts.router_token.to_account_info(),
            accounts.wsol_escrow.to_account_info(),
            token_side,
            native_amount,
        )
    };
    fetch_amm::cpi::add_liquidity(
        CpiContext::new_with_signer(
            accounts.amm_program.to_account_info(),
            fetch_amm::cpi::accounts::AddLiquidity {
                provider: accounts.router_authority.to_account_info(),
                pool: accounts.pool.to_account_info(),
                pool_authority: accounts.pool_authority.to_account_info(),
                token_a_vault: accounts.pool_token_a_vault.to_account_info(),
                token_b_vault: accounts.pool_token_b_vault.to_account_info(),
                lp_mint: accounts.lp_mint.to_account_info(),
                provider_token_a,
                provider_token_b,
                lp_recipient: accounts.router_lp.to_account_info(),
                token_program: accounts.token_program.to_account_info(),
            },
            signer,
        ),
        amount_a,
        amount_b,
        0,
        0,
        now,
    )?;

    // ── 6. Burn + stake ──────────────────────────────────────────────────────
    accounts.router_lp.reload()?;
    let shares = accounts.router_lp.amount;
    let shares_split = plan::split_shares(shares, split.burn_percent)?;

    if shares_split.burn > 0 {
        accounts.router_transfer(
            accounts.router_lp.to_account_info(),
            accounts.burn_lp.to_account_info(),
            shares_split.burn,
            signer,
        )?;
    }
    if shares_split.stake > 0 {
        fetch_staking::cpi::stake_for(
            CpiContext::new_with_signer(
                accounts.staking_program.to_account_info(),
                fetch_staking::cpi::accounts::StakeFor {
                    payer: accounts.user.to_account_info(),
                    depositor: accounts.router_authority.to_account_info(),
                    beneficiary: accounts.user.to_account_info(),
                    vault: accounts.vault.to_account_info(),
                    stake_account: accounts.stake_account.to_account_info(),
                    depositor_lp: accounts.router_lp.to_account_info(),
                    staking_vault: accounts.staking_vault.to_account_info(),
                    token_program: accounts.token_program.to_account_info(),
                    system_program: accounts.system_program.to_account_info(),
                },
                signer,
            ),
            shares_split.stake,
        )?;
    }

    // ── 7. Sweep ─────────────────────────────────────────────────────────────
    accounts.router_token.reload()?;
    let leftover_token = accounts.router_token.amount;
    if leftover_token > 0 {
        accounts.router_transfer(
            accounts.router_token.to_account_info(),
            accounts.user_token.to_account_info(),
            leftover_token,
            signer,
        )?;
    }
    accounts.router_lp.reload()?;
    let leftover_lp = accounts.router_lp.amount;
    if leftover_lp > 0 {
        accounts.router_transfer(
            accounts.router_lp.to_account_info(),
            accounts.user_lp.to_account_info(),
            leftover_lp,
            signer,
        )?;
    }
    // Remaining wSOL and the escrow rent both return to the caller as SOL
    token::close_account(CpiContext::new_with_signer(
        accounts.token_program.to_account_info(),
        CloseAccount {
            account: accounts.wsol_escrow.to_account_info(),
            destination: accounts.user.to_account_info(),
            authority: accounts.router_authority.to_account_info(),
        },
        signer,
    ))?;

    emit!(Deposited {
        user: accounts.user.key(),
        vault: accounts.vault.key(),
        claimable_vault: use_claimable_vault,
        lamports,
        token_amount,
        sale_lamports: plan.sale_lamports,
        swap_lamports: plan.swap_lamports,
        liquidity_lamports: plan.liquidity_lamports,
        shares,
        burned: shares_split.burn,
        staked: shares_split.stake,
        timestamp: now,
    });
    msg!(
        "Deposit: lamports={} tokens={} shares={} burned={} staked={}",
        lamports, token_amount, shares, shares_split.burn, shares_split.stake
    );
    Ok(())
}

impl<'info> Deposit<'info> {
    /// Token transfer out of a router-owned account.
    fn router_transfer(
        &self,
        from: AccountInfo<'info>,
        to: AccountInfo<'info>,
        amount: u64,
        signer: &[&[&[u8]]],
    ) -> Result<()> {
        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                Transfer {
                    from,
                    to,
                    authority: self.router_authority.to_account_info(),
                },
                signer,
            ),
            amount,
        )
    }
}

#[derive(Accounts)]
#[instruction(use_claimable_vault: bool)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        has_one = pool @ RouterError::InvalidConfig,
        has_one = lp_mint @ RouterError::MintMismatch,
        has_one = sale @ RouterError::InvalidConfig,
        has_one = router_token @ RouterError::InvalidConfig,
        has_one = router_lp @ RouterError::InvalidConfig,
    )]
    pub config: Box<Account<'info, RouterConfig>>,

    /// CHECK: PDA authority over the router's token accounts
    #[account(
        seeds = [ROUTER_AUTHORITY_SEED, config.key().as_ref()],
        bump = config.authority_bump,
    )]
    pub router_authority: UncheckedAccount<'info>,

    #[account(address = WSOL_MINT @ RouterError::MintMismatch)]
    pub wsol_mint: Box<Account<'info, Mint>>,

    /// Created per deposit and closed to the caller before returning
    #[account(
        init,
        payer = user,
        seeds = [WSOL_ESCROW_SEED, config.key().as_ref(), user.key().as_ref()],
        bump,
        token::mint = wsol_mint,
        token::authority = router_authority,
    )]
    pub wsol_escrow: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub router_token: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub router_lp: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = user_token.mint == config.token_mint @ RouterError::MintMismatch,
        constraint = user_token.owner == user.key(),
    )]
    pub user_token: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = user_lp.mint == config.lp_mint @ RouterError::MintMismatch,
        constraint = user_lp.owner == user.key(),
    )]
    pub user_lp: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = burn_lp.mint == config.lp_mint @ RouterError::InvalidBurnAccount,
        constraint = burn_lp.owner == INCINERATOR @ RouterError::InvalidBurnAccount,
    )]
    pub burn_lp: Box<Account<'info, TokenAccount>>,

    pub pool: Box<Account<'info, Pool>>,

    /// CHECK: verified by the AMM
    pub pool_authority: UncheckedAccount<'info>,

    #[account(mut, address = pool.token_a_vault @ RouterError::MintMismatch)]
    pub pool_token_a_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut, address = pool.token_b_vault @ RouterError::MintMismatch)]
    pub pool_token_b_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub lp_mint: Box<Account<'info, Mint>>,

    pub sale: Box<Account<'info, Sale>>,

    /// CHECK: verified by the sale program
    pub sale_authority: UncheckedAccount<'info>,

    /// CHECK: verified by the sale program
    #[account(mut)]
    pub sale_inventory: UncheckedAccount<'info>,

    /// CHECK: verified by the sale program
    #[account(mut)]
    pub sale_beneficiary: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = vault.key() == config.split.vault_for(use_claimable_vault) @ RouterError::VaultMismatch,
    )]
    pub vault: Box<Account<'info, Vault>>,

    /// CHECK: created or verified by the staking program
    #[account(mut)]
    pub stake_account: UncheckedAccount<'info>,

    /// CHECK: verified by the staking program
    #[account(mut)]
    pub staking_vault: UncheckedAccount<'info>,

    pub amm_program: Program<'info, FetchAmm>,
    pub sale_program: Program<'info, FetchSale>,
    pub staking_program: Program<'info, FetchStaking>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
