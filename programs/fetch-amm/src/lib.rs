/// Fetch AMM: constant-product pair whose LP shares are an SPL mint.
///
/// 4 instructions:
///   initialize_pool              : create the pair, its vaults and its LP mint
///   add_liquidity                : deposit at the optimal ratio, mint LP shares
///   remove_liquidity             : burn LP shares, withdraw proportional reserves
///   swap_exact_tokens_for_tokens : exact-input x*y=k swap
///
/// Reserves are the vault balances and total supply is the LP mint supply, so
/// any program holding a `Pool` reference can quote without an extra call.

// ─── Security contact ─────────────────────────────────────────────────────────

use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name:             "Fetch AMM",
    project_url:      "https://github.com/fetch-protocol/fetch",
    contacts:         "email:security@fetch-protocol.dev",
    policy:           "Please report security vulnerabilities by email. \
                       We aim to respond within 48 hours.",
    source_code:      "https://github.com/fetch-protocol/fetch",
    preferred_languages: "en"
}

pub mod constants;
pub mod curve;
pub mod error;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;
pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("AgJHCK35ytS5JjZeFv71Kz99K31ay3E5RwyV2HJcMGGt");

#[program]
pub mod fetch_amm {
    use super::*;

    /// Create a pair. PDA controls both vaults and the LP mint.
    pub fn initialize_pool(ctx: Context<InitializePool>, fee_rate_bps: u16) -> Result<()> {
        initialize_pool::handler(ctx, fee_rate_bps)
    }

    /// Deposit at the pool ratio and mint LP shares to `lp_recipient`.
    pub fn add_liquidity(
        ctx: Context<AddLiquidity>,
        amount_a_desired: u64,
        amount_b_desired: u64,
        amount_a_min: u64,
        amount_b_min: u64,
        deadline: i64,
    ) -> Result<()> {
        add_liquidity::handler(
            ctx,
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
            deadline,
        )
    }

    /// Burn LP shares and withdraw proportional tokens.
    pub fn remove_liquidity(
        ctx: Context<RemoveLiquidity>,
        lp_amount: u64,
        min_a: u64,
        min_b: u64,
    ) -> Result<()> {
        remove_liquidity::handler(ctx, lp_amount, min_a, min_b)
    }

    /// Exact-input swap; output goes to `trader_token_out`.
    pub fn swap_exact_tokens_for_tokens(
        ctx: Context<Swap>,
        amount_in: u64,
        min_amount_out: u64,
        a_to_b: bool,
        deadline: i64,
    ) -> Result<()> {
        swap::handler(ctx, amount_in, min_amount_out, a_to_b, deadline)
    }
}
