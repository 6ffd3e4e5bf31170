/// Fetch Router: turns a SOL deposit (optionally with project tokens) into a
/// burned and staked LP position in one instruction.
///
/// Half of the deposit is converted to project tokens, split between the
/// token sale and an AMM swap. Everything is added as liquidity; a slice of
/// the LP shares goes to the incinerator and the rest is staked in the chosen
/// vault on the depositor's behalf. Leftovers return to the depositor, so the
/// router never holds a balance between instructions.

use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name:             "Fetch Router",
    project_url:      "https://github.com/fetch-protocol/fetch",
    contacts:         "email:security@fetch-protocol.dev",
    policy:           "Please report security vulnerabilities by email. \
                       We aim to respond within 48 hours.",
    source_code:      "https://github.com/fetch-protocol/fetch",
    preferred_languages: "en"
}

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod plan;
pub mod state;

use anchor_lang::prelude::*;
pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("yyVAWDm5uaASce7Xo7dBY9kKsSY9J1BkWWiqtyw1wdb");

#[program]
pub mod fetch_router {
    use super::*;

    pub fn initialize_router(ctx: Context<InitializeRouter>) -> Result<()> {
        initialize_router::handler(ctx)
    }

    /// SOL only.
    pub fn deposit(ctx: Context<Deposit>, use_claimable_vault: bool, lamports: u64) -> Result<()> {
        deposit::deposit_handler(ctx, use_claimable_vault, lamports)
    }

    /// SOL plus `token_amount` project tokens from the caller.
    pub fn deposit_with_token(
        ctx: Context<Deposit>,
        use_claimable_vault: bool,
        lamports: u64,
        token_amount: u64,
    ) -> Result<()> {
        deposit::deposit_with_token_handler(ctx, use_claimable_vault, lamports, token_amount)
    }

    pub fn update_split(ctx: Context<RouterAdmin>, sale_percent: u8, pool_percent: u8) -> Result<()> {
        admin::update_split_handler(ctx, sale_percent, pool_percent)
    }

    pub fn update_burn_percent(ctx: Context<RouterAdmin>, burn_percent: u8) -> Result<()> {
        admin::update_burn_percent_handler(ctx, burn_percent)
    }

    pub fn change_stake_claimable(ctx: Context<ChangeStakeVault>) -> Result<()> {
        admin::change_stake_vault_handler(ctx, true)
    }

    pub fn change_stake_non_claimable(ctx: Context<ChangeStakeVault>) -> Result<()> {
        admin::change_stake_vault_handler(ctx, false)
    }
}
