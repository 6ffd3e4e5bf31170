/// Fetch Sale: sells project tokens from a fixed inventory at the AMM spot rate.
///
/// The price of `lamports` is what a swap of the same size on the bound pool
/// would return at that instant (reserves are read, nothing is swapped).
/// Lamports go straight to the beneficiary.

use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name:             "Fetch Sale",
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
pub mod pricing;
pub mod state;

use anchor_lang::prelude::*;
pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("3jVBPCyvbyhKthZTwzc3Xt1ozjWVQpAGtv5t2tm882JA");

#[program]
pub mod fetch_sale {
    use super::*;

    pub fn initialize_sale(ctx: Context<InitializeSale>, beneficiary: Pubkey) -> Result<()> {
        initialize_sale::handler(ctx, beneficiary)
    }

    /// Pay `lamports` to the beneficiary, receive tokens into `recipient`.
    pub fn buy(ctx: Context<Buy>, lamports: u64) -> Result<()> {
        buy::handler(ctx, lamports)
    }

    pub fn pause(ctx: Context<SaleAdmin>) -> Result<()> {
        admin::set_paused_handler(ctx, true)
    }

    pub fn unpause(ctx: Context<SaleAdmin>) -> Result<()> {
        admin::set_paused_handler(ctx, false)
    }

    pub fn update_beneficiary(ctx: Context<SaleAdmin>, beneficiary: Pubkey) -> Result<()> {
        admin::update_beneficiary_handler(ctx, beneficiary)
    }

    pub fn withdraw_unused(ctx: Context<WithdrawUnused>, amount: u64) -> Result<()> {
        admin::withdraw_unused_handler(ctx, amount)
    }

    pub fn get_sale_price(ctx: Context<GetSalePrice>, lamports: u64) -> Result<u64> {
        get_sale_price::handler(ctx, lamports)
    }
}
