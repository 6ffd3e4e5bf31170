//! Fetch Rust SDK
//!
//! Client for the Fetch router on Solana: deposit SOL in one call and have
//! it converted, paired into the pool, burned and staked on your behalf.
//! Also covers the staking vaults and the token sale. No Anchor dependency.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fetch_sdk::{DepositParams, FetchClient};
//! use solana_sdk::{pubkey::Pubkey, signature::Keypair};
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router  = Pubkey::from_str("7Yx3X2fE6wFt7h3nHpU1bWJbAxBvJ4oG3zE8L6jQfBbd")?;
//!     let client  = FetchClient::devnet(router);
//!     let keypair = Keypair::new(); // use a funded keypair
//!
//!     let params = DepositParams {
//!         lamports:            100_000_000,
//!         token_amount:        None,
//!         use_claimable_vault: true,
//!     };
//!
//!     // 1. Preview against live reserves
//!     let preview = client.preview(&params).await?;
//!     println!("shares={} burned={} staked={}", preview.shares, preview.burned, preview.staked);
//!
//!     // 2. Deposit
//!     let result = client.deposit(&keypair, params).await?;
//!     println!("Deposited! tx: {}", result.signature);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`FetchClient::deposit`] | SOL (or SOL + token) deposit, LP burned and staked |
//! | [`FetchClient::preview`] | Off-chain walk-through of a deposit |
//! | [`FetchClient::position`] | Stake balance and earned rewards |
//! | [`FetchClient::stake`] | Stake LP shares held directly |
//! | [`FetchClient::withdraw`] | Unstake LP shares |
//! | [`FetchClient::get_reward`] | Claim rewards |
//! | [`FetchClient::exit`] | Unstake everything and claim |
//! | [`FetchClient::redeem`] | Burn LP shares for SOL and tokens |
//! | [`FetchClient::sale_price`] | Tokens the sale gives for an amount of SOL |
//! | [`FetchClient::buy`] | Buy from the sale directly |
//! | [`FetchClient::router_info`] | Split settings, reserves, sale inventory |
//! | [`FetchClient::notify_reward_amount`] | Start a reward period (distributor) |
//! | [`FetchClient::update_split`] / [`FetchClient::update_burn_percent`] | Router settings (owner) |

pub mod client;
pub mod error;
pub mod instructions;
pub mod math;
pub mod state;
pub mod types;

pub use client::FetchClient;
pub use error::{Error, Result};
pub use instructions::ProgramIds;
pub use types::*;
