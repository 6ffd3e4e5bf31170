use anchor_lang::prelude::*;

/// PDA seeds
pub const ROUTER_SEED: &[u8] = b"router";
pub const ROUTER_AUTHORITY_SEED: &[u8] = b"router_authority";
pub const ROUTER_TOKEN_SEED: &[u8] = b"router_token";
pub const ROUTER_LP_SEED: &[u8] = b"router_lp";
pub const WSOL_ESCROW_SEED: &[u8] = b"wsol_escrow";

/// Share of every native deposit converted into project tokens
pub const CONVERSION_PERCENT: u64 = 50;

pub const DEFAULT_SALE_PERCENT: u8 = 50;
pub const DEFAULT_POOL_PERCENT: u8 = 50;
pub const DEFAULT_BURN_PERCENT: u8 = 10;
pub const MAX_BURN_PERCENT: u8 = 10;

pub const WSOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

/// Burned LP shares go to a token account owned by the incinerator
pub const INCINERATOR: Pubkey = pubkey!("1nc1nerator11111111111111111111111111111111");
