use anchor_lang::prelude::*;

/// PDA seeds
pub const SALE_SEED: &[u8] = b"sale";
pub const SALE_AUTHORITY_SEED: &[u8] = b"sale_authority";
pub const INVENTORY_SEED: &[u8] = b"inventory";

/// SPL native mint; the sale is priced against the wSOL side of the pool
pub const WSOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");
