/// PDA seeds
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const LP_MINT_SEED: &[u8] = b"lp_mint";

/// Default LP fee: 0.30 %
pub const FEE_RATE_DEFAULT_BPS: u16 = 30;

/// Denominator for basis-point math (u128 to avoid up-cast noise)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// LP mint decimals, matching the native mint
pub const LP_DECIMALS: u8 = 9;
