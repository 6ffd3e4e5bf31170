use anchor_lang::prelude::*;

// ─── Pool ──────────────────────────────────────────────────────────────────
// Constant-product pair (x * y = k).
// Authority is a PDA that owns both token vaults and the LP mint.
#[account]
pub struct Pool {
    /// PDA that owns token_a_vault, token_b_vault and lp_mint
    pub authority: Pubkey,          // 32
    pub authority_bump: u8,         // 1
    pub token_a_mint: Pubkey,       // 32
    pub token_b_mint: Pubkey,       // 32
    pub token_a_vault: Pubkey,      // 32
    pub token_b_vault: Pubkey,      // 32
    /// LP shares are an SPL mint so they can be staked, burned and transferred
    pub lp_mint: Pubkey,            // 32
    /// Trading fee rate in basis points (e.g. 30 = 0.30 %)
    pub fee_rate_bps: u16,          // 2
    pub bump: u8,                   // 1
}

impl Pool {
    // 8 discriminator + 32+1+32+32+32+32+32+2+1 = 204
    pub const LEN: usize = 204;

    /// Vault balances oriented for a swap direction: (reserve_in, reserve_out).
    pub fn oriented(reserve_a: u64, reserve_b: u64, a_to_b: bool) -> (u64, u64) {
        if a_to_b {
            (reserve_a, reserve_b)
        } else {
            (reserve_b, reserve_a)
        }
    }
}
