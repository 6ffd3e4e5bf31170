use anchor_lang::prelude::*;

// ─── Sale ──────────────────────────────────────────────────────────────────
// One sale per token mint. Inventory is a PDA token account owned by the
// sale authority; lamports from buyers go straight to the beneficiary.
#[account]
pub struct Sale {
    pub owner: Pubkey,          // 32
    pub token_mint: Pubkey,     // 32
    pub beneficiary: Pubkey,    // 32
    /// fetch_amm::Pool pairing token_mint with wSOL; the price source
    pub pool: Pubkey,           // 32
    pub inventory: Pubkey,      // 32
    pub authority_bump: u8,     // 1
    pub paused: bool,           // 1
    pub bump: u8,               // 1
}

impl Sale {
    // 8 discriminator + 5*32 + 1 + 1 + 1 = 171
    pub const LEN: usize = 171;
}
