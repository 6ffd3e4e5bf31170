use anchor_lang::prelude::*;
use crate::{constants::*, error::RouterError};

/// Owner-mutable deposit split.
///
/// `sale_percent + pool_percent == 100` divides the converted share of a
/// deposit between the token sale and an AMM swap. `burn_percent` (1..=10)
/// of the minted LP shares is burned, the rest is staked for the depositor.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SplitConfig {
    pub sale_percent: u8,               // 1
    pub pool_percent: u8,               // 1
    pub burn_percent: u8,               // 1
    pub stake_claimable: Pubkey,        // 32
    pub stake_non_claimable: Pubkey,    // 32
}

impl SplitConfig {
    pub const LEN: usize = 3 + 2 * 32;

    pub fn new(stake_claimable: Pubkey, stake_non_claimable: Pubkey) -> Self {
        Self {
            sale_percent: DEFAULT_SALE_PERCENT,
            pool_percent: DEFAULT_POOL_PERCENT,
            burn_percent: DEFAULT_BURN_PERCENT,
            stake_claimable,
            stake_non_claimable,
        }
    }

    pub fn validate_split(sale_percent: u8, pool_percent: u8) -> Result<()> {
        require!(
            sale_percent as u16 + pool_percent as u16 == 100,
            RouterError::InvalidConfig
        );
        Ok(())
    }

    pub fn validate_burn(burn_percent: u8) -> Result<()> {
        require!(
            (1..=MAX_BURN_PERCENT).contains(&burn_percent),
            RouterError::InvalidConfig
        );
        Ok(())
    }

    pub fn vault_for(&self, use_claimable_vault: bool) -> Pubkey {
        if use_claimable_vault {
            self.stake_claimable
        } else {
            self.stake_non_claimable
        }
    }
}

// ─── RouterConfig ──────────────────────────────────────────────────────────
// One router per project token. The router authority PDA owns router_token,
// router_lp and every per-deposit wSOL escrow; all of them are empty between
// instructions.
#[account]
pub struct RouterConfig {
    pub owner: Pubkey,          // 32
    pub token_mint: Pubkey,     // 32
    /// fetch_amm::Pool pairing token_mint with wSOL
    pub pool: Pubkey,           // 32
    pub lp_mint: Pubkey,        // 32
    /// Pool side holding wSOL
    pub native_is_a: bool,      // 1
    pub sale: Pubkey,           // 32
    pub router_token: Pubkey,   // 32
    pub router_lp: Pubkey,      // 32
    pub split: SplitConfig,     // 67
    pub authority_bump: u8,     // 1
    pub bump: u8,               // 1
}

impl RouterConfig {
    // 8 discriminator + 7*32 + 1 + 67 + 1 + 1 = 302
    pub const LEN: usize = 8 + 7 * 32 + 1 + SplitConfig::LEN + 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_must_sum_to_hundred() {
        assert!(SplitConfig::validate_split(0, 100).is_ok());
        assert!(SplitConfig::validate_split(100, 0).is_ok());
        assert!(SplitConfig::validate_split(30, 70).is_ok());
        assert_eq!(
            SplitConfig::validate_split(50, 60).unwrap_err(),
            error!(RouterError::InvalidConfig)
        );
        assert_eq!(
            SplitConfig::validate_split(200, 156).unwrap_err(),
            error!(RouterError::InvalidConfig)
        );
    }

    #[test]
    fn burn_percent_bounds() {
        assert!(SplitConfig::validate_burn(1).is_ok());
        assert!(SplitConfig::validate_burn(10).is_ok());
        for bad in [0u8, 11, 100] {
            assert_eq!(
                SplitConfig::validate_burn(bad).unwrap_err(),
                error!(RouterError::InvalidConfig)
            );
        }
    }

    #[test]
    fn defaults_and_vault_selection() {
        let (claim, locked) = (Pubkey::new_unique(), Pubkey::new_unique());
        let split = SplitConfig::new(claim, locked);
        assert_eq!((split.sale_percent, split.pool_percent, split.burn_percent), (50, 50, 10));
        assert_eq!(split.vault_for(true), claim);
        assert_eq!(split.vault_for(false), locked);
    }
}
