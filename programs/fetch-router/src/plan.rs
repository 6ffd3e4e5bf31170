use anchor_lang::prelude::*;
use fetch_amm::curve;
use crate::{constants::*, error::RouterError, state::SplitConfig};

/// How one native deposit is spent.
///
/// `sale_lamports` is paid by the depositor straight to the sale beneficiary,
/// `swap_lamports` is wrapped and swapped, `liquidity_lamports` stays wrapped
/// and is paired with the tokens. The three always sum to the deposit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DepositPlan {
    pub sale_lamports: u64,
    pub sale_tokens: u64,
    pub swap_lamports: u64,
    pub swap_tokens: u64,
    pub liquidity_lamports: u64,
}

impl DepositPlan {
    /// Lamports the router wraps (swap leg plus liquidity leg).
    pub fn wrapped_lamports(&self) -> u64 {
        self.swap_lamports + self.liquidity_lamports
    }
}

fn percent_of(amount: u64, percent: u64) -> Result<u64> {
    let part = (amount as u128)
        .checked_mul(percent as u128)
        .ok_or(RouterError::MathOverflow)?
        / 100;
    // part <= amount
    Ok(part as u64)
}

/// Split `lamports` across sale, swap and liquidity against the current
/// pool reserves. A conversion leg whose quote rounds to zero tokens is
/// folded back into liquidity instead of being spent for nothing.
pub fn plan_conversion(
    lamports: u64,
    split: &SplitConfig,
    reserve_native: u64,
    reserve_token: u64,
    fee_rate_bps: u16,
) -> Result<DepositPlan> {
    require!(lamports > 0, RouterError::ZeroDeposit);

    let conversion = percent_of(lamports, CONVERSION_PERCENT)?;
    let mut sale_lamports = percent_of(conversion, split.sale_percent as u64)?;
    let mut swap_lamports = conversion - sale_lamports;

    // The sale only reads reserves, so both legs price against the same pool state.
    let mut sale_tokens = 0;
    if sale_lamports > 0 {
        sale_tokens = curve::get_amount_out(sale_lamports, reserve_native, reserve_token, fee_rate_bps)?;
        if sale_tokens == 0 {
            sale_lamports = 0;
        }
    }
    let mut swap_tokens = 0;
    if swap_lamports > 0 {
        swap_tokens = curve::get_amount_out(swap_lamports, reserve_native, reserve_token, fee_rate_bps)?;
        if swap_tokens == 0 {
            swap_lamports = 0;
        }
    }

    Ok(DepositPlan {
        sale_lamports,
        sale_tokens,
        swap_lamports,
        swap_tokens,
        liquidity_lamports: lamports - sale_lamports - swap_lamports,
    })
}

/// LP shares minted for a deposit, split between the burn sink and the vault.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShareSplit {
    pub burn: u64,
    pub stake: u64,
}

pub fn split_shares(shares: u64, burn_percent: u8) -> Result<ShareSplit> {
    SplitConfig::validate_burn(burn_percent)?;
    let burn = percent_of(shares, burn_percent as u64)?;
    Ok(ShareSplit {
        burn,
        stake: shares - burn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000_000;

    fn split(sale_percent: u8, pool_percent: u8) -> SplitConfig {
        SplitConfig {
            sale_percent,
            pool_percent,
            ..SplitConfig::new(Pubkey::new_unique(), Pubkey::new_unique())
        }
    }

    #[test]
    fn plan_conserves_lamports() {
        for (sale, pool) in [(0u8, 100u8), (50, 50), (100, 0), (33, 67)] {
            let plan = plan_conversion(UNIT / 10, &split(sale, pool), 500 * UNIT, 500 * UNIT, 30)
                .unwrap();
            assert_eq!(
                plan.sale_lamports + plan.swap_lamports + plan.liquidity_lamports,
                UNIT / 10
            );
            assert_eq!(plan.liquidity_lamports, UNIT / 20);
        }
    }

    #[test]
    fn default_split_halves_the_conversion() {
        let plan = plan_conversion(UNIT / 10, &split(50, 50), 500 * UNIT, 500 * UNIT, 30).unwrap();
        assert_eq!(plan.sale_lamports, 25_000_000);
        assert_eq!(plan.swap_lamports, 25_000_000);
        assert_eq!(plan.sale_tokens, plan.swap_tokens);
        assert_eq!(plan.wrapped_lamports(), 75_000_000);
    }

    #[test]
    fn one_sided_splits_skip_the_other_leg() {
        let all_pool = plan_conversion(UNIT, &split(0, 100), 500 * UNIT, 500 * UNIT, 30).unwrap();
        assert_eq!(all_pool.sale_lamports, 0);
        assert_eq!(all_pool.sale_tokens, 0);
        assert_eq!(all_pool.swap_lamports, UNIT / 2);

        let all_sale = plan_conversion(UNIT, &split(100, 0), 500 * UNIT, 500 * UNIT, 30).unwrap();
        assert_eq!(all_sale.swap_lamports, 0);
        assert_eq!(all_sale.sale_lamports, UNIT / 2);
    }

    #[test]
    fn dust_legs_fold_into_liquidity() {
        // 3 lamports: conversion 1, sale 0, swap 1 which quotes to 0 tokens
        let plan = plan_conversion(3, &split(50, 50), 500 * UNIT, 500 * UNIT, 30).unwrap();
        assert_eq!(plan.sale_lamports, 0);
        assert_eq!(plan.swap_lamports, 0);
        assert_eq!(plan.liquidity_lamports, 3);
    }

    #[test]
    fn zero_deposit_rejected() {
        assert_eq!(
            plan_conversion(0, &split(50, 50), UNIT, UNIT, 30).unwrap_err(),
            error!(RouterError::ZeroDeposit)
        );
    }

    #[test]
    fn share_split_conserves_and_matches_ratio() {
        let ten = split_shares(12_345_678, 10).unwrap();
        assert_eq!(ten.burn + ten.stake, 12_345_678);
        assert!(ten.stake >= 9 * ten.burn && ten.stake - 9 * ten.burn < 10);

        let five = split_shares(12_345_678, 5).unwrap();
        assert_eq!(five.burn + five.stake, 12_345_678);
        assert!(five.stake >= 19 * five.burn && five.stake - 19 * five.burn < 20);

        for burn_percent in 1..=10u8 {
            let s = split_shares(999, burn_percent).unwrap();
            assert_eq!(s.burn + s.stake, 999);
        }
    }

    #[test]
    fn share_split_rejects_bad_percent() {
        assert_eq!(
            split_shares(1_000, 11).unwrap_err(),
            error!(RouterError::InvalidConfig)
        );
    }

    /// Replays a deposit against curve maths: 500/500 pool, 0.1 SOL + 0.1 token.
    #[test]
    fn seeded_pool_deposit_burns_and_stakes() {
        let (mut reserve_native, mut reserve_token, lp_supply) = (500 * UNIT, 500 * UNIT, 500 * UNIT);
        let user_tokens = UNIT / 10;

        let plan = plan_conversion(UNIT / 10, &split(50, 50), reserve_native, reserve_token, 30)
            .unwrap();
        reserve_native += plan.swap_lamports;
        reserve_token -= plan.swap_tokens;

        let token_side = user_tokens + plan.sale_tokens + plan.swap_tokens;
        let (native_in, token_in) = curve::optimal_amounts(
            plan.liquidity_lamports,
            token_side,
            0,
            0,
            reserve_native,
            reserve_token,
        )
        .unwrap();
        assert_eq!(native_in, plan.liquidity_lamports);
        assert!(token_in < token_side);

        let shares =
            curve::liquidity_to_mint(native_in, token_in, reserve_native, reserve_token, lp_supply)
                .unwrap();
        let split = split_shares(shares, 10).unwrap();
        assert!(split.burn > 0);
        assert!(split.stake > split.burn);
        assert!(split.stake - 9 * split.burn < 10);
    }
}
