use anchor_lang::prelude::*;
use crate::{constants::*, error::AmmError};

// ─── Quoting ───────────────────────────────────────────────────────────────
// Shared by add_liquidity, swap and every program that prices against a pool
// (the sale reads reserves and calls get_amount_out without swapping).

/// Amount of B equivalent to `amount_a` at the current reserve ratio.
pub fn quote(amount_a: u64, reserve_a: u64, reserve_b: u64) -> Result<u64> {
    require!(amount_a > 0, AmmError::ZeroAmount);
    require!(reserve_a > 0 && reserve_b > 0, AmmError::InsufficientLiquidity);
    let amount_b = (amount_a as u128)
        .checked_mul(reserve_b as u128)
        .ok_or(AmmError::MathOverflow)?
        / reserve_a as u128;
    u64::try_from(amount_b).map_err(|_| error!(AmmError::MathOverflow))
}

/// Constant-product output for an exact input, fee taken from the input:
/// `out = in·(1−fee)·r_out / (r_in + in·(1−fee))`.
pub fn get_amount_out(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_rate_bps: u16,
) -> Result<u64> {
    require!(amount_in > 0, AmmError::ZeroAmount);
    require!(reserve_in > 0 && reserve_out > 0, AmmError::InsufficientLiquidity);

    let in_with_fee = (amount_in as u128)
        .checked_mul(BPS_DENOMINATOR - fee_rate_bps as u128)
        .ok_or(AmmError::MathOverflow)?;
    let numerator = in_with_fee
        .checked_mul(reserve_out as u128)
        .ok_or(AmmError::MathOverflow)?;
    let denominator = (reserve_in as u128)
        .checked_mul(BPS_DENOMINATOR)
        .ok_or(AmmError::MathOverflow)?
        .checked_add(in_with_fee)
        .ok_or(AmmError::MathOverflow)?;

    // out < reserve_out, so the cast cannot truncate
    Ok((numerator / denominator) as u64)
}

/// Amounts actually deposited for a desired pair, keeping the pool ratio.
/// An empty pool takes both desired amounts and the depositor sets the price.
pub fn optimal_amounts(
    amount_a_desired: u64,
    amount_b_desired: u64,
    amount_a_min: u64,
    amount_b_min: u64,
    reserve_a: u64,
    reserve_b: u64,
) -> Result<(u64, u64)> {
    if reserve_a == 0 && reserve_b == 0 {
        return Ok((amount_a_desired, amount_b_desired));
    }

    let amount_b_optimal = quote(amount_a_desired, reserve_a, reserve_b)?;
    if amount_b_optimal <= amount_b_desired {
        require!(amount_b_optimal >= amount_b_min, AmmError::SlippageExceeded);
        return Ok((amount_a_desired, amount_b_optimal));
    }

    let amount_a_optimal = quote(amount_b_desired, reserve_b, reserve_a)?;
    // amount_b_optimal > desired implies a_optimal <= a_desired
    require!(amount_a_optimal <= amount_a_desired, AmmError::MathOverflow);
    require!(amount_a_optimal >= amount_a_min, AmmError::SlippageExceeded);
    Ok((amount_a_optimal, amount_b_desired))
}

/// LP shares minted for a deposit of (amount_a, amount_b).
/// First deposit: sqrt(a·b). Afterwards: the smaller proportional share.
pub fn liquidity_to_mint(
    amount_a: u64,
    amount_b: u64,
    reserve_a: u64,
    reserve_b: u64,
    lp_supply: u64,
) -> Result<u64> {
    let minted = if lp_supply == 0 {
        let product = (amount_a as u128)
            .checked_mul(amount_b as u128)
            .ok_or(AmmError::MathOverflow)?;
        isqrt(product)
    } else {
        require!(reserve_a > 0 && reserve_b > 0, AmmError::InsufficientLiquidity);
        let lp_a = (amount_a as u128)
            .checked_mul(lp_supply as u128)
            .ok_or(AmmError::MathOverflow)?
            / reserve_a as u128;
        let lp_b = (amount_b as u128)
            .checked_mul(lp_supply as u128)
            .ok_or(AmmError::MathOverflow)?
            / reserve_b as u128;
        lp_a.min(lp_b)
    };
    u64::try_from(minted).map_err(|_| error!(AmmError::MathOverflow))
}

/// Reserve amounts returned for burning `lp_amount` shares.
pub fn liquidity_to_withdraw(
    lp_amount: u64,
    reserve_a: u64,
    reserve_b: u64,
    lp_supply: u64,
) -> Result<(u64, u64)> {
    require!(lp_amount > 0, AmmError::ZeroAmount);
    require!(lp_supply >= lp_amount, AmmError::InsufficientLiquidity);
    let amount_a = (lp_amount as u128)
        .checked_mul(reserve_a as u128)
        .ok_or(AmmError::MathOverflow)?
        / lp_supply as u128;
    let amount_b = (lp_amount as u128)
        .checked_mul(reserve_b as u128)
        .ok_or(AmmError::MathOverflow)?
        / lp_supply as u128;
    Ok((amount_a as u64, amount_b as u64))
}

// ─── Integer square root (Babylonian method) ──────────────────────────────
pub fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = (x + 1) >> 1;
    while y < x {
        x = y;
        y = (y + n / y) >> 1;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000_000;

    #[test]
    fn isqrt_matches_perfect_squares() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        let big = (500 * UNIT) as u128;
        assert_eq!(isqrt(big * big), big);
    }

    #[test]
    fn first_deposit_mints_geometric_mean() {
        let lp = liquidity_to_mint(500 * UNIT, 500 * UNIT, 0, 0, 0).unwrap();
        assert_eq!(lp, 500 * UNIT);
    }

    #[test]
    fn later_deposit_mints_smaller_ratio() {
        // 10% of reserve A, 5% of reserve B → 5% of supply
        let lp = liquidity_to_mint(50 * UNIT, 25 * UNIT, 500 * UNIT, 500 * UNIT, 500 * UNIT)
            .unwrap();
        assert_eq!(lp, 25 * UNIT);
    }

    #[test]
    fn optimal_amounts_caps_the_excess_side() {
        let (a, b) =
            optimal_amounts(UNIT, 3 * UNIT, 0, 0, 500 * UNIT, 500 * UNIT).unwrap();
        assert_eq!((a, b), (UNIT, UNIT));

        let (a, b) =
            optimal_amounts(3 * UNIT, UNIT, 0, 0, 500 * UNIT, 500 * UNIT).unwrap();
        assert_eq!((a, b), (UNIT, UNIT));
    }

    #[test]
    fn optimal_amounts_respects_minimums() {
        let err = optimal_amounts(UNIT, 3 * UNIT, 0, 2 * UNIT, 500 * UNIT, 500 * UNIT)
            .unwrap_err();
        assert_eq!(err, error!(AmmError::SlippageExceeded));
    }

    #[test]
    fn empty_pool_takes_desired_amounts() {
        let (a, b) = optimal_amounts(7, 11, 0, 0, 0, 0).unwrap();
        assert_eq!((a, b), (7, 11));
    }

    #[test]
    fn amount_out_applies_fee_before_curve() {
        // 1 in against 500/500 at 0.30%: 0.997·500 / 500.997
        let out = get_amount_out(UNIT, 500 * UNIT, 500 * UNIT, FEE_RATE_DEFAULT_BPS).unwrap();
        assert_eq!(out, 995_015_938);
        assert!(out < UNIT);
    }

    #[test]
    fn amount_out_rejects_empty_pool() {
        let err = get_amount_out(UNIT, 0, 500 * UNIT, FEE_RATE_DEFAULT_BPS).unwrap_err();
        assert_eq!(err, error!(AmmError::InsufficientLiquidity));
    }

    #[test]
    fn withdraw_is_proportional() {
        let (a, b) =
            liquidity_to_withdraw(50 * UNIT, 500 * UNIT, 250 * UNIT, 500 * UNIT).unwrap();
        assert_eq!((a, b), (50 * UNIT, 25 * UNIT));
    }
}
