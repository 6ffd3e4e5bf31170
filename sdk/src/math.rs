//! Pricing, reward and deposit-preview math.
//!
//! Mirrors the on-chain arithmetic exactly (u128 intermediates, truncating
//! division) so off-chain estimates match what the programs will do.

use crate::error::{Error, Result};
use crate::state::{RewardSnapshot, StakeAccountState};
use crate::types::DepositPreview;

// ─── Constants ────────────────────────────────────────────────────────────────

/// Basis-point denominator for the pool fee.
pub const BPS_DENOMINATOR: u128 = 10_000;
/// Fixed-point scale of the staking reward accumulator.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;
/// Share of every native deposit that is converted into project tokens.
pub const CONVERSION_PERCENT: u64 = 50;

// ─── Pool curve ───────────────────────────────────────────────────────────────

/// Constant-product output for an exact input, fee taken from the input.
pub fn get_amount_out(amount_in: u64, reserve_in: u64, reserve_out: u64, fee_rate_bps: u16) -> Result<u64> {
    if amount_in == 0 {
        return Err(Error::InvalidArgument("amount_in must be > 0".into()));
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(Error::NoLiquidity);
    }
    let in_with_fee = (amount_in as u128)
        .checked_mul(BPS_DENOMINATOR - fee_rate_bps as u128)
        .ok_or(Error::MathOverflow)?;
    let numerator = in_with_fee
        .checked_mul(reserve_out as u128)
        .ok_or(Error::MathOverflow)?;
    let denominator = (reserve_in as u128)
        .checked_mul(BPS_DENOMINATOR)
        .ok_or(Error::MathOverflow)?
        .checked_add(in_with_fee)
        .ok_or(Error::MathOverflow)?;
    Ok((numerator / denominator) as u64)
}

/// Amount of the other side equivalent to `amount` at the reserve ratio.
pub fn quote(amount: u64, reserve_from: u64, reserve_to: u64) -> Result<u64> {
    if reserve_from == 0 || reserve_to == 0 {
        return Err(Error::NoLiquidity);
    }
    let out = (amount as u128)
        .checked_mul(reserve_to as u128)
        .ok_or(Error::MathOverflow)?
        / reserve_from as u128;
    u64::try_from(out).map_err(|_| Error::MathOverflow)
}

/// Amounts the pool accepts for a desired pair (no minimums), keeping its ratio.
pub fn optimal_amounts(desired_a: u64, desired_b: u64, reserve_a: u64, reserve_b: u64) -> Result<(u64, u64)> {
    if reserve_a == 0 && reserve_b == 0 {
        return Ok((desired_a, desired_b));
    }
    let b_optimal = quote(desired_a, reserve_a, reserve_b)?;
    if b_optimal <= desired_b {
        return Ok((desired_a, b_optimal));
    }
    Ok((quote(desired_b, reserve_b, reserve_a)?, desired_b))
}

/// LP shares minted for (amount_a, amount_b).
pub fn liquidity_to_mint(amount_a: u64, amount_b: u64, reserve_a: u64, reserve_b: u64, lp_supply: u64) -> Result<u64> {
    let minted = if lp_supply == 0 {
        isqrt(
            (amount_a as u128)
                .checked_mul(amount_b as u128)
                .ok_or(Error::MathOverflow)?,
        )
    } else {
        if reserve_a == 0 || reserve_b == 0 {
            return Err(Error::NoLiquidity);
        }
        let by_a = (amount_a as u128)
            .checked_mul(lp_supply as u128)
            .ok_or(Error::MathOverflow)?
            / reserve_a as u128;
        let by_b = (amount_b as u128)
            .checked_mul(lp_supply as u128)
            .ok_or(Error::MathOverflow)?
            / reserve_b as u128;
        by_a.min(by_b)
    };
    u64::try_from(minted).map_err(|_| Error::MathOverflow)
}

/// Pool tokens paid out for burning `lp_amount` shares, as `(a, b)`.
pub fn liquidity_to_withdraw(lp_amount: u64, reserve_a: u64, reserve_b: u64, lp_supply: u64) -> Result<(u64, u64)> {
    if lp_amount == 0 {
        return Err(Error::InvalidArgument("lp_amount must be > 0".into()));
    }
    if lp_supply < lp_amount {
        return Err(Error::NoLiquidity);
    }
    let share = |reserve: u64| {
        (lp_amount as u128)
            .checked_mul(reserve as u128)
            .map(|n| (n / lp_supply as u128) as u64)
            .ok_or(Error::MathOverflow)
    };
    Ok((share(reserve_a)?, share(reserve_b)?))
}

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

// ─── Sale ─────────────────────────────────────────────────────────────────────

/// Tokens the sale hands out for `lamports`: the pool's own swap quote.
pub fn sale_price(lamports: u64, reserve_native: u64, reserve_token: u64, fee_rate_bps: u16) -> Result<u64> {
    get_amount_out(lamports, reserve_native, reserve_token, fee_rate_bps)
}

// ─── Staking rewards ──────────────────────────────────────────────────────────

/// Accumulator value as the vault would compute it at `now`.
pub fn reward_per_token(rewards: &RewardSnapshot, now: i64) -> Result<u128> {
    if rewards.total_staked == 0 {
        return Ok(rewards.reward_per_token_stored);
    }
    let elapsed = now
        .min(rewards.period_finish)
        .saturating_sub(rewards.last_update_time)
        .max(0) as u128;
    let increment = elapsed
        .checked_mul(rewards.reward_rate as u128)
        .ok_or(Error::MathOverflow)?
        .checked_mul(PRECISION)
        .ok_or(Error::MathOverflow)?
        / rewards.total_staked as u128;
    rewards
        .reward_per_token_stored
        .checked_add(increment)
        .ok_or(Error::MathOverflow)
}

/// Rewards a stake account could claim at `now`, same as the vault's `earned` view.
pub fn earned(rewards: &RewardSnapshot, stake: &StakeAccountState, now: i64) -> Result<u64> {
    let delta = reward_per_token(rewards, now)?.saturating_sub(stake.reward_per_token_paid);
    let pending = (stake.balance as u128)
        .checked_mul(delta)
        .ok_or(Error::MathOverflow)?
        / PRECISION;
    let pending = u64::try_from(pending).map_err(|_| Error::MathOverflow)?;
    stake.rewards.checked_add(pending).ok_or(Error::MathOverflow)
}

// ─── Deposit pipeline ─────────────────────────────────────────────────────────

/// How the router spends one native deposit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DepositPlan {
    pub sale_lamports:      u64,
    pub sale_tokens:        u64,
    pub swap_lamports:      u64,
    pub swap_tokens:        u64,
    pub liquidity_lamports: u64,
}

fn percent_of(amount: u64, percent: u64) -> u64 {
    // percent <= 100, the result never exceeds amount
    ((amount as u128 * percent as u128) / 100) as u64
}

/// Split `lamports` across the sale, the swap and the liquidity leg.
/// A conversion leg that would buy zero tokens is folded into liquidity.
pub fn plan_conversion(
    lamports: u64,
    sale_percent: u8,
    reserve_native: u64,
    reserve_token: u64,
    fee_rate_bps: u16,
) -> Result<DepositPlan> {
    if lamports == 0 {
        return Err(Error::InvalidArgument("deposit must be > 0 lamports".into()));
    }
    let conversion = percent_of(lamports, CONVERSION_PERCENT);
    let mut sale_lamports = percent_of(conversion, sale_percent as u64);
    let mut swap_lamports = conversion - sale_lamports;

    let mut sale_tokens = 0;
    if sale_lamports > 0 {
        sale_tokens = get_amount_out(sale_lamports, reserve_native, reserve_token, fee_rate_bps)?;
        if sale_tokens == 0 {
            sale_lamports = 0;
        }
    }
    let mut swap_tokens = 0;
    if swap_lamports > 0 {
        swap_tokens = get_amount_out(swap_lamports, reserve_native, reserve_token, fee_rate_bps)?;
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

/// `(burned, staked)` for a share amount.
pub fn split_shares(shares: u64, burn_percent: u8) -> (u64, u64) {
    let burned = percent_of(shares, burn_percent as u64);
    (burned, shares - burned)
}

/// Everything a deposit would do against the given pool state, step by step.
///
/// Inputs are pre-fetched on-chain values; no RPC calls are made here.
#[allow(clippy::too_many_arguments)]
pub fn preview_deposit(
    lamports:       u64,
    token_amount:   u64,
    sale_percent:   u8,
    burn_percent:   u8,
    reserve_native: u64,
    reserve_token:  u64,
    lp_supply:      u64,
    fee_rate_bps:   u16,
) -> Result<DepositPreview> {
    let plan = plan_conversion(lamports, sale_percent, reserve_native, reserve_token, fee_rate_bps)?;

    // The sale only reads reserves; the swap moves them before liquidity is added.
    let native_after = reserve_native
        .checked_add(plan.swap_lamports)
        .ok_or(Error::MathOverflow)?;
    let token_after = reserve_token
        .checked_sub(plan.swap_tokens)
        .ok_or(Error::MathOverflow)?;

    let native_held = plan.liquidity_lamports;
    let tokens_held = plan
        .sale_tokens
        .checked_add(plan.swap_tokens)
        .and_then(|t| t.checked_add(token_amount))
        .ok_or(Error::MathOverflow)?;
    if tokens_held == 0 {
        return Err(Error::NothingMinted { lamports });
    }

    let (native_added, tokens_added) = optimal_amounts(native_held, tokens_held, native_after, token_after)?;
    let shares = liquidity_to_mint(native_added, tokens_added, native_after, token_after, lp_supply)?;
    if shares == 0 {
        return Err(Error::NothingMinted { lamports });
    }
    let (burned, staked) = split_shares(shares, burn_percent);

    Ok(DepositPreview {
        lamports,
        token_amount,
        sale_lamports:      plan.sale_lamports,
        sale_tokens:        plan.sale_tokens,
        swap_lamports:      plan.swap_lamports,
        swap_tokens:        plan.swap_tokens,
        liquidity_lamports: plan.liquidity_lamports,
        native_added,
        tokens_added,
        shares,
        burned,
        staked,
        refund_lamports:    native_held - native_added,
        refund_tokens:      tokens_held - tokens_added,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000_000;

    #[test]
    fn amount_out_matches_program_curve() {
        assert_eq!(get_amount_out(UNIT, 100 * UNIT, 100 * UNIT, 30).unwrap(), 987_158_034);
        assert!(matches!(get_amount_out(UNIT, 0, UNIT, 30), Err(Error::NoLiquidity)));
    }

    #[test]
    fn plan_conserves_lamports() {
        for sale in [0u8, 33, 50, 100] {
            let plan = plan_conversion(UNIT / 10, sale, 500 * UNIT, 500 * UNIT, 30).unwrap();
            assert_eq!(
                plan.sale_lamports + plan.swap_lamports + plan.liquidity_lamports,
                UNIT / 10
            );
        }
    }

    #[test]
    fn dust_legs_fold_into_liquidity() {
        // 1 lamport against a deep pool buys nothing on either leg
        let plan = plan_conversion(4, 50, 500 * UNIT, 500 * UNIT, 30).unwrap();
        assert_eq!(plan.sale_lamports, 0);
        assert_eq!(plan.swap_lamports, 0);
        assert_eq!(plan.liquidity_lamports, 4);
    }

    #[test]
    fn burn_split_truncates_toward_stake() {
        assert_eq!(split_shares(1_000, 10), (100, 900));
        assert_eq!(split_shares(9, 10), (0, 9));
    }

    #[test]
    fn earned_stops_at_period_finish() {
        let rewards = RewardSnapshot {
            total_staked: UNIT,
            reward_per_token_stored: 0,
            last_update_time: 0,
            reward_rate: 385,
            period_finish: 100,
            rewards_duration: 100,
        };
        let stake = StakeAccountState { balance: UNIT, ..Default::default() };
        assert_eq!(earned(&rewards, &stake, 100).unwrap(), 38_500);
        assert_eq!(earned(&rewards, &stake, 1_000).unwrap(), 38_500);
    }

    #[test]
    fn withdraw_is_proportional() {
        assert_eq!(
            liquidity_to_withdraw(UNIT, 10 * UNIT, 40 * UNIT, 20 * UNIT).unwrap(),
            (UNIT / 2, 2 * UNIT)
        );
        assert!(matches!(
            liquidity_to_withdraw(21 * UNIT, 10 * UNIT, 40 * UNIT, 20 * UNIT),
            Err(Error::NoLiquidity)
        ));
    }

    #[test]
    fn isqrt_floors() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
    }
}
