//! Deposit scenarios run against the SDK's mirror of the on-chain math.
//! No cluster needed.

use fetch_sdk::math::{get_amount_out, isqrt, preview_deposit};
use fetch_sdk::DepositPreview;

const UNIT: u64 = 1_000_000_000;

/// Pool reserves and LP supply as the router sees them.
struct Pool {
    native: u64,
    token: u64,
    supply: u64,
}

impl Pool {
    fn seeded(native: u64, token: u64) -> Self {
        Self { native, token, supply: isqrt(native as u128 * token as u128) as u64 }
    }

    fn preview(&self, lamports: u64, token_amount: u64) -> DepositPreview {
        preview_deposit(lamports, token_amount, 50, 10, self.native, self.token, self.supply, 30)
            .unwrap()
    }

    /// Apply a deposit's effect on the pool: swap leg, then liquidity.
    fn apply(&mut self, p: &DepositPreview) {
        self.native += p.swap_lamports + p.native_added;
        self.token = self.token - p.swap_tokens + p.tokens_added;
        self.supply += p.shares;
    }
}

#[test]
fn sol_and_token_deposit_burns_a_tenth() {
    let pool = Pool::seeded(500 * UNIT, 500 * UNIT);
    let p = pool.preview(UNIT / 10, UNIT / 10);

    assert!(p.shares > 0);
    assert!(p.burned > 0);
    assert_eq!(p.burned + p.staked, p.shares);
    // staked is 90% of shares, burned the truncated 10%
    assert!(p.staked >= 9 * p.burned);
    assert!(p.staked - 9 * p.burned < 10);

    // half the SOL is converted, split evenly between sale and swap
    assert_eq!(p.sale_lamports, UNIT / 40);
    assert_eq!(p.swap_lamports, UNIT / 40);
    assert_eq!(p.liquidity_lamports, UNIT / 20);
    assert_eq!(p.sale_tokens, get_amount_out(UNIT / 40, 500 * UNIT, 500 * UNIT, 30).unwrap());
}

#[test]
fn native_only_deposit_refunds_little() {
    let pool = Pool::seeded(500 * UNIT, 500 * UNIT);
    let p = pool.preview(UNIT / 10, 0);

    assert!(p.staked > 0);
    // fees and price impact leave the token side a little short, so some
    // native comes back; nothing close to the liquidity leg itself
    assert_eq!(p.refund_tokens, 0);
    assert!(p.refund_lamports < p.liquidity_lamports / 50);
}

#[test]
fn small_deposits_still_mint_after_a_large_one() {
    let mut pool = Pool::seeded(500 * UNIT, 500 * UNIT);
    let big = pool.preview(100 * UNIT, 0);
    pool.apply(&big);
    assert!(big.shares > 0);

    for _ in 0..5 {
        let small = pool.preview(UNIT / 1_000, 0);
        assert!(small.shares > 0);
        assert!(small.staked > 0);
        pool.apply(&small);
    }
}
