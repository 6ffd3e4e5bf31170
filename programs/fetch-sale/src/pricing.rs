use anchor_lang::prelude::*;
use fetch_amm::{curve, Pool};
use crate::{constants::WSOL_MINT, error::SaleError};

/// Pool vault balances as (native, token), whichever side wSOL sits on.
pub fn native_reserves(pool: &Pool, reserve_a: u64, reserve_b: u64) -> Result<(u64, u64)> {
    if pool.token_a_mint == WSOL_MINT {
        Ok((reserve_a, reserve_b))
    } else if pool.token_b_mint == WSOL_MINT {
        Ok((reserve_b, reserve_a))
    } else {
        err!(SaleError::MintMismatch)
    }
}

/// Tokens sold for `lamports`: exactly what swapping the same amount on the
/// pool would return right now. Reads reserves only, nothing is swapped.
pub fn sale_price(lamports: u64, pool: &Pool, reserve_a: u64, reserve_b: u64) -> Result<u64> {
    require!(lamports > 0, SaleError::ZeroAmount);
    let (reserve_native, reserve_token) = native_reserves(pool, reserve_a, reserve_b)?;
    curve::get_amount_out(lamports, reserve_native, reserve_token, pool.fee_rate_bps)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000_000;

    fn pool(token_a_mint: Pubkey, token_b_mint: Pubkey) -> Pool {
        Pool {
            authority: Pubkey::new_unique(),
            authority_bump: 255,
            token_a_mint,
            token_b_mint,
            token_a_vault: Pubkey::new_unique(),
            token_b_vault: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            fee_rate_bps: 30,
            bump: 255,
        }
    }

    #[test]
    fn price_matches_swap_output() {
        let token = Pubkey::new_unique();
        let p = pool(WSOL_MINT, token);
        let price = sale_price(UNIT / 10, &p, 500 * UNIT, 500 * UNIT).unwrap();
        let swap = curve::get_amount_out(UNIT / 10, 500 * UNIT, 500 * UNIT, 30).unwrap();
        assert_eq!(price, swap);
        assert!(price > 0 && price < UNIT / 10);
    }

    #[test]
    fn price_ignores_pool_side_order() {
        let token = Pubkey::new_unique();
        let native_first = pool(WSOL_MINT, token);
        let token_first = pool(token, WSOL_MINT);
        assert_eq!(
            sale_price(UNIT, &native_first, 400 * UNIT, 800 * UNIT).unwrap(),
            sale_price(UNIT, &token_first, 800 * UNIT, 400 * UNIT).unwrap(),
        );
    }

    #[test]
    fn price_tracks_pool_after_liquidity_added() {
        let p = pool(WSOL_MINT, Pubkey::new_unique());
        // Deeper pool at the same ratio gives a better fill, still equal to a swap
        let shallow = sale_price(UNIT, &p, 500 * UNIT, 500 * UNIT).unwrap();
        let deep = sale_price(UNIT, &p, 1_000 * UNIT, 1_000 * UNIT).unwrap();
        assert!(deep > shallow);
        assert_eq!(deep, curve::get_amount_out(UNIT, 1_000 * UNIT, 1_000 * UNIT, 30).unwrap());
    }

    #[test]
    fn rejects_pool_without_native_side() {
        let p = pool(Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(
            sale_price(UNIT, &p, UNIT, UNIT).unwrap_err(),
            error!(SaleError::MintMismatch)
        );
    }

    #[test]
    fn rejects_zero_lamports() {
        let p = pool(WSOL_MINT, Pubkey::new_unique());
        assert_eq!(
            sale_price(0, &p, UNIT, UNIT).unwrap_err(),
            error!(SaleError::ZeroAmount)
        );
    }
}
