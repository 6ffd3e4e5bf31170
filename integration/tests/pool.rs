//! Redeeming LP shares on the pool directly.

use fetch_amm::error::AmmError;
use fetch_integration::*;
use fetch_sdk::{
    instructions::{
        close_token_account_ix, create_ata_idempotent_ix, derive_ata, remove_liquidity_ix, withdraw_ix, WSOL_MINT,
    },
    math::liquidity_to_withdraw,
};
use solana_sdk::signature::Signer;

#[test]
fn redeem_pays_out_pro_rata_and_unwraps() {
    let Some(mut fetch) = Fetch::load() else { return };
    let user = fetch.user(10 * UNIT, UNIT);
    confirm(fetch.deposit(&user, true, UNIT / 10, Some(UNIT / 10)));

    // Take the staked shares back out; withdraw is never gated.
    let vault = fetch.claimable;
    let shares = fetch.staked(&vault, &user.pubkey());
    let state = fetch.vault_state(&vault);
    let withdraw = withdraw_ix(&fetch.ids.staking, &user.pubkey(), &vault, &state, shares);
    confirm(fetch.send(&[withdraw], &[&user]));

    let pool_state = fetch.pool_state();
    let (native_before, token_before) = fetch.reserves();
    let supply_before = fetch.lp_supply();
    let tokens_before = fetch.user_tokens(&user.pubkey());
    let (out_native, out_token) =
        liquidity_to_withdraw(shares, native_before, token_before, supply_before).unwrap();
    assert!(out_native > 0 && out_token > 0);

    let (amm, pool) = (fetch.ids.amm, fetch.pool);
    let user_key = user.pubkey();
    let wsol = derive_ata(&user_key, &WSOL_MINT);
    let redeem = |min_native: u64, min_token: u64| {
        vec![
            create_ata_idempotent_ix(&user_key, &user_key, &WSOL_MINT),
            remove_liquidity_ix(&amm, &user_key, &pool, &pool_state, shares, min_native, min_token),
            close_token_account_ix(&wsol, &user_key, &user_key),
        ]
    };

    // Minimums above the quote revert the whole redeem.
    let too_tight = redeem(out_native, out_token + 1);
    let code = custom_error(fetch.send(&too_tight, &[&user]));
    assert_eq!(code, u32::from(AmmError::SlippageExceeded));
    assert_eq!(fetch.lp_supply(), supply_before);

    let exact = redeem(out_native, out_token);
    confirm(fetch.send(&exact, &[&user]));

    let (native_after, token_after) = fetch.reserves();
    assert_eq!(native_before - native_after, out_native);
    assert_eq!(token_before - token_after, out_token);
    assert_eq!(supply_before - fetch.lp_supply(), shares);
    assert_eq!(fetch.token_balance(&derive_ata(&user_key, &fetch.lp_mint)), 0);
    assert_eq!(fetch.user_tokens(&user_key), tokens_before + out_token);
    assert_eq!(fetch.lamports(&wsol), 0, "wSOL account closed back into SOL");
}

#[test]
fn redeem_of_zero_shares_is_rejected() {
    let Some(mut fetch) = Fetch::load() else { return };
    let user = fetch.user(10 * UNIT, 0);
    let user_key = user.pubkey();
    let wsol = fetch.ata(&user_key, &WSOL_MINT);
    let ix = remove_liquidity_ix(&fetch.ids.amm, &user_key, &fetch.pool, &fetch.pool_state(), 0, 0, 0);

    let code = custom_error(fetch.send(&[ix], &[&user]));
    assert_eq!(code, u32::from(AmmError::ZeroAmount));
    assert_eq!(fetch.token_balance(&wsol), 0);
}
