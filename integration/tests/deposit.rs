//! Router deposits against the real programs: every leg lands where the SDK
//! preview says it will, and the router's intermediate accounts end empty.

use fetch_integration::*;
use fetch_router::error::RouterError;
use solana_sdk::{pubkey::Pubkey, signature::Signer};

/// Balances a deposit moves, read before and after.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ledger {
    native_reserve: u64,
    token_reserve:  u64,
    lp_supply:      u64,
    burned:         u64,
    staked:         u64,
    inventory:      u64,
    beneficiary:    u64,
    user_tokens:    u64,
}

fn ledger(fetch: &Fetch, claimable: bool, user: &Pubkey) -> Ledger {
    let vault = if claimable { fetch.claimable } else { fetch.locked };
    let (native_reserve, token_reserve) = fetch.reserves();
    Ledger {
        native_reserve,
        token_reserve,
        lp_supply: fetch.lp_supply(),
        burned: fetch.burned(),
        staked: fetch.staked(&vault, user),
        inventory: fetch.inventory(),
        beneficiary: fetch.lamports(&fetch.beneficiary),
        user_tokens: fetch.user_tokens(user),
    }
}

#[test]
fn sol_and_token_deposit_follows_preview_and_drains_router() {
    let Some(mut fetch) = Fetch::load() else { return };
    let user = fetch.user(10 * UNIT, UNIT);
    let preview = fetch.preview(UNIT / 10, UNIT / 10);
    let before = ledger(&fetch, true, &user.pubkey());

    confirm(fetch.deposit(&user, true, UNIT / 10, Some(UNIT / 10)));
    let after = ledger(&fetch, true, &user.pubkey());

    assert!(preview.sale_lamports > 0 && preview.swap_lamports > 0);
    assert_eq!(after.lp_supply - before.lp_supply, preview.shares);
    assert_eq!(after.burned - before.burned, preview.burned);
    assert_eq!(after.staked - before.staked, preview.staked);
    assert_eq!(before.inventory - after.inventory, preview.sale_tokens);
    assert_eq!(after.beneficiary - before.beneficiary, preview.sale_lamports);
    assert_eq!(after.user_tokens, before.user_tokens - UNIT / 10 + preview.refund_tokens);

    // 10 % burn: nine staked shares per burned one, floor on the burn.
    assert!(preview.burned > 0);
    assert!(preview.staked >= 9 * preview.burned && preview.staked - 9 * preview.burned < 10);

    fetch.assert_router_drained(&user.pubkey());
}

#[test]
fn native_only_deposit_drains_router() {
    let Some(mut fetch) = Fetch::load() else { return };
    let user = fetch.user(10 * UNIT, 0);
    let preview = fetch.preview(UNIT / 10, 0);
    let before = ledger(&fetch, true, &user.pubkey());

    confirm(fetch.deposit(&user, true, UNIT / 10, None));
    let after = ledger(&fetch, true, &user.pubkey());

    assert_eq!(after.staked - before.staked, preview.staked);
    assert_eq!(after.burned - before.burned, preview.burned);
    assert_eq!(after.user_tokens, preview.refund_tokens);
    fetch.assert_router_drained(&user.pubkey());
}

#[test]
fn all_swap_split_leaves_sale_untouched() {
    let Some(mut fetch) = Fetch::load() else { return };
    fetch.update_split(0, 100);
    let user = fetch.user(10 * UNIT, UNIT);
    let preview = fetch.preview(UNIT / 10, UNIT / 10);
    let before = ledger(&fetch, true, &user.pubkey());

    confirm(fetch.deposit(&user, true, UNIT / 10, Some(UNIT / 10)));
    let after = ledger(&fetch, true, &user.pubkey());

    assert_eq!(preview.sale_lamports, 0);
    assert_eq!(after.inventory, before.inventory);
    assert_eq!(after.beneficiary, before.beneficiary);
    assert_eq!(after.staked - before.staked, preview.staked);
    fetch.assert_router_drained(&user.pubkey());
}

#[test]
fn all_sale_split_never_swaps() {
    let Some(mut fetch) = Fetch::load() else { return };
    fetch.update_split(100, 0);
    let user = fetch.user(10 * UNIT, UNIT);
    let preview = fetch.preview(UNIT / 10, UNIT / 10);
    let before = ledger(&fetch, false, &user.pubkey());

    confirm(fetch.deposit(&user, false, UNIT / 10, Some(UNIT / 10)));
    let after = ledger(&fetch, false, &user.pubkey());

    assert_eq!(preview.swap_lamports, 0);
    // Without a swap the reserves only grow by what the liquidity leg adds.
    assert_eq!(after.native_reserve - before.native_reserve, preview.native_added);
    assert_eq!(after.token_reserve - before.token_reserve, preview.tokens_added);
    assert_eq!(before.inventory - after.inventory, preview.sale_tokens);
    assert_eq!(after.staked - before.staked, preview.staked);
    fetch.assert_router_drained(&user.pubkey());
}

#[test]
fn five_percent_burn_stakes_nineteen_parts() {
    let Some(mut fetch) = Fetch::load() else { return };
    fetch.update_burn_percent(5);
    let user = fetch.user(10 * UNIT, UNIT);
    let before = ledger(&fetch, true, &user.pubkey());

    confirm(fetch.deposit(&user, true, UNIT / 10, Some(UNIT / 10)));
    let after = ledger(&fetch, true, &user.pubkey());

    let burned = after.burned - before.burned;
    let staked = after.staked - before.staked;
    assert!(burned > 0);
    assert_eq!(burned + staked, after.lp_supply - before.lp_supply);
    assert!(staked >= 19 * burned && staked - 19 * burned < 20);
    fetch.assert_router_drained(&user.pubkey());
}

#[test]
fn dust_deposit_folds_conversion_into_liquidity() {
    let Some(mut fetch) = Fetch::load() else { return };
    let user = fetch.user(10 * UNIT, UNIT);
    let preview = fetch.preview(3, 1_000_000);
    let before = ledger(&fetch, true, &user.pubkey());

    confirm(fetch.deposit(&user, true, 3, Some(1_000_000)));
    let after = ledger(&fetch, true, &user.pubkey());

    // Both conversion quotes round to zero tokens, so every lamport pairs.
    assert_eq!((preview.sale_lamports, preview.swap_lamports), (0, 0));
    assert_eq!(preview.liquidity_lamports, 3);
    assert_eq!(after.inventory, before.inventory);
    assert_eq!(after.beneficiary, before.beneficiary);
    assert_eq!(after.native_reserve - before.native_reserve, preview.native_added);
    assert_eq!(after.token_reserve - before.token_reserve, preview.tokens_added);
    assert_eq!(after.staked - before.staked, preview.staked);
    assert_eq!(after.user_tokens, before.user_tokens - 1_000_000 + preview.refund_tokens);
    fetch.assert_router_drained(&user.pubkey());
}

#[test]
fn repeat_deposits_reopen_the_escrow() {
    let Some(mut fetch) = Fetch::load() else { return };
    let user = fetch.user(10 * UNIT, UNIT);

    let first = fetch.preview(UNIT / 10, UNIT / 10);
    confirm(fetch.deposit(&user, true, UNIT / 10, Some(UNIT / 10)));
    let second = fetch.preview(UNIT / 20, 0);
    confirm(fetch.deposit(&user, true, UNIT / 20, None));

    assert_eq!(fetch.staked(&fetch.claimable, &user.pubkey()), first.staked + second.staked);
    fetch.assert_router_drained(&user.pubkey());
}

#[test]
fn zero_deposit_is_rejected() {
    let Some(mut fetch) = Fetch::load() else { return };
    let user = fetch.user(10 * UNIT, UNIT);

    let code = custom_error(fetch.deposit(&user, true, 0, None));
    assert_eq!(code, u32::from(RouterError::ZeroDeposit));
    let code = custom_error(fetch.deposit(&user, true, UNIT / 10, Some(0)));
    assert_eq!(code, u32::from(RouterError::ZeroAmount));
}
