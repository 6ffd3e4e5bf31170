//! Release rules of the two vault kinds, exercised through the staking
//! program's own instructions on positions the router opened.

use fetch_integration::*;
use fetch_sdk::instructions::{derive_ata, exit_ix, get_reward_ix, withdraw_ix};
use fetch_staking::error::StakingError;
use solana_sdk::signature::{Keypair, Signer};

/// A depositor staked in `vault` through the router.
fn staked_user(fetch: &mut Fetch, claimable: bool) -> (Keypair, u64) {
    let user = fetch.user(10 * UNIT, UNIT);
    confirm(fetch.deposit(&user, claimable, UNIT / 10, Some(UNIT / 10)));
    let vault = if claimable { fetch.claimable } else { fetch.locked };
    let staked = fetch.staked(&vault, &user.pubkey());
    assert!(staked > 0);
    (user, staked)
}

#[test]
fn locked_vault_refuses_reward_and_exit_until_maturity() {
    let Some(mut fetch) = Fetch::load() else { return };
    let (user, staked) = staked_user(&mut fetch, false);
    let vault = fetch.locked;
    let state = fetch.vault_state(&vault);
    let user_lp = derive_ata(&user.pubkey(), &fetch.lp_mint);
    let tokens_before = fetch.user_tokens(&user.pubkey());
    fetch.warp_to(fetch.now() + DAY);

    let reward = get_reward_ix(&fetch.ids.staking, &user.pubkey(), &vault, &state);
    let code = custom_error(fetch.send(&[reward], &[&user]));
    assert_eq!(code, u32::from(StakingError::NotMatured));

    let exit = exit_ix(&fetch.ids.staking, &user.pubkey(), &vault, &state);
    let code = custom_error(fetch.send(&[exit], &[&user]));
    assert_eq!(code, u32::from(StakingError::NotMatured));
    assert_eq!(fetch.staked(&vault, &user.pubkey()), staked);
    assert_eq!(fetch.user_tokens(&user.pubkey()), tokens_before);

    // Principal is never locked.
    let half = staked / 2;
    let withdraw = withdraw_ix(&fetch.ids.staking, &user.pubkey(), &vault, &state, half);
    confirm(fetch.send(&[withdraw], &[&user]));
    assert_eq!(fetch.staked(&vault, &user.pubkey()), staked - half);
    assert_eq!(fetch.token_balance(&user_lp), half);
    assert_eq!(fetch.user_tokens(&user.pubkey()), tokens_before);

    fetch.warp_to(state.matures_at + 1);
    let exit = exit_ix(&fetch.ids.staking, &user.pubkey(), &vault, &state);
    confirm(fetch.send(&[exit], &[&user]));
    assert_eq!(fetch.staked(&vault, &user.pubkey()), 0);
    assert_eq!(fetch.token_balance(&user_lp), staked);
    assert!(fetch.user_tokens(&user.pubkey()) > tokens_before);
}

#[test]
fn claimable_vault_pays_rewards_at_any_time() {
    let Some(mut fetch) = Fetch::load() else { return };
    let (user, staked) = staked_user(&mut fetch, true);
    let vault = fetch.claimable;
    let state = fetch.vault_state(&vault);
    let tokens_before = fetch.user_tokens(&user.pubkey());
    fetch.warp_to(fetch.now() + DAY);

    let reward = get_reward_ix(&fetch.ids.staking, &user.pubkey(), &vault, &state);
    confirm(fetch.send(&[reward], &[&user]));
    let after_claim = fetch.user_tokens(&user.pubkey());
    assert!(after_claim > tokens_before);
    assert_eq!(fetch.staked(&vault, &user.pubkey()), staked);

    fetch.warp_to(fetch.now() + DAY);
    let exit = exit_ix(&fetch.ids.staking, &user.pubkey(), &vault, &state);
    confirm(fetch.send(&[exit], &[&user]));
    assert_eq!(fetch.staked(&vault, &user.pubkey()), 0);
    assert_eq!(fetch.token_balance(&derive_ata(&user.pubkey(), &fetch.lp_mint)), staked);
    assert!(fetch.user_tokens(&user.pubkey()) > after_claim);
}
