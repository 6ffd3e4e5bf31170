//! Parameter and result types for [`crate::FetchClient`].

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

pub use crate::state::VaultKind;

// ─── Deposit ──────────────────────────────────────────────────────────────────

/// Parameters for [`crate::FetchClient::deposit`].
#[derive(Debug, Clone)]
pub struct DepositParams {
    /// Native amount to deposit, in lamports.
    pub lamports:            u64,
    /// Project tokens to add alongside the SOL. `None` is the native-only path.
    pub token_amount:        Option<u64>,
    /// Stake into the claimable vault (`true`) or the locked one.
    pub use_claimable_vault: bool,
}

/// Off-chain walk-through of a deposit against current pool state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepositPreview {
    pub lamports:           u64,
    pub token_amount:       u64,
    /// Lamports paid to the sale beneficiary.
    pub sale_lamports:      u64,
    pub sale_tokens:        u64,
    /// Lamports swapped on the pool.
    pub swap_lamports:      u64,
    pub swap_tokens:        u64,
    /// Lamports kept native for the liquidity leg.
    pub liquidity_lamports: u64,
    /// Amounts the pool accepts at its ratio.
    pub native_added:       u64,
    pub tokens_added:       u64,
    pub shares:             u64,
    pub burned:             u64,
    pub staked:             u64,
    /// Unpaired remainders swept back to the depositor.
    pub refund_lamports:    u64,
    pub refund_tokens:      u64,
}

/// Result of a confirmed deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositResult {
    pub signature: String,
    pub vault:     Pubkey,
    /// Stake account balance before and after the transaction.
    pub staked_before: u64,
    pub staked_after:  u64,
    /// Pre-trade estimate the transaction was sent with.
    pub preview:   DepositPreview,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Router configuration joined with live pool reserves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterInfo {
    pub router:              Pubkey,
    pub owner:               Pubkey,
    pub token_mint:          Pubkey,
    pub pool:                Pubkey,
    pub lp_mint:             Pubkey,
    pub sale:                Pubkey,
    pub sale_paused:         bool,
    pub sale_inventory:      u64,
    pub sale_percent:        u8,
    pub pool_percent:        u8,
    pub burn_percent:        u8,
    pub stake_claimable:     Pubkey,
    pub stake_non_claimable: Pubkey,
    pub reserve_native:      u64,
    pub reserve_token:       u64,
    pub lp_supply:           u64,
    pub fee_rate_bps:        u16,
    /// Project tokens per SOL at the current reserve ratio.
    pub spot_price:          f64,
}

// ─── Staking ──────────────────────────────────────────────────────────────────

/// One depositor's position in a vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionInfo {
    pub vault:         Pubkey,
    pub stake_account: Pubkey,
    pub kind:          VaultKind,
    pub balance:       u64,
    pub total_staked:  u64,
    /// Rewards claimable right now (settled plus accrued).
    pub earned:        u64,
    pub reward_rate:   u64,
    pub period_finish: i64,
    pub matures_at:    i64,
    /// Claim and exit are open.
    pub unlocked:      bool,
}

/// Result of a withdraw / claim / exit transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeTxResult {
    pub signature:  String,
    pub vault:      Pubkey,
    pub lp_out:     u64,
    pub reward_out: u64,
}

/// Result of redeeming LP shares on the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemResult {
    pub signature:  String,
    pub lp_burned:  u64,
    /// Unwrapped to SOL in the same transaction.
    pub lamports:   u64,
    pub tokens:     u64,
}

// ─── Sale ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleQuote {
    pub sale:           Pubkey,
    pub lamports:       u64,
    pub tokens:         u64,
    pub inventory:      u64,
    pub paused:         bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyResult {
    pub signature: String,
    pub lamports:  u64,
    pub tokens:    u64,
}
