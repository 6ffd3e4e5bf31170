//! On-chain account deserialization.
//!
//! Parses raw account bytes for the four programs plus the handful of SPL and
//! sysvar fields the client needs. Byte offsets mirror the Anchor `#[account]`
//! layouts exactly; every read is bounds-checked.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use crate::error::{Error, Result};

fn require_len(data: &[u8], expected: usize, what: &str) -> Result<()> {
    if data.len() < expected {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("{what} account is {} bytes; expected {expected}", data.len()),
        });
    }
    Ok(())
}

// ─── Pool (fetch-amm) ─────────────────────────────────────────────────────────

/// Deserialized `Pool` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// authority(32)  authority_bump(1)  token_a_mint(32)  token_b_mint(32)
/// token_a_vault(32)  token_b_vault(32)  lp_mint(32)  fee_rate_bps(2)  bump(1)
/// = 204 bytes
/// ```
#[derive(Debug, Clone)]
pub struct PoolState {
    pub token_a_mint:  Pubkey,
    pub token_b_mint:  Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub lp_mint:       Pubkey,
    pub fee_rate_bps:  u16,
}

pub fn parse_pool(data: &[u8]) -> Result<PoolState> {
    require_len(data, 204, "Pool")?;
    Ok(PoolState {
        token_a_mint:  read_pubkey(data, 41)?,
        token_b_mint:  read_pubkey(data, 73)?,
        token_a_vault: read_pubkey(data, 105)?,
        token_b_vault: read_pubkey(data, 137)?,
        lp_mint:       read_pubkey(data, 169)?,
        fee_rate_bps:  read_u16(data, 201)?,
    })
}

// ─── Vault (fetch-staking) ────────────────────────────────────────────────────

/// Whether a vault pays rewards at any time or only after it matures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaultKind {
    Claimable,
    Locked,
}

/// The reward accumulator embedded in every vault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardSnapshot {
    pub total_staked:            u64,
    pub reward_per_token_stored: u128,
    pub last_update_time:        i64,
    pub reward_rate:             u64,
    pub period_finish:           i64,
    pub rewards_duration:        i64,
}

/// Deserialized `Vault` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// owner(32)  rewards_distribution(32)  staking_mint(32)  rewards_mint(32)
/// staking_vault(32)  rewards_vault(32)  authority_bump(1)  kind(1)
/// deployed_at(8)  matures_at(8)
/// total_staked(8)  reward_per_token_stored(16)  last_update_time(8)
/// reward_rate(8)  period_finish(8)  rewards_duration(8)
/// = 274 bytes
/// ```
#[derive(Debug, Clone)]
pub struct VaultState {
    pub owner:                Pubkey,
    pub rewards_distribution: Pubkey,
    pub staking_mint:         Pubkey,
    pub rewards_mint:         Pubkey,
    pub staking_vault:        Pubkey,
    pub rewards_vault:        Pubkey,
    pub kind:                 VaultKind,
    pub deployed_at:          i64,
    pub matures_at:           i64,
    pub rewards:              RewardSnapshot,
}

impl VaultState {
    /// Whether claims and exits are open at `now`. Withdrawals never wait.
    pub fn release_allowed(&self, now: i64) -> bool {
        match self.kind {
            VaultKind::Claimable => true,
            VaultKind::Locked => now >= self.matures_at,
        }
    }
}

pub fn parse_vault(data: &[u8]) -> Result<VaultState> {
    require_len(data, 274, "Vault")?;
    let kind = match read_u8(data, 201)? {
        0 => VaultKind::Claimable,
        1 => VaultKind::Locked,
        other => {
            return Err(Error::ParseError {
                offset: 201,
                reason: format!("unknown vault kind {other}"),
            })
        }
    };
    Ok(VaultState {
        owner:                read_pubkey(data, 8)?,
        rewards_distribution: read_pubkey(data, 40)?,
        staking_mint:         read_pubkey(data, 72)?,
        rewards_mint:         read_pubkey(data, 104)?,
        staking_vault:        read_pubkey(data, 136)?,
        rewards_vault:        read_pubkey(data, 168)?,
        kind,
        deployed_at:          read_i64(data, 202)?,
        matures_at:           read_i64(data, 210)?,
        rewards: RewardSnapshot {
            total_staked:            read_u64(data, 218)?,
            reward_per_token_stored: read_u128(data, 226)?,
            last_update_time:        read_i64(data, 242)?,
            reward_rate:             read_u64(data, 250)?,
            period_finish:           read_i64(data, 258)?,
            rewards_duration:        read_i64(data, 266)?,
        },
    })
}

// ─── StakeAccount (fetch-staking) ─────────────────────────────────────────────

/// Deserialized `StakeAccount` state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// owner(32)  vault(32)  balance(8)  reward_per_token_paid(16)  rewards(8)  bump(1)
/// = 105 bytes
/// ```
#[derive(Debug, Clone, Default)]
pub struct StakeAccountState {
    pub owner:                 Pubkey,
    pub vault:                 Pubkey,
    pub balance:               u64,
    pub reward_per_token_paid: u128,
    /// Rewards settled on-chain but not yet paid out.
    pub rewards:               u64,
}

pub fn parse_stake_account(data: &[u8]) -> Result<StakeAccountState> {
    require_len(data, 105, "StakeAccount")?;
    Ok(StakeAccountState {
        owner:                 read_pubkey(data, 8)?,
        vault:                 read_pubkey(data, 40)?,
        balance:               read_u64(data, 72)?,
        reward_per_token_paid: read_u128(data, 80)?,
        rewards:               read_u64(data, 96)?,
    })
}

// ─── Sale (fetch-sale) ────────────────────────────────────────────────────────

/// Deserialized `Sale` state.
///
/// ```text
/// owner(32)  token_mint(32)  beneficiary(32)  pool(32)  inventory(32)
/// authority_bump(1)  paused(1)  bump(1)  = 171 bytes
/// ```
#[derive(Debug, Clone)]
pub struct SaleState {
    pub owner:       Pubkey,
    pub token_mint:  Pubkey,
    pub beneficiary: Pubkey,
    pub pool:        Pubkey,
    pub inventory:   Pubkey,
    pub paused:      bool,
}

pub fn parse_sale(data: &[u8]) -> Result<SaleState> {
    require_len(data, 171, "Sale")?;
    Ok(SaleState {
        owner:       read_pubkey(data, 8)?,
        token_mint:  read_pubkey(data, 40)?,
        beneficiary: read_pubkey(data, 72)?,
        pool:        read_pubkey(data, 104)?,
        inventory:   read_pubkey(data, 136)?,
        paused:      read_u8(data, 169)? != 0,
    })
}

// ─── RouterConfig (fetch-router) ──────────────────────────────────────────────

/// Deserialized `RouterConfig` state.
///
/// ```text
/// owner(32)  token_mint(32)  pool(32)  lp_mint(32)  native_is_a(1)  sale(32)
/// router_token(32)  router_lp(32)
/// sale_percent(1)  pool_percent(1)  burn_percent(1)
/// stake_claimable(32)  stake_non_claimable(32)
/// authority_bump(1)  bump(1)  = 302 bytes
/// ```
#[derive(Debug, Clone)]
pub struct RouterState {
    pub owner:               Pubkey,
    pub token_mint:          Pubkey,
    pub pool:                Pubkey,
    pub lp_mint:             Pubkey,
    /// wSOL is the pool's token A side.
    pub native_is_a:         bool,
    pub sale:                Pubkey,
    pub router_token:        Pubkey,
    pub router_lp:           Pubkey,
    pub sale_percent:        u8,
    pub pool_percent:        u8,
    pub burn_percent:        u8,
    pub stake_claimable:     Pubkey,
    pub stake_non_claimable: Pubkey,
}

impl RouterState {
    pub fn vault_for(&self, use_claimable_vault: bool) -> Pubkey {
        if use_claimable_vault {
            self.stake_claimable
        } else {
            self.stake_non_claimable
        }
    }
}

pub fn parse_router(data: &[u8]) -> Result<RouterState> {
    require_len(data, 302, "RouterConfig")?;
    Ok(RouterState {
        owner:               read_pubkey(data, 8)?,
        token_mint:          read_pubkey(data, 40)?,
        pool:                read_pubkey(data, 72)?,
        lp_mint:             read_pubkey(data, 104)?,
        native_is_a:         read_u8(data, 136)? != 0,
        sale:                read_pubkey(data, 137)?,
        router_token:        read_pubkey(data, 169)?,
        router_lp:           read_pubkey(data, 201)?,
        sale_percent:        read_u8(data, 233)?,
        pool_percent:        read_u8(data, 234)?,
        burn_percent:        read_u8(data, 235)?,
        stake_claimable:     read_pubkey(data, 236)?,
        stake_non_claimable: read_pubkey(data, 268)?,
    })
}

// ─── SPL token / sysvar fields ────────────────────────────────────────────────

/// Read the `amount` field from a packed SPL token account.
///
/// Token account layout: `mint(32) owner(32) amount(8) …`
pub fn parse_token_amount(data: &[u8]) -> Result<u64> {
    read_u64(data, 64)
}

/// Read `supply` from a packed SPL mint.
///
/// Mint layout: `mint_authority(4+32) supply(8) decimals(1) …`
pub fn parse_mint_supply(data: &[u8]) -> Result<u64> {
    read_u64(data, 36)
}

/// Read `unix_timestamp` from the Clock sysvar.
///
/// Clock layout: `slot(8) epoch_start_timestamp(8) epoch(8) leader_schedule_epoch(8) unix_timestamp(8)`
pub fn parse_clock_timestamp(data: &[u8]) -> Result<i64> {
    read_i64(data, 32)
}

// ─── Byte-slice primitives ────────────────────────────────────────────────────

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    data.get(offset..offset + N)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| Error::ParseError {
            offset,
            reason: format!("slice too short for {N} bytes"),
        })
}

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    Ok(Pubkey::from(read_array::<32>(data, offset)?))
}

pub(crate) fn read_u8(data: &[u8], offset: usize) -> Result<u8> {
    Ok(read_array::<1>(data, offset)?[0])
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    Ok(u16::from_le_bytes(read_array(data, offset)?))
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    Ok(u64::from_le_bytes(read_array(data, offset)?))
}

pub(crate) fn read_i64(data: &[u8], offset: usize) -> Result<i64> {
    Ok(i64::from_le_bytes(read_array(data, offset)?))
}

pub(crate) fn read_u128(data: &[u8], offset: usize) -> Result<u128> {
    Ok(u128::from_le_bytes(read_array(data, offset)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    #[test]
    fn parses_vault_layout() {
        let owner = Pubkey::new_unique();
        let rewards_vault = Pubkey::new_unique();
        let mut data = vec![0u8; 274];
        put(&mut data, 8, owner.as_ref());
        put(&mut data, 168, rewards_vault.as_ref());
        data[201] = 1;
        put(&mut data, 210, &1_700_000_000i64.to_le_bytes());
        put(&mut data, 218, &42u64.to_le_bytes());
        put(&mut data, 250, &385u64.to_le_bytes());
        put(&mut data, 266, &(30 * 86_400i64).to_le_bytes());

        let vault = parse_vault(&data).unwrap();
        assert_eq!(vault.owner, owner);
        assert_eq!(vault.rewards_vault, rewards_vault);
        assert_eq!(vault.kind, VaultKind::Locked);
        assert_eq!(vault.rewards.total_staked, 42);
        assert_eq!(vault.rewards.reward_rate, 385);
        assert_eq!(vault.rewards.rewards_duration, 30 * 86_400);
        assert!(!vault.release_allowed(1_699_999_999));
        assert!(vault.release_allowed(1_700_000_000));
    }

    #[test]
    fn parses_router_split() {
        let claimable = Pubkey::new_unique();
        let mut data = vec![0u8; 302];
        data[136] = 1;
        data[233] = 40;
        data[234] = 60;
        data[235] = 5;
        put(&mut data, 236, claimable.as_ref());

        let router = parse_router(&data).unwrap();
        assert!(router.native_is_a);
        assert_eq!((router.sale_percent, router.pool_percent, router.burn_percent), (40, 60, 5));
        assert_eq!(router.vault_for(true), claimable);
    }

    #[test]
    fn short_accounts_are_rejected() {
        assert!(matches!(parse_pool(&[0u8; 100]), Err(Error::ParseError { .. })));
        assert!(matches!(parse_vault(&[0u8; 273]), Err(Error::ParseError { .. })));
        assert!(matches!(parse_token_amount(&[0u8; 70]), Err(Error::ParseError { offset: 64, .. })));
    }

    #[test]
    fn unknown_vault_kind_is_an_error() {
        let mut data = vec![0u8; 274];
        data[201] = 7;
        assert!(matches!(parse_vault(&data), Err(Error::ParseError { offset: 201, .. })));
    }
}
