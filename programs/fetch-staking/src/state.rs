use anchor_lang::prelude::*;
use crate::{
    engine::{RewardState, StakePosition},
    error::StakingError,
};

/// Release policy for rewards. Staked principal is never time-gated.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VaultKind {
    /// Rewards can be claimed at any time
    Claimable,
    /// Rewards (and exit) wait for `matures_at`
    Locked,
}

impl VaultKind {
    pub fn release_allowed(&self, now: i64, matures_at: i64) -> bool {
        match self {
            VaultKind::Claimable => true,
            VaultKind::Locked => now >= matures_at,
        }
    }
}

// ─── Vault ─────────────────────────────────────────────────────────────────
// One staking vault: LP shares in, project-token rewards out.
// The vault authority PDA owns both token accounts.
#[account]
pub struct Vault {
    pub owner: Pubkey,                  // 32
    /// Only key allowed to call notify_reward_amount
    pub rewards_distribution: Pubkey,   // 32
    pub staking_mint: Pubkey,           // 32
    pub rewards_mint: Pubkey,           // 32
    pub staking_vault: Pubkey,          // 32
    pub rewards_vault: Pubkey,          // 32
    pub authority_bump: u8,             // 1
    pub kind: VaultKind,                // 1
    pub deployed_at: i64,               // 8
    pub matures_at: i64,                // 8
    pub rewards: RewardState,           // 56
}

impl Vault {
    // 8 discriminator + 6*32 + 1 + 1 + 8 + 8 + 56 = 274
    pub const LEN: usize = 8 + 6 * 32 + 1 + 1 + 8 + 8 + RewardState::LEN;

    pub fn release_allowed(&self, now: i64) -> bool {
        self.kind.release_allowed(now, self.matures_at)
    }

    pub fn stake(&mut self, position: &mut StakePosition, amount: u64, now: i64) -> Result<()> {
        self.rewards.stake(position, amount, now)
    }

    /// Principal out. Open in both kinds, at any time.
    pub fn withdraw(&mut self, position: &mut StakePosition, amount: u64, now: i64) -> Result<()> {
        self.rewards.withdraw(position, amount, now)
    }

    /// Settle and take the owed reward.
    pub fn claim(&mut self, position: &mut StakePosition, now: i64) -> Result<u64> {
        require!(self.release_allowed(now), StakingError::NotMatured);
        self.rewards.claim(position, now)
    }

    /// Whole balance plus reward, as `(withdrawn, reward)`. Gated like `claim`,
    /// so nothing moves when a Locked vault refuses.
    pub fn exit_all(&mut self, position: &mut StakePosition, now: i64) -> Result<(u64, u64)> {
        require!(self.release_allowed(now), StakingError::NotMatured);
        let amount = position.balance;
        self.rewards.withdraw(position, amount, now)?;
        let reward = self.rewards.claim(position, now)?;
        Ok((amount, reward))
    }
}

// ─── StakeAccount ──────────────────────────────────────────────────────────
// One per (vault, owner). Created on first stake, never closed.
#[account]
pub struct StakeAccount {
    pub owner: Pubkey,                  // 32
    pub vault: Pubkey,                  // 32
    pub position: StakePosition,        // 32
    pub bump: u8,                       // 1
}

impl StakeAccount {
    // 8 discriminator + 32 + 32 + 32 + 1 = 105
    pub const LEN: usize = 105;
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000_000;
    const DAY: i64 = 86_400;
    const T0: i64 = 1_700_000_000;

    fn vault(kind: VaultKind) -> Vault {
        Vault {
            owner: Pubkey::new_unique(),
            rewards_distribution: Pubkey::new_unique(),
            staking_mint: Pubkey::new_unique(),
            rewards_mint: Pubkey::new_unique(),
            staking_vault: Pubkey::new_unique(),
            rewards_vault: Pubkey::new_unique(),
            authority_bump: 255,
            kind,
            deployed_at: T0,
            matures_at: T0 + 30 * DAY,
            rewards: RewardState::new(30 * DAY),
        }
    }

    #[test]
    fn locked_vault_releases_at_maturity() {
        assert!(!VaultKind::Locked.release_allowed(99, 100));
        assert!(VaultKind::Locked.release_allowed(100, 100));
        assert!(VaultKind::Claimable.release_allowed(0, 100));
    }

    #[test]
    fn locked_vault_refuses_claim_and_exit_before_maturity() {
        let mut locked = vault(VaultKind::Locked);
        locked.rewards.notify_reward_amount(UNIT, UNIT, T0).unwrap();
        let mut position = StakePosition::default();
        locked.stake(&mut position, UNIT, T0).unwrap();

        let early = T0 + DAY;
        assert_eq!(
            locked.exit_all(&mut position, early).unwrap_err(),
            error!(StakingError::NotMatured)
        );
        assert_eq!(
            locked.claim(&mut position, early).unwrap_err(),
            error!(StakingError::NotMatured)
        );
        // a refused exit leaves the position untouched
        assert_eq!(position.balance, UNIT);
        assert_eq!(locked.rewards.total_staked, UNIT);

        locked.withdraw(&mut position, UNIT / 2, early).unwrap();
        assert_eq!(position.balance, UNIT / 2);
        // principal left early, the reward it earned stays owed
        assert_eq!(position.rewards, 385 * DAY as u64);
    }

    #[test]
    fn claimable_vault_pays_at_any_time() {
        let mut claimable = vault(VaultKind::Claimable);
        claimable.rewards.notify_reward_amount(UNIT, UNIT, T0).unwrap();
        let mut position = StakePosition::default();
        claimable.stake(&mut position, UNIT, T0).unwrap();

        assert_eq!(claimable.claim(&mut position, T0 + DAY).unwrap(), 385 * DAY as u64);
        let (withdrawn, reward) = claimable.exit_all(&mut position, T0 + 2 * DAY).unwrap();
        assert_eq!(withdrawn, UNIT);
        assert_eq!(reward, 385 * DAY as u64);
        assert_eq!(claimable.rewards.total_staked, 0);
    }

    #[test]
    fn exit_with_nothing_staked_fails() {
        let mut claimable = vault(VaultKind::Claimable);
        let mut position = StakePosition::default();
        assert_eq!(
            claimable.exit_all(&mut position, T0).unwrap_err(),
            error!(StakingError::ZeroAmount)
        );
    }

    /// Two depositors stake a unit each in a 30-day Locked vault funded with
    /// one unit, then both exit after 31 days.
    #[test]
    fn two_stakers_exit_a_locked_period_evenly() {
        let mut locked = vault(VaultKind::Locked);
        let (mut alice, mut bob) = (StakePosition::default(), StakePosition::default());
        locked.stake(&mut alice, UNIT, T0).unwrap();
        locked.stake(&mut bob, UNIT, T0).unwrap();
        locked.rewards.notify_reward_amount(UNIT, UNIT, T0).unwrap();

        assert_eq!(
            locked.exit_all(&mut alice, T0 + 29 * DAY).unwrap_err(),
            error!(StakingError::NotMatured)
        );

        let later = T0 + 31 * DAY;
        let (alice_out, alice_reward) = locked.exit_all(&mut alice, later).unwrap();
        let (bob_out, bob_reward) = locked.exit_all(&mut bob, later).unwrap();
        assert_eq!((alice_out, bob_out), (UNIT, UNIT));
        assert_eq!(alice_reward, bob_reward);
        assert_eq!(alice_reward, 498_960_000);
        // within 1% of half a unit, the remainder is rate truncation
        assert!(UNIT / 2 - alice_reward < UNIT / 100);
        assert_eq!(locked.rewards.total_staked, 0);
    }
}
