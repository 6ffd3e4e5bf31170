use anchor_lang::prelude::*;
use crate::error::StakingError;

/// Fixed-point scale of the reward accumulator.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

// ─── Reward accumulator ────────────────────────────────────────────────────
// Rewards stream at `reward_rate` per second until `period_finish`. The
// accumulator `reward_per_token_stored` grows by rate·elapsed/total_staked,
// and each position settles against its own snapshot, so a position's
// result depends only on its own operation order.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RewardState {
    pub total_staked: u64,              // 8
    pub reward_per_token_stored: u128,  // 16
    pub last_update_time: i64,          // 8
    pub reward_rate: u64,               // 8
    pub period_finish: i64,             // 8
    pub rewards_duration: i64,          // 8
}

/// Per-user slice of a vault.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StakePosition {
    pub balance: u64,                   // 8
    pub reward_per_token_paid: u128,    // 16
    pub rewards: u64,                   // 8
}

impl RewardState {
    pub const LEN: usize = 56;

    pub fn new(rewards_duration: i64) -> Self {
        Self {
            rewards_duration,
            ..Self::default()
        }
    }

    pub fn last_time_reward_applicable(&self, now: i64) -> i64 {
        now.min(self.period_finish)
    }

    /// Accumulator value as if refreshed at `now`.
    pub fn reward_per_token(&self, now: i64) -> Result<u128> {
        if self.total_staked == 0 {
            return Ok(self.reward_per_token_stored);
        }
        let elapsed = self
            .last_time_reward_applicable(now)
            .saturating_sub(self.last_update_time)
            .max(0) as u128;
        let increment = elapsed
            .checked_mul(self.reward_rate as u128)
            .ok_or(StakingError::MathOverflow)?
            .checked_mul(PRECISION)
            .ok_or(StakingError::MathOverflow)?
            / self.total_staked as u128;
        Ok(self
            .reward_per_token_stored
            .checked_add(increment)
            .ok_or(StakingError::MathOverflow)?)
    }

    /// Bring the accumulator up to `now`. Runs before every mutation.
    pub fn refresh(&mut self, now: i64) -> Result<()> {
        self.reward_per_token_stored = self.reward_per_token(now)?;
        self.last_update_time = self.last_time_reward_applicable(now);
        Ok(())
    }

    /// Move what `position` accrued since its snapshot into `rewards`.
    pub fn settle(&self, position: &mut StakePosition) -> Result<()> {
        let pending = pending_reward(position, self.reward_per_token_stored)?;
        position.rewards = position
            .rewards
            .checked_add(pending)
            .ok_or(StakingError::MathOverflow)?;
        position.reward_per_token_paid = self.reward_per_token_stored;
        Ok(())
    }

    pub fn earned(&self, position: &StakePosition, now: i64) -> Result<u64> {
        let pending = pending_reward(position, self.reward_per_token(now)?)?;
        Ok(position
            .rewards
            .checked_add(pending)
            .ok_or(StakingError::MathOverflow)?)
    }

    pub fn stake(&mut self, position: &mut StakePosition, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, StakingError::ZeroAmount);
        self.refresh(now)?;
        self.settle(position)?;
        position.balance = position
            .balance
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn withdraw(&mut self, position: &mut StakePosition, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, StakingError::ZeroAmount);
        require!(position.balance >= amount, StakingError::InsufficientBalance);
        self.refresh(now)?;
        self.settle(position)?;
        position.balance -= amount;
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    /// Settle and zero the position's rewards, returning the amount owed.
    pub fn claim(&mut self, position: &mut StakePosition, now: i64) -> Result<u64> {
        self.refresh(now)?;
        self.settle(position)?;
        Ok(std::mem::take(&mut position.rewards))
    }

    /// Start (or extend) a reward period of `rewards_duration` seconds.
    /// Undistributed rewards of a running period are folded into the new rate.
    /// `funded_balance` is what the rewards vault actually holds.
    pub fn notify_reward_amount(&mut self, amount: u64, funded_balance: u64, now: i64) -> Result<()> {
        require!(self.rewards_duration > 0, StakingError::InvalidDuration);
        self.refresh(now)?;

        let duration = self.rewards_duration as u128;
        let total = if now < self.period_finish {
            let remaining = (self.period_finish - now) as u128;
            let leftover = remaining
                .checked_mul(self.reward_rate as u128)
                .ok_or(StakingError::MathOverflow)?;
            (amount as u128)
                .checked_add(leftover)
                .ok_or(StakingError::MathOverflow)?
        } else {
            amount as u128
        };
        let reward_rate = total / duration;

        // rate·duration ≤ total, so this never overflows u128
        require!(
            reward_rate * duration <= funded_balance as u128,
            StakingError::UnderFunded
        );

        self.reward_rate = u64::try_from(reward_rate).map_err(|_| error!(StakingError::MathOverflow))?;
        self.last_update_time = now;
        self.period_finish = now
            .checked_add(self.rewards_duration)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    pub fn set_rewards_duration(&mut self, duration: i64, now: i64) -> Result<()> {
        require!(now > self.period_finish, StakingError::RewardPeriodActive);
        require!(duration > 0, StakingError::InvalidDuration);
        self.rewards_duration = duration;
        Ok(())
    }
}

fn pending_reward(position: &StakePosition, reward_per_token: u128) -> Result<u64> {
    let delta = reward_per_token.saturating_sub(position.reward_per_token_paid);
    let pending = (position.balance as u128)
        .checked_mul(delta)
        .ok_or(StakingError::MathOverflow)?
        / PRECISION;
    u64::try_from(pending).map_err(|_| error!(StakingError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000_000;
    const DAY: i64 = 86_400;
    const T0: i64 = 1_700_000_000;

    fn funded_vault() -> RewardState {
        let mut state = RewardState::new(30 * DAY);
        state.notify_reward_amount(UNIT, UNIT, T0).unwrap();
        state
    }

    #[test]
    fn equal_stakes_earn_equally() {
        let mut state = funded_vault();
        assert_eq!(state.reward_rate, 385);

        let mut one = StakePosition::default();
        let mut two = StakePosition::default();
        state.stake(&mut one, UNIT, T0).unwrap();
        state.stake(&mut two, UNIT, T0).unwrap();

        let later = T0 + 31 * DAY;
        let earned_one = state.earned(&one, later).unwrap();
        let earned_two = state.earned(&two, later).unwrap();
        assert_eq!(earned_one, earned_two);
        assert_eq!(earned_one, 498_960_000);

        assert_eq!(state.claim(&mut one, later).unwrap(), earned_one);
        assert_eq!(state.claim(&mut two, later).unwrap(), earned_two);
    }

    #[test]
    fn accrual_stops_at_period_finish() {
        let mut state = funded_vault();
        let mut one = StakePosition::default();
        state.stake(&mut one, UNIT, T0).unwrap();
        let at_finish = state.earned(&one, T0 + 30 * DAY).unwrap();
        let long_after = state.earned(&one, T0 + 90 * DAY).unwrap();
        assert_eq!(at_finish, long_after);
        assert_eq!(at_finish, 385 * 30 * DAY as u64);
    }

    #[test]
    fn second_claim_is_zero() {
        let mut state = funded_vault();
        let mut one = StakePosition::default();
        state.stake(&mut one, UNIT, T0).unwrap();

        let first = state.claim(&mut one, T0 + DAY).unwrap();
        assert!(first > 0);
        assert_eq!(state.claim(&mut one, T0 + DAY).unwrap(), 0);
        assert_eq!(one.rewards, 0);
    }

    #[test]
    fn same_block_order_does_not_matter() {
        let mut forward = funded_vault();
        let (mut a1, mut b1) = (StakePosition::default(), StakePosition::default());
        forward.stake(&mut a1, UNIT, T0 + DAY).unwrap();
        forward.stake(&mut b1, 3 * UNIT, T0 + DAY).unwrap();

        let mut reverse = funded_vault();
        let (mut a2, mut b2) = (StakePosition::default(), StakePosition::default());
        reverse.stake(&mut b2, 3 * UNIT, T0 + DAY).unwrap();
        reverse.stake(&mut a2, UNIT, T0 + DAY).unwrap();

        let later = T0 + 10 * DAY;
        assert_eq!(forward.earned(&a1, later).unwrap(), reverse.earned(&a2, later).unwrap());
        assert_eq!(forward.earned(&b1, later).unwrap(), reverse.earned(&b2, later).unwrap());
    }

    #[test]
    fn late_staker_earns_only_from_entry() {
        let mut state = funded_vault();
        let (mut early, mut late) = (StakePosition::default(), StakePosition::default());
        state.stake(&mut early, UNIT, T0).unwrap();
        state.stake(&mut late, UNIT, T0 + 10 * DAY).unwrap();

        let end = T0 + 30 * DAY;
        let early_earned = state.earned(&early, end).unwrap();
        let late_earned = state.earned(&late, end).unwrap();
        // 10 days alone then 20 days shared: 20 vs 10 day-shares
        assert!(early_earned > late_earned);
        assert!(early_earned - 2 * late_earned <= 1);
    }

    #[test]
    fn withdraw_keeps_accrued_rewards() {
        let mut state = funded_vault();
        let mut one = StakePosition::default();
        state.stake(&mut one, UNIT, T0).unwrap();
        state.withdraw(&mut one, UNIT, T0 + DAY).unwrap();

        assert_eq!(one.balance, 0);
        assert_eq!(state.total_staked, 0);
        assert_eq!(one.rewards, 385 * DAY as u64);
        assert_eq!(state.earned(&one, T0 + 20 * DAY).unwrap(), one.rewards);
    }

    #[test]
    fn zero_and_excess_amounts_are_rejected() {
        let mut state = funded_vault();
        let mut one = StakePosition::default();
        assert_eq!(
            state.stake(&mut one, 0, T0).unwrap_err(),
            error!(StakingError::ZeroAmount)
        );
        state.stake(&mut one, UNIT, T0).unwrap();
        assert_eq!(
            state.withdraw(&mut one, 0, T0).unwrap_err(),
            error!(StakingError::ZeroAmount)
        );
        assert_eq!(
            state.withdraw(&mut one, UNIT + 1, T0).unwrap_err(),
            error!(StakingError::InsufficientBalance)
        );
    }

    #[test]
    fn notify_folds_leftover_into_new_rate() {
        let mut state = funded_vault();
        let half = T0 + 15 * DAY;
        state.notify_reward_amount(0, UNIT, half).unwrap();
        // 385 * 15 days left over, spread across a fresh 30 days
        assert_eq!(state.reward_rate, 192);
        assert_eq!(state.period_finish, half + 30 * DAY);
        assert_eq!(state.last_update_time, half);
    }

    #[test]
    fn notify_requires_funded_balance() {
        let mut state = RewardState::new(30 * DAY);
        assert_eq!(
            state.notify_reward_amount(UNIT, UNIT / 2, T0).unwrap_err(),
            error!(StakingError::UnderFunded)
        );
    }

    #[test]
    fn duration_changes_only_between_periods() {
        let mut state = funded_vault();
        assert_eq!(
            state.set_rewards_duration(7 * DAY, T0 + DAY).unwrap_err(),
            error!(StakingError::RewardPeriodActive)
        );
        assert_eq!(
            state.set_rewards_duration(0, T0 + 31 * DAY).unwrap_err(),
            error!(StakingError::InvalidDuration)
        );
        state.set_rewards_duration(7 * DAY, T0 + 31 * DAY).unwrap();
        assert_eq!(state.rewards_duration, 7 * DAY);
    }
}
