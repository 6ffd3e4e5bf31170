/// PDA seeds
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";
pub const STAKING_VAULT_SEED: &[u8] = b"staking_vault";
pub const REWARDS_VAULT_SEED: &[u8] = b"rewards_vault";
pub const STAKE_SEED: &[u8] = b"stake";
