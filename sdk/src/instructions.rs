//! Low-level Anchor instruction builders.
//!
//! Each function constructs a [`solana_sdk::instruction::Instruction`] ready
//! for signing and submission. Account order mirrors the `#[derive(Accounts)]`
//! structs of the on-chain programs exactly.
//!
//! Anchor instruction discriminators: `sha256("global:{name}")[..8]`.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey,
    pubkey::Pubkey,
    system_program,
    sysvar,
};

use crate::state::{PoolState, RouterState, SaleState, VaultState};

// ─── Program IDs ──────────────────────────────────────────────────────────────

pub const ROUTER_PROGRAM_ID:  Pubkey = pubkey!("yyVAWDm5uaASce7Xo7dBY9kKsSY9J1BkWWiqtyw1wdb");
pub const AMM_PROGRAM_ID:     Pubkey = pubkey!("AgJHCK35ytS5JjZeFv71Kz99K31ay3E5RwyV2HJcMGGt");
pub const SALE_PROGRAM_ID:    Pubkey = pubkey!("3jVBPCyvbyhKthZTwzc3Xt1ozjWVQpAGtv5t2tm882JA");
pub const STAKING_PROGRAM_ID: Pubkey = pubkey!("8KnjGSs2ztuH5kGUJdbtF9PtL7qEKEUb5utQv5NWNHZY");

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ATA_PROGRAM_ID:   Pubkey = pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const WSOL_MINT:        Pubkey = pubkey!("So11111111111111111111111111111111111111112");
/// Owner of the LP burn account; nobody can sign for it.
pub const COMPUTE_BUDGET_PROGRAM_ID: Pubkey = pubkey!("ComputeBudget111111111111111111111111111111");
pub const INCINERATOR:      Pubkey = pubkey!("1nc1nerator11111111111111111111111111111111");

/// The four deployed programs. Override for local validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramIds {
    pub router:  Pubkey,
    pub amm:     Pubkey,
    pub sale:    Pubkey,
    pub staking: Pubkey,
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            router:  ROUTER_PROGRAM_ID,
            amm:     AMM_PROGRAM_ID,
            sale:    SALE_PROGRAM_ID,
            staking: STAKING_PROGRAM_ID,
        }
    }
}

// ─── PDA seeds (mirror each program's constants.rs) ───────────────────────────

pub const ROUTER_SEED:           &[u8] = b"router";
pub const ROUTER_AUTHORITY_SEED: &[u8] = b"router_authority";
pub const ROUTER_TOKEN_SEED:     &[u8] = b"router_token";
pub const ROUTER_LP_SEED:        &[u8] = b"router_lp";
pub const WSOL_ESCROW_SEED:      &[u8] = b"wsol_escrow";
pub const POOL_SEED:             &[u8] = b"pool";
pub const POOL_AUTHORITY_SEED:   &[u8] = b"pool_authority";
pub const LP_MINT_SEED:          &[u8] = b"lp_mint";
pub const SALE_SEED:             &[u8] = b"sale";
pub const SALE_AUTHORITY_SEED:   &[u8] = b"sale_authority";
pub const INVENTORY_SEED:        &[u8] = b"inventory";
pub const VAULT_AUTHORITY_SEED:  &[u8] = b"vault_authority";
pub const STAKING_VAULT_SEED:    &[u8] = b"staking_vault";
pub const REWARDS_VAULT_SEED:    &[u8] = b"rewards_vault";
pub const STAKE_SEED:            &[u8] = b"stake";

// ─── PDA derivation helpers ───────────────────────────────────────────────────

/// Router config PDA for a project token.
pub fn derive_router(token_mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ROUTER_SEED, token_mint.as_ref()], program_id)
}

pub fn derive_router_authority(config: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ROUTER_AUTHORITY_SEED, config.as_ref()], program_id)
}

/// Per-deposit wSOL escrow; created and closed inside one deposit.
pub fn derive_wsol_escrow(config: &Pubkey, user: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[WSOL_ESCROW_SEED, config.as_ref(), user.as_ref()], program_id)
}

pub fn derive_pool(mint_a: &Pubkey, mint_b: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_SEED, mint_a.as_ref(), mint_b.as_ref()], program_id)
}

pub fn derive_pool_authority(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_AUTHORITY_SEED, pool.as_ref()], program_id)
}

pub fn derive_lp_mint(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_MINT_SEED, pool.as_ref()], program_id)
}

pub fn derive_sale(token_mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SALE_SEED, token_mint.as_ref()], program_id)
}

pub fn derive_sale_authority(sale: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SALE_AUTHORITY_SEED, sale.as_ref()], program_id)
}

pub fn derive_vault_authority(vault: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_AUTHORITY_SEED, vault.as_ref()], program_id)
}

/// Per-user stake PDA inside a vault.
pub fn derive_stake_account(vault: &Pubkey, owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKE_SEED, vault.as_ref(), owner.as_ref()], program_id)
}

/// Derive the Associated Token Account for a wallet + mint.
pub fn derive_ata(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[wallet.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ATA_PROGRAM_ID,
    )
    .0
}

// ─── Discriminator ────────────────────────────────────────────────────────────

fn disc(name: &str) -> [u8; 8] {
    let preimage = format!("global:{name}");
    let h = solana_sdk::hash::hash(preimage.as_bytes()).to_bytes();
    let mut out = [0u8; 8];
    out.copy_from_slice(&h[..8]);
    out
}

// ─── Associated token accounts ────────────────────────────────────────────────

/// `CreateIdempotent` on the ATA program: a no-op when the account exists.
pub fn create_ata_idempotent_ix(payer: &Pubkey, wallet: &Pubkey, mint: &Pubkey) -> Instruction {
    Instruction {
        program_id: ATA_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(derive_ata(wallet, mint), false),
            AccountMeta::new_readonly(*wallet, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: vec![1],
    }
}

/// SPL `CloseAccount`. On a wSOL account this unwraps the balance to `destination`.
pub fn close_token_account_ix(account: &Pubkey, destination: &Pubkey, owner: &Pubkey) -> Instruction {
    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*account, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*owner, true),
        ],
        data: vec![9],
    }
}

/// `SetComputeUnitLimit`. A deposit runs five CPIs and needs more than the default.
pub fn set_compute_unit_limit_ix(units: u32) -> Instruction {
    let mut data = vec![2];
    data.extend_from_slice(&units.to_le_bytes());
    Instruction {
        program_id: COMPUTE_BUDGET_PROGRAM_ID,
        accounts: vec![],
        data,
    }
}

// ─── fetch-amm ────────────────────────────────────────────────────────────────

/// Burn `lp_amount` shares held in the owner's LP ATA and receive both pool
/// tokens into the owner's ATAs.
pub fn remove_liquidity_ix(
    program_id: &Pubkey,
    owner:      &Pubkey,
    pool:       &Pubkey,
    pool_state: &PoolState,
    lp_amount:  u64,
    min_a:      u64,
    min_b:      u64,
) -> Instruction {
    let (pool_authority, _) = derive_pool_authority(pool, program_id);
    let mut data = disc("remove_liquidity").to_vec();
    data.extend_from_slice(&lp_amount.to_le_bytes());
    data.extend_from_slice(&min_a.to_le_bytes());
    data.extend_from_slice(&min_b.to_le_bytes());
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new_readonly(*pool, false),
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(pool_state.token_a_vault, false),
            AccountMeta::new(pool_state.token_b_vault, false),
            AccountMeta::new(pool_state.lp_mint, false),
            AccountMeta::new(derive_ata(owner, &pool_state.lp_mint), false),
            AccountMeta::new(derive_ata(owner, &pool_state.token_a_mint), false),
            AccountMeta::new(derive_ata(owner, &pool_state.token_b_mint), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data,
    }
}

// ─── fetch-router: deposit / deposit_with_token ───────────────────────────────

/// Everything a deposit touches, resolved from on-chain state.
#[derive(Debug, Clone)]
pub struct DepositAccounts<'a> {
    pub ids:         &'a ProgramIds,
    pub user:        Pubkey,
    pub router:      Pubkey,
    pub router_state: &'a RouterState,
    pub pool_state:  &'a PoolState,
    pub sale_state:  &'a SaleState,
    pub vault:       Pubkey,
    pub vault_state: &'a VaultState,
}

/// Build `deposit` (native only) or `deposit_with_token` when `token_amount` is set.
///
/// `user_token` and `user_lp` are the caller's ATAs and receive the swept
/// leftovers; `burn_lp` is the incinerator's LP ATA. All three must exist,
/// prepend [`create_ata_idempotent_ix`] for each.
pub fn deposit_ix(
    accts:               &DepositAccounts<'_>,
    use_claimable_vault: bool,
    lamports:            u64,
    token_amount:        Option<u64>,
) -> Instruction {
    let ids = accts.ids;
    let router = accts.router_state;
    let (router_authority, _) = derive_router_authority(&accts.router, &ids.router);
    let (wsol_escrow, _)      = derive_wsol_escrow(&accts.router, &accts.user, &ids.router);
    let (pool_authority, _)   = derive_pool_authority(&router.pool, &ids.amm);
    let (sale_authority, _)   = derive_sale_authority(&router.sale, &ids.sale);
    let (stake_account, _)    = derive_stake_account(&accts.vault, &accts.user, &ids.staking);

    let mut data = match token_amount {
        Some(_) => disc("deposit_with_token").to_vec(),
        None => disc("deposit").to_vec(),
    };
    data.push(use_claimable_vault as u8);
    data.extend_from_slice(&lamports.to_le_bytes());
    if let Some(amount) = token_amount {
        data.extend_from_slice(&amount.to_le_bytes());
    }

    Instruction {
        program_id: ids.router,
        accounts: vec![
            AccountMeta::new(accts.user, true),                       // mut + signer
            AccountMeta::new_readonly(accts.router, false),
            AccountMeta::new_readonly(router_authority, false),
            AccountMeta::new_readonly(WSOL_MINT, false),
            AccountMeta::new(wsol_escrow, false),                     // init
            AccountMeta::new(router.router_token, false),
            AccountMeta::new(router.router_lp, false),
            AccountMeta::new(derive_ata(&accts.user, &router.token_mint), false),
            AccountMeta::new(derive_ata(&accts.user, &router.lp_mint), false),
            AccountMeta::new(derive_ata(&INCINERATOR, &router.lp_mint), false),
            AccountMeta::new_readonly(router.pool, false),
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(accts.pool_state.token_a_vault, false),
            AccountMeta::new(accts.pool_state.token_b_vault, false),
            AccountMeta::new(router.lp_mint, false),
            AccountMeta::new_readonly(router.sale, false),
            AccountMeta::new_readonly(sale_authority, false),
            AccountMeta::new(accts.sale_state.inventory, false),
            AccountMeta::new(accts.sale_state.beneficiary, false),
            AccountMeta::new(accts.vault, false),
            AccountMeta::new(stake_account, false),                   // init_if_needed
            AccountMeta::new(accts.vault_state.staking_vault, false),
            AccountMeta::new_readonly(ids.amm, false),
            AccountMeta::new_readonly(ids.sale, false),
            AccountMeta::new_readonly(ids.staking, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

// ─── fetch-router: admin ──────────────────────────────────────────────────────

pub fn update_split_ix(
    program_id:   &Pubkey,
    owner:        &Pubkey,
    router:       &Pubkey,
    sale_percent: u8,
    pool_percent: u8,
) -> Instruction {
    let mut data = disc("update_split").to_vec();
    data.push(sale_percent);
    data.push(pool_percent);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*router, false),
        ],
        data,
    }
}

pub fn update_burn_percent_ix(
    program_id:   &Pubkey,
    owner:        &Pubkey,
    router:       &Pubkey,
    burn_percent: u8,
) -> Instruction {
    let mut data = disc("update_burn_percent").to_vec();
    data.push(burn_percent);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*router, false),
        ],
        data,
    }
}

// ─── fetch-staking ────────────────────────────────────────────────────────────

/// Direct stake of LP shares the caller already holds.
pub fn stake_ix(
    program_id:  &Pubkey,
    owner:       &Pubkey,
    vault:       &Pubkey,
    vault_state: &VaultState,
    amount:      u64,
) -> Instruction {
    let (stake_account, _) = derive_stake_account(vault, owner, program_id);
    let mut data = disc("stake").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*owner, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new(stake_account, false),
            AccountMeta::new(derive_ata(owner, &vault_state.staking_mint), false),
            AccountMeta::new(vault_state.staking_vault, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data,
    }
}

pub fn withdraw_ix(
    program_id:  &Pubkey,
    owner:       &Pubkey,
    vault:       &Pubkey,
    vault_state: &VaultState,
    amount:      u64,
) -> Instruction {
    let (vault_authority, _) = derive_vault_authority(vault, program_id);
    let (stake_account, _)   = derive_stake_account(vault, owner, program_id);
    let mut data = disc("withdraw").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(stake_account, false),
            AccountMeta::new(vault_state.staking_vault, false),
            AccountMeta::new(derive_ata(owner, &vault_state.staking_mint), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data,
    }
}

pub fn get_reward_ix(
    program_id:  &Pubkey,
    owner:       &Pubkey,
    vault:       &Pubkey,
    vault_state: &VaultState,
) -> Instruction {
    let (vault_authority, _) = derive_vault_authority(vault, program_id);
    let (stake_account, _)   = derive_stake_account(vault, owner, program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(stake_account, false),
            AccountMeta::new(vault_state.rewards_vault, false),
            AccountMeta::new(derive_ata(owner, &vault_state.rewards_mint), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: disc("get_reward").to_vec(),
    }
}

/// Withdraw the full balance and claim in one instruction.
pub fn exit_ix(
    program_id:  &Pubkey,
    owner:       &Pubkey,
    vault:       &Pubkey,
    vault_state: &VaultState,
) -> Instruction {
    let (vault_authority, _) = derive_vault_authority(vault, program_id);
    let (stake_account, _)   = derive_stake_account(vault, owner, program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(stake_account, false),
            AccountMeta::new(vault_state.staking_vault, false),
            AccountMeta::new(vault_state.rewards_vault, false),
            AccountMeta::new(derive_ata(owner, &vault_state.staking_mint), false),
            AccountMeta::new(derive_ata(owner, &vault_state.rewards_mint), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: disc("exit").to_vec(),
    }
}

/// Start a reward period from tokens already sent to the vault's rewards account.
pub fn notify_reward_amount_ix(
    program_id:           &Pubkey,
    rewards_distribution: &Pubkey,
    vault:                &Pubkey,
    vault_state:          &VaultState,
    amount:               u64,
) -> Instruction {
    let mut data = disc("notify_reward_amount").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*rewards_distribution, true),
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(vault_state.rewards_vault, false),
        ],
        data,
    }
}

// ─── fetch-sale ───────────────────────────────────────────────────────────────

/// Buy project tokens for `lamports` straight from the sale.
pub fn buy_ix(
    program_id: &Pubkey,
    buyer:      &Pubkey,
    sale:       &Pubkey,
    sale_state: &SaleState,
    pool_state: &PoolState,
    lamports:   u64,
) -> Instruction {
    let (sale_authority, _) = derive_sale_authority(sale, program_id);
    let mut data = disc("buy").to_vec();
    data.extend_from_slice(&lamports.to_le_bytes());
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*buyer, true),
            AccountMeta::new_readonly(*sale, false),
            AccountMeta::new_readonly(sale_authority, false),
            AccountMeta::new(sale_state.inventory, false),
            AccountMeta::new(derive_ata(buyer, &sale_state.token_mint), false),
            AccountMeta::new(sale_state.beneficiary, false),
            AccountMeta::new_readonly(sale_state.pool, false),
            AccountMeta::new_readonly(pool_state.token_a_vault, false),
            AccountMeta::new_readonly(pool_state.token_b_vault, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminators_are_distinct() {
        assert_ne!(disc("deposit"), disc("deposit_with_token"));
        assert_eq!(disc("deposit").len(), 8);
    }

    #[test]
    fn ata_is_deterministic() {
        let wallet = Pubkey::new_unique();
        assert_eq!(derive_ata(&wallet, &WSOL_MINT), derive_ata(&wallet, &WSOL_MINT));
        assert_ne!(derive_ata(&wallet, &WSOL_MINT), derive_ata(&INCINERATOR, &WSOL_MINT));
    }

    #[test]
    fn stake_pda_is_per_user() {
        let vault = Pubkey::new_unique();
        let (one, _) = derive_stake_account(&vault, &Pubkey::new_unique(), &STAKING_PROGRAM_ID);
        let (two, _) = derive_stake_account(&vault, &Pubkey::new_unique(), &STAKING_PROGRAM_ID);
        assert_ne!(one, two);
    }

    #[test]
    fn remove_liquidity_encodes_amounts_in_order() {
        let pool_state = PoolState {
            token_a_mint:  WSOL_MINT,
            token_b_mint:  Pubkey::new_unique(),
            token_a_vault: Pubkey::new_unique(),
            token_b_vault: Pubkey::new_unique(),
            lp_mint:       Pubkey::new_unique(),
            fee_rate_bps:  30,
        };
        let owner = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let ix = remove_liquidity_ix(&AMM_PROGRAM_ID, &owner, &pool, &pool_state, 7, 1, 2);

        assert_eq!(&ix.data[..8], &disc("remove_liquidity"));
        assert_eq!(&ix.data[8..16], &7u64.to_le_bytes());
        assert_eq!(&ix.data[16..24], &1u64.to_le_bytes());
        assert_eq!(&ix.data[24..], &2u64.to_le_bytes());
        assert_eq!(ix.accounts.len(), 10);
        assert_eq!(ix.accounts[6].pubkey, derive_ata(&owner, &pool_state.lp_mint));
        assert_eq!(ix.accounts[7].pubkey, derive_ata(&owner, &WSOL_MINT));
        assert!(!ix.accounts[1].is_writable);
    }

    #[test]
    fn split_update_encodes_both_percents() {
        let ix = update_split_ix(&ROUTER_PROGRAM_ID, &Pubkey::new_unique(), &Pubkey::new_unique(), 30, 70);
        assert_eq!(&ix.data[..8], &disc("update_split"));
        assert_eq!(&ix.data[8..], &[30, 70]);
        assert!(ix.accounts[0].is_signer);
        assert!(ix.accounts[1].is_writable);
    }
}
