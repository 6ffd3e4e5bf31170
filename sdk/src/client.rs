//! [`FetchClient`]: the main entry point for integrations.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    sysvar,
    transaction::Transaction,
};

use crate::{
    error::{Error, Result},
    instructions::{
        buy_ix, close_token_account_ix, create_ata_idempotent_ix, deposit_ix, derive_ata,
        derive_stake_account, exit_ix, get_reward_ix, notify_reward_amount_ix,
        remove_liquidity_ix, set_compute_unit_limit_ix, stake_ix, update_burn_percent_ix, update_split_ix, withdraw_ix,
        DepositAccounts, ProgramIds, INCINERATOR, WSOL_MINT,
    },
    math::{earned, liquidity_to_withdraw, preview_deposit, sale_price},
    state::{
        parse_clock_timestamp, parse_mint_supply, parse_pool, parse_router, parse_sale,
        parse_stake_account, parse_token_amount, parse_vault, PoolState, RouterState,
        SaleState, StakeAccountState, VaultState,
    },
    types::{
        BuyResult, DepositParams, DepositPreview, DepositResult, PositionInfo, RedeemResult,
        RouterInfo, SaleQuote, StakeTxResult,
    },
};

/// Compute units requested for a deposit transaction.
pub const DEPOSIT_COMPUTE_UNITS: u32 = 600_000;

const DEVNET_RPC:  &str = "https://api.devnet.solana.com";
const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

/// Router, pool and sale state read in one go.
struct Snapshot {
    router:         RouterState,
    pool:           PoolState,
    sale:           SaleState,
    reserve_native: u64,
    reserve_token:  u64,
    lp_supply:      u64,
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async client for one deployed router.
///
/// ```rust,no_run
/// # use fetch_sdk::{FetchClient, DepositParams};
/// # use solana_sdk::{pubkey::Pubkey, signature::Keypair};
/// # use std::str::FromStr;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let router = Pubkey::from_str("7Yx3X2fE6wFt7h3nHpU1bWJbAxBvJ4oG3zE8L6jQfBbd")?;
/// let client = FetchClient::devnet(router);
/// let preview = client.preview(&DepositParams {
///     lamports: 100_000_000, token_amount: None, use_claimable_vault: true,
/// }).await?;
/// println!("Would stake {} LP shares", preview.staked);
/// # Ok(())
/// # }
/// ```
pub struct FetchClient {
    rpc_url: String,
    router:  Pubkey,
    ids:     ProgramIds,
}

impl FetchClient {
    /// Create a client for the router config at `router`.
    pub fn new(rpc_url: impl Into<String>, router: Pubkey) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            router,
            ids: ProgramIds::default(),
        }
    }

    pub fn devnet(router: Pubkey) -> Self {
        Self::new(DEVNET_RPC, router)
    }

    pub fn mainnet(router: Pubkey) -> Self {
        Self::new(MAINNET_RPC, router)
    }

    /// Override the program IDs (locally deployed programs in tests).
    pub fn with_program_ids(mut self, ids: ProgramIds) -> Self {
        self.ids = ids;
        self
    }

    pub fn router(&self) -> Pubkey {
        self.router
    }

    // ── Deposit ───────────────────────────────────────────────────────────────

    /// Simulate a deposit against live reserves. No transaction is sent.
    pub async fn preview(&self, params: &DepositParams) -> Result<DepositPreview> {
        let rpc = self.rpc();
        let snap = self.snapshot(&rpc).await?;
        Self::preview_with(&snap, params)
    }

    /// Deposit SOL (and optionally project tokens) and stake the LP shares.
    ///
    /// Creates the caller's token and LP ATAs and the incinerator's LP ATA
    /// first when they are missing.
    pub async fn deposit(&self, payer: &Keypair, params: DepositParams) -> Result<DepositResult> {
        if params.token_amount == Some(0) {
            return Err(Error::InvalidArgument("token_amount must be > 0".into()));
        }
        let rpc = self.rpc();
        let snap = self.snapshot(&rpc).await?;
        let preview = Self::preview_with(&snap, &params)?;

        let user = payer.pubkey();
        let vault = snap.router.vault_for(params.use_claimable_vault);
        let vault_state = parse_vault(&self.load(&rpc, &vault).await?)?;
        let (stake_account, _) = derive_stake_account(&vault, &user, &self.ids.staking);
        let staked_before = self.stake_balance(&rpc, &stake_account).await?;

        // the deposit alone nearly fills a legacy transaction, so the
        // accounts it sweeps into are created first
        let setup = vec![
            create_ata_idempotent_ix(&user, &user, &snap.router.token_mint),
            create_ata_idempotent_ix(&user, &user, &snap.router.lp_mint),
            create_ata_idempotent_ix(&user, &INCINERATOR, &snap.router.lp_mint),
        ];
        self.sign_and_send(&rpc, &setup, payer, &[]).await?;

        let ixs = vec![
            set_compute_unit_limit_ix(DEPOSIT_COMPUTE_UNITS),
            deposit_ix(
                &DepositAccounts {
                    ids:          &self.ids,
                    user,
                    router:       self.router,
                    router_state: &snap.router,
                    pool_state:   &snap.pool,
                    sale_state:   &snap.sale,
                    vault,
                    vault_state:  &vault_state,
                },
                params.use_claimable_vault,
                params.lamports,
                params.token_amount,
            ),
        ];
        let sig = self.sign_and_send(&rpc, &ixs, payer, &[]).await?;
        let staked_after = self.stake_balance(&rpc, &stake_account).await?;

        Ok(DepositResult {
            signature: sig.to_string(),
            vault,
            staked_before,
            staked_after,
            preview,
        })
    }

    // ── Staking ───────────────────────────────────────────────────────────────

    /// The caller's position in the claimable or locked vault.
    pub async fn position(&self, owner: &Pubkey, use_claimable_vault: bool) -> Result<PositionInfo> {
        let rpc = self.rpc();
        let router = parse_router(&self.load(&rpc, &self.router).await?)?;
        let vault = router.vault_for(use_claimable_vault);
        let vault_state = parse_vault(&self.load(&rpc, &vault).await?)?;
        let (stake_account, _) = derive_stake_account(&vault, owner, &self.ids.staking);
        let stake = self.stake_state(&rpc, &stake_account).await?;
        let now = self.now(&rpc).await?;

        Ok(PositionInfo {
            vault,
            stake_account,
            kind:          vault_state.kind,
            balance:       stake.balance,
            total_staked:  vault_state.rewards.total_staked,
            earned:        earned(&vault_state.rewards, &stake, now)?,
            reward_rate:   vault_state.rewards.reward_rate,
            period_finish: vault_state.rewards.period_finish,
            matures_at:    vault_state.matures_at,
            unlocked:      vault_state.release_allowed(now),
        })
    }

    /// Stake LP shares the caller already holds in its LP ATA.
    pub async fn stake(&self, payer: &Keypair, use_claimable_vault: bool, amount: u64) -> Result<StakeTxResult> {
        if amount == 0 {
            return Err(Error::InvalidArgument("amount must be > 0".into()));
        }
        let rpc = self.rpc();
        let (vault, vault_state) = self.open_vault(&rpc, use_claimable_vault, false).await?;
        let ix = stake_ix(&self.ids.staking, &payer.pubkey(), &vault, &vault_state, amount);
        self.send_tracked(&rpc, &[ix], payer, vault, &vault_state).await
    }

    /// Unstake `amount` LP shares to the caller's LP ATA.
    pub async fn withdraw(&self, payer: &Keypair, use_claimable_vault: bool, amount: u64) -> Result<StakeTxResult> {
        if amount == 0 {
            return Err(Error::InvalidArgument("amount must be > 0".into()));
        }
        let rpc = self.rpc();
        let (vault, vault_state) = self.open_vault(&rpc, use_claimable_vault, false).await?;
        let owner = payer.pubkey();
        let ixs = vec![
            create_ata_idempotent_ix(&owner, &owner, &vault_state.staking_mint),
            withdraw_ix(&self.ids.staking, &owner, &vault, &vault_state, amount),
        ];
        self.send_tracked(&rpc, &ixs, payer, vault, &vault_state).await
    }

    /// Claim accrued rewards.
    pub async fn get_reward(&self, payer: &Keypair, use_claimable_vault: bool) -> Result<StakeTxResult> {
        let rpc = self.rpc();
        let (vault, vault_state) = self.open_vault(&rpc, use_claimable_vault, true).await?;
        let owner = payer.pubkey();
        let ixs = vec![
            create_ata_idempotent_ix(&owner, &owner, &vault_state.rewards_mint),
            get_reward_ix(&self.ids.staking, &owner, &vault, &vault_state),
        ];
        self.send_tracked(&rpc, &ixs, payer, vault, &vault_state).await
    }

    /// Withdraw everything and claim.
    pub async fn exit(&self, payer: &Keypair, use_claimable_vault: bool) -> Result<StakeTxResult> {
        let rpc = self.rpc();
        let (vault, vault_state) = self.open_vault(&rpc, use_claimable_vault, true).await?;
        let owner = payer.pubkey();
        let ixs = vec![
            create_ata_idempotent_ix(&owner, &owner, &vault_state.staking_mint),
            create_ata_idempotent_ix(&owner, &owner, &vault_state.rewards_mint),
            exit_ix(&self.ids.staking, &owner, &vault, &vault_state),
        ];
        self.send_tracked(&rpc, &ixs, payer, vault, &vault_state).await
    }

    // ── Pool ──────────────────────────────────────────────────────────────────

    /// Burn LP shares from the caller's LP ATA for both pool tokens. The wSOL
    /// side is unwrapped to SOL in the same transaction. Minimums are the
    /// current proportional amounts less `max_slippage_bps`.
    pub async fn redeem(&self, payer: &Keypair, lp_amount: u64, max_slippage_bps: u16) -> Result<RedeemResult> {
        if lp_amount == 0 {
            return Err(Error::InvalidArgument("lp_amount must be > 0".into()));
        }
        if max_slippage_bps > 10_000 {
            return Err(Error::InvalidArgument("max_slippage_bps must be at most 10000".into()));
        }
        let rpc = self.rpc();
        let snap = self.snapshot(&rpc).await?;
        let (lamports, tokens) =
            liquidity_to_withdraw(lp_amount, snap.reserve_native, snap.reserve_token, snap.lp_supply)?;
        let floor = |amount: u64| {
            (amount as u128 * (10_000 - max_slippage_bps as u128) / 10_000) as u64
        };
        let (min_a, min_b) = if snap.router.native_is_a {
            (floor(lamports), floor(tokens))
        } else {
            (floor(tokens), floor(lamports))
        };

        let owner = payer.pubkey();
        let wsol_ata = derive_ata(&owner, &WSOL_MINT);
        let ixs = vec![
            create_ata_idempotent_ix(&owner, &owner, &WSOL_MINT),
            create_ata_idempotent_ix(&owner, &owner, &snap.router.token_mint),
            remove_liquidity_ix(&self.ids.amm, &owner, &snap.router.pool, &snap.pool, lp_amount, min_a, min_b),
            close_token_account_ix(&wsol_ata, &owner, &owner),
        ];
        let sig = self.sign_and_send(&rpc, &ixs, payer, &[]).await?;
        Ok(RedeemResult {
            signature: sig.to_string(),
            lp_burned: lp_amount,
            lamports,
            tokens,
        })
    }

    // ── Admin ─────────────────────────────────────────────────────────────────

    /// Start a reward period from tokens already transferred to the vault's
    /// rewards account. `distributor` must be the vault's rewards_distribution.
    pub async fn notify_reward_amount(
        &self,
        distributor:         &Keypair,
        use_claimable_vault: bool,
        amount:              u64,
    ) -> Result<Signature> {
        let rpc = self.rpc();
        let (vault, vault_state) = self.open_vault(&rpc, use_claimable_vault, false).await?;
        let ix = notify_reward_amount_ix(&self.ids.staking, &distributor.pubkey(), &vault, &vault_state, amount);
        self.sign_and_send(&rpc, &[ix], distributor, &[]).await
    }

    /// Owner only: change how the converted half is divided. Must sum to 100.
    pub async fn update_split(&self, owner: &Keypair, sale_percent: u8, pool_percent: u8) -> Result<Signature> {
        if sale_percent as u16 + pool_percent as u16 != 100 {
            return Err(Error::InvalidArgument("sale + pool percent must equal 100".into()));
        }
        let ix = update_split_ix(&self.ids.router, &owner.pubkey(), &self.router, sale_percent, pool_percent);
        self.sign_and_send(&self.rpc(), &[ix], owner, &[]).await
    }

    /// Owner only: share of minted LP that is burned, 1 to 10.
    pub async fn update_burn_percent(&self, owner: &Keypair, burn_percent: u8) -> Result<Signature> {
        if !(1..=10).contains(&burn_percent) {
            return Err(Error::InvalidArgument("burn percent must be between 1 and 10".into()));
        }
        let ix = update_burn_percent_ix(&self.ids.router, &owner.pubkey(), &self.router, burn_percent);
        self.sign_and_send(&self.rpc(), &[ix], owner, &[]).await
    }

    // ── Sale ──────────────────────────────────────────────────────────────────

    /// Tokens the sale would hand out for `lamports` right now.
    pub async fn sale_price(&self, lamports: u64) -> Result<SaleQuote> {
        let rpc = self.rpc();
        let snap = self.snapshot(&rpc).await?;
        let tokens = sale_price(lamports, snap.reserve_native, snap.reserve_token, snap.pool.fee_rate_bps)?;
        let inventory = parse_token_amount(&self.load(&rpc, &snap.sale.inventory).await?)?;
        Ok(SaleQuote {
            sale: snap.router.sale,
            lamports,
            tokens,
            inventory,
            paused: snap.sale.paused,
        })
    }

    /// Buy project tokens from the sale directly, outside the router.
    pub async fn buy(&self, payer: &Keypair, lamports: u64) -> Result<BuyResult> {
        let quote = self.sale_price(lamports).await?;
        if quote.paused {
            return Err(Error::InvalidArgument("sale is paused".into()));
        }
        if quote.tokens == 0 {
            return Err(Error::InvalidArgument(format!("{lamports} lamports buys zero tokens")));
        }
        let rpc = self.rpc();
        let sale = parse_sale(&self.load(&rpc, &quote.sale).await?)?;
        let pool = parse_pool(&self.load(&rpc, &sale.pool).await?)?;
        let buyer = payer.pubkey();
        let ixs = vec![
            create_ata_idempotent_ix(&buyer, &buyer, &sale.token_mint),
            buy_ix(&self.ids.sale, &buyer, &quote.sale, &sale, &pool, lamports),
        ];
        let sig = self.sign_and_send(&rpc, &ixs, payer, &[]).await?;
        Ok(BuyResult {
            signature: sig.to_string(),
            lamports,
            tokens: quote.tokens,
        })
    }

    // ── Read-only ─────────────────────────────────────────────────────────────

    /// Router configuration joined with live pool and sale state.
    pub async fn router_info(&self) -> Result<RouterInfo> {
        let rpc = self.rpc();
        let snap = self.snapshot(&rpc).await?;
        let sale_inventory = parse_token_amount(&self.load(&rpc, &snap.sale.inventory).await?)?;
        let spot_price = if snap.reserve_native == 0 {
            0.0
        } else {
            snap.reserve_token as f64 / snap.reserve_native as f64
        };
        let r = snap.router;
        Ok(RouterInfo {
            router:              self.router,
            owner:               r.owner,
            token_mint:          r.token_mint,
            pool:                r.pool,
            lp_mint:             r.lp_mint,
            sale:                r.sale,
            sale_paused:         snap.sale.paused,
            sale_inventory,
            sale_percent:        r.sale_percent,
            pool_percent:        r.pool_percent,
            burn_percent:        r.burn_percent,
            stake_claimable:     r.stake_claimable,
            stake_non_claimable: r.stake_non_claimable,
            reserve_native:      snap.reserve_native,
            reserve_token:       snap.reserve_token,
            lp_supply:           snap.lp_supply,
            fee_rate_bps:        snap.pool.fee_rate_bps,
            spot_price,
        })
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn rpc(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), CommitmentConfig::confirmed())
    }

    async fn sign_and_send(
        &self,
        rpc:          &RpcClient,
        instructions: &[Instruction],
        payer:        &Keypair,
        extra:        &[&Keypair],
    ) -> Result<Signature> {
        let blockhash = rpc.get_latest_blockhash().await?;
        let mut signers: Vec<&dyn Signer> = vec![payer];
        signers.extend(extra.iter().map(|k| k as &dyn Signer));
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &signers,
            blockhash,
        );
        Ok(rpc.send_and_confirm_transaction(&tx).await?)
    }

    async fn load(&self, rpc: &RpcClient, address: &Pubkey) -> Result<Vec<u8>> {
        rpc.get_account_with_commitment(address, rpc.commitment())
            .await?
            .value
            .map(|account| account.data)
            .ok_or(Error::AccountNotFound(*address))
    }

    async fn token_balance(&self, rpc: &RpcClient, address: &Pubkey) -> Result<u64> {
        match self.load(rpc, address).await {
            Ok(data) => parse_token_amount(&data),
            Err(Error::AccountNotFound(_)) => Ok(0),
            Err(e) => Err(e),
        }
    }

    async fn stake_state(&self, rpc: &RpcClient, stake_account: &Pubkey) -> Result<StakeAccountState> {
        match self.load(rpc, stake_account).await {
            Ok(data) => parse_stake_account(&data),
            Err(Error::AccountNotFound(_)) => Ok(StakeAccountState::default()),
            Err(e) => Err(e),
        }
    }

    async fn stake_balance(&self, rpc: &RpcClient, stake_account: &Pubkey) -> Result<u64> {
        Ok(self.stake_state(rpc, stake_account).await?.balance)
    }

    /// Cluster time from the Clock sysvar, the same clock the programs gate on.
    async fn now(&self, rpc: &RpcClient) -> Result<i64> {
        parse_clock_timestamp(&self.load(rpc, &sysvar::clock::ID).await?)
    }

    async fn snapshot(&self, rpc: &RpcClient) -> Result<Snapshot> {
        let router = parse_router(&self.load(rpc, &self.router).await?)?;
        let pool = parse_pool(&self.load(rpc, &router.pool).await?)?;
        let sale = parse_sale(&self.load(rpc, &router.sale).await?)?;
        let reserve_a = parse_token_amount(&self.load(rpc, &pool.token_a_vault).await?)?;
        let reserve_b = parse_token_amount(&self.load(rpc, &pool.token_b_vault).await?)?;
        let lp_supply = parse_mint_supply(&self.load(rpc, &pool.lp_mint).await?)?;
        let (reserve_native, reserve_token) = if router.native_is_a {
            (reserve_a, reserve_b)
        } else {
            (reserve_b, reserve_a)
        };
        Ok(Snapshot { router, pool, sale, reserve_native, reserve_token, lp_supply })
    }

    fn preview_with(snap: &Snapshot, params: &DepositParams) -> Result<DepositPreview> {
        preview_deposit(
            params.lamports,
            params.token_amount.unwrap_or(0),
            snap.router.sale_percent,
            snap.router.burn_percent,
            snap.reserve_native,
            snap.reserve_token,
            snap.lp_supply,
            snap.pool.fee_rate_bps,
        )
    }

    /// Resolve a vault; with `gated`, refuse early while a locked vault is immature.
    async fn open_vault(
        &self,
        rpc: &RpcClient,
        use_claimable_vault: bool,
        gated: bool,
    ) -> Result<(Pubkey, VaultState)> {
        let router = parse_router(&self.load(rpc, &self.router).await?)?;
        let vault = router.vault_for(use_claimable_vault);
        let vault_state = parse_vault(&self.load(rpc, &vault).await?)?;
        if gated && !vault_state.release_allowed(self.now(rpc).await?) {
            return Err(Error::VaultLocked { matures_at: vault_state.matures_at });
        }
        Ok((vault, vault_state))
    }

    /// Send a staking transaction and report how much LP and reward the caller received.
    async fn send_tracked(
        &self,
        rpc:         &RpcClient,
        ixs:         &[Instruction],
        payer:       &Keypair,
        vault:       Pubkey,
        vault_state: &VaultState,
    ) -> Result<StakeTxResult> {
        let owner = payer.pubkey();
        let lp_ata = derive_ata(&owner, &vault_state.staking_mint);
        let reward_ata = derive_ata(&owner, &vault_state.rewards_mint);
        let lp_before = self.token_balance(rpc, &lp_ata).await?;
        let reward_before = self.token_balance(rpc, &reward_ata).await?;

        let sig = self.sign_and_send(rpc, ixs, payer, &[]).await?;

        let lp_after = self.token_balance(rpc, &lp_ata).await?;
        let reward_after = self.token_balance(rpc, &reward_ata).await?;
        Ok(StakeTxResult {
            signature:  sig.to_string(),
            vault,
            lp_out:     lp_after.saturating_sub(lp_before),
            reward_out: reward_after.saturating_sub(reward_before),
        })
    }
}
