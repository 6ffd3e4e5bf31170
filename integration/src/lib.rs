//! End-to-end harness for the Fetch programs.
//!
//! [`Fetch::load`] boots a LiteSVM instance with the four SBF builds and seeds
//! the world every scenario starts from:
//!
//! * a wSOL / project-token pool holding 500 / 500 units, wSOL on side A
//! * a sale over that pool with 1 000 units of inventory
//! * a Claimable and a Locked vault staking the pool's LP, each streaming one
//!   unit of project tokens over 30 days
//! * a router bound to all of the above, at the default 50 / 50 split and 10 % burn
//!
//! The programs are read from `$SBF_OUT_DIR`, falling back to `target/deploy`
//! at the repository root. Run `anchor build` first; when the `.so` files are
//! missing `load` returns `None` and the scenarios skip.

use std::path::PathBuf;

use anchor_lang::{
    solana_program::{program_option::COption, program_pack::Pack, system_instruction},
    system_program, InstructionData, ToAccountMetas,
};
use anchor_spl::token::spl_token;
use fetch_sdk::{
    client::DEPOSIT_COMPUTE_UNITS,
    instructions::*,
    math::preview_deposit,
    state::*,
    types::DepositPreview,
};
use litesvm::{
    types::{FailedTransactionMetadata, TransactionMetadata},
    LiteSVM,
};
use solana_sdk::{
    account::Account,
    clock::Clock,
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    sysvar,
    transaction::{Transaction, TransactionError},
};

pub const UNIT: u64 = 1_000_000_000;
pub const DAY: i64 = 86_400;
pub const REWARDS_DURATION: i64 = 30 * DAY;
pub const SEED_LIQUIDITY: u64 = 500 * UNIT;
pub const SALE_INVENTORY: u64 = 1_000 * UNIT;
pub const REWARD_FUNDING: u64 = UNIT;

pub type TxResult = Result<TransactionMetadata, FailedTransactionMetadata>;

const PROGRAMS: [(Pubkey, &str); 4] = [
    (AMM_PROGRAM_ID, "fetch_amm"),
    (SALE_PROGRAM_ID, "fetch_sale"),
    (STAKING_PROGRAM_ID, "fetch_staking"),
    (ROUTER_PROGRAM_ID, "fetch_router"),
];

pub struct Fetch {
    pub svm:         LiteSVM,
    pub admin:       Keypair,
    pub ids:         ProgramIds,
    pub token_mint:  Pubkey,
    pub pool:        Pubkey,
    pub lp_mint:     Pubkey,
    pub sale:        Pubkey,
    pub beneficiary: Pubkey,
    pub claimable:   Pubkey,
    pub locked:      Pubkey,
    pub router:      Pubkey,
}

fn program_dir() -> PathBuf {
    std::env::var_os("SBF_OUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../target/deploy"))
}

fn execute(svm: &mut LiteSVM, ixs: &[Instruction], signers: &[&Keypair]) -> TxResult {
    let payer = signers[0].pubkey();
    let tx = Transaction::new_signed_with_payer(ixs, Some(&payer), signers, svm.latest_blockhash());
    let result = svm.send_transaction(tx);
    // Identical follow-up transactions would otherwise be rejected as duplicates.
    svm.expire_blockhash();
    result
}

/// Unwrap a transaction result, printing the program logs when it failed.
pub fn confirm(result: TxResult) -> TransactionMetadata {
    result.unwrap_or_else(|failed| {
        panic!("transaction failed: {:?}\n{}", failed.err, failed.meta.logs.join("\n"))
    })
}

/// The custom program error a failed transaction ended with.
pub fn custom_error(result: TxResult) -> u32 {
    match result {
        Ok(meta) => panic!("transaction succeeded\n{}", meta.logs.join("\n")),
        Err(failed) => match failed.err {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => code,
            other => panic!("expected a program error, got {other:?}\n{}", failed.meta.logs.join("\n")),
        },
    }
}

impl Fetch {
    pub fn load() -> Option<Self> {
        let dir = program_dir();
        let mut svm = LiteSVM::new();
        for (id, name) in PROGRAMS {
            let path = dir.join(format!("{name}.so"));
            if !path.exists() {
                eprintln!("skipping: {} not found, run `anchor build`", path.display());
                return None;
            }
            svm.add_program_from_file(id, &path).expect("load program");
        }

        let admin = Keypair::new();
        svm.airdrop(&admin.pubkey(), 10_000 * UNIT).expect("airdrop");

        let mut fetch = Fetch {
            svm,
            admin,
            ids: ProgramIds::default(),
            token_mint: Pubkey::default(),
            pool: Pubkey::default(),
            lp_mint: Pubkey::default(),
            sale: Pubkey::default(),
            beneficiary: Pubkey::default(),
            claimable: Pubkey::default(),
            locked: Pubkey::default(),
            router: Pubkey::default(),
        };
        fetch.install_native_mint();
        fetch.token_mint = fetch.create_mint();
        fetch.init_pool();
        fetch.init_sale();
        fetch.claimable = fetch.init_vault(true);
        fetch.locked = fetch.init_vault(false);
        fetch.init_router();
        Some(fetch)
    }

    // ── world setup ─────────────────────────────────────────────────────────

    fn admin_send(&mut self, ixs: &[Instruction], extra: &[&Keypair]) -> TxResult {
        let mut signers = vec![&self.admin];
        signers.extend_from_slice(extra);
        execute(&mut self.svm, ixs, &signers)
    }

    fn install_native_mint(&mut self) {
        let mut data = vec![0u8; spl_token::state::Mint::LEN];
        spl_token::state::Mint {
            mint_authority: COption::None,
            supply: 0,
            decimals: 9,
            is_initialized: true,
            freeze_authority: COption::None,
        }
        .pack_into_slice(&mut data);
        let account = Account {
            lamports: self.svm.minimum_balance_for_rent_exemption(data.len()),
            data,
            owner: spl_token::ID,
            executable: false,
            rent_epoch: 0,
        };
        self.svm.set_account(WSOL_MINT, account).expect("native mint");
    }

    fn create_mint(&mut self) -> Pubkey {
        let mint = Keypair::new();
        let admin = self.admin.pubkey();
        let space = spl_token::state::Mint::LEN;
        let lamports = self.svm.minimum_balance_for_rent_exemption(space);
        let ixs = [
            system_instruction::create_account(&admin, &mint.pubkey(), lamports, space as u64, &spl_token::ID),
            spl_token::instruction::initialize_mint2(&spl_token::ID, &mint.pubkey(), &admin, None, 9)
                .expect("initialize_mint2"),
        ];
        confirm(self.admin_send(&ixs, &[&mint]));
        mint.pubkey()
    }

    fn init_pool(&mut self) {
        let amm = self.ids.amm;
        let admin = self.admin.pubkey();
        let (pool, _) = derive_pool(&WSOL_MINT, &self.token_mint, &amm);
        let (pool_authority, _) = derive_pool_authority(&pool, &amm);
        let (lp_mint, _) = derive_lp_mint(&pool, &amm);
        let vault_a = Keypair::new();
        let vault_b = Keypair::new();

        let init = Instruction {
            program_id: amm,
            accounts: fetch_amm::accounts::InitializePool {
                creator: admin,
                token_a_mint: WSOL_MINT,
                token_b_mint: self.token_mint,
                pool,
                pool_authority,
                token_a_vault: vault_a.pubkey(),
                token_b_vault: vault_b.pubkey(),
                lp_mint,
                token_program: spl_token::ID,
                system_program: system_program::ID,
                rent: sysvar::rent::ID,
            }
            .to_account_metas(None),
            data: fetch_amm::instruction::InitializePool { fee_rate_bps: 30 }.data(),
        };
        confirm(self.admin_send(&[init], &[&vault_a, &vault_b]));
        self.pool = pool;
        self.lp_mint = lp_mint;

        let admin_wsol = self.wrap_for_admin(SEED_LIQUIDITY);
        let admin_token = self.fund_tokens(&admin, SEED_LIQUIDITY);
        let admin_lp = self.ata(&admin, &lp_mint);
        let seed = Instruction {
            program_id: amm,
            accounts: fetch_amm::accounts::AddLiquidity {
                provider: admin,
                pool,
                pool_authority,
                token_a_vault: vault_a.pubkey(),
                token_b_vault: vault_b.pubkey(),
                lp_mint,
                provider_token_a: admin_wsol,
                provider_token_b: admin_token,
                lp_recipient: admin_lp,
                token_program: spl_token::ID,
            }
            .to_account_metas(None),
            data: fetch_amm::instruction::AddLiquidity {
                amount_a_desired: SEED_LIQUIDITY,
                amount_b_desired: SEED_LIQUIDITY,
                amount_a_min: 0,
                amount_b_min: 0,
                deadline: i64::MAX,
            }
            .data(),
        };
        confirm(self.admin_send(&[seed], &[]));
    }

    fn init_sale(&mut self) {
        let program = self.ids.sale;
        let (sale, _) = derive_sale(&self.token_mint, &program);
        let (sale_authority, _) = derive_sale_authority(&sale, &program);
        let (inventory, _) = Pubkey::find_program_address(&[INVENTORY_SEED, sale.as_ref()], &program);
        let beneficiary = Pubkey::new_unique();
        self.svm.airdrop(&beneficiary, UNIT).expect("airdrop");

        let ix = Instruction {
            program_id: program,
            accounts: fetch_sale::accounts::InitializeSale {
                owner: self.admin.pubkey(),
                token_mint: self.token_mint,
                pool: self.pool,
                sale,
                sale_authority,
                inventory,
                token_program: spl_token::ID,
                system_program: system_program::ID,
                rent: sysvar::rent::ID,
            }
            .to_account_metas(None),
            data: fetch_sale::instruction::InitializeSale { beneficiary }.data(),
        };
        confirm(self.admin_send(&[ix], &[]));
        self.mint_tokens(&inventory, SALE_INVENTORY);
        self.sale = sale;
        self.beneficiary = beneficiary;
    }

    fn init_vault(&mut self, claimable: bool) -> Pubkey {
        let program = self.ids.staking;
        let vault = Keypair::new();
        let (vault_authority, _) = derive_vault_authority(&vault.pubkey(), &program);
        let (staking_vault, _) =
            Pubkey::find_program_address(&[STAKING_VAULT_SEED, vault.pubkey().as_ref()], &program);
        let (rewards_vault, _) =
            Pubkey::find_program_address(&[REWARDS_VAULT_SEED, vault.pubkey().as_ref()], &program);

        let ix = Instruction {
            program_id: program,
            accounts: fetch_staking::accounts::InitializeVault {
                owner: self.admin.pubkey(),
                vault: vault.pubkey(),
                staking_mint: self.lp_mint,
                rewards_mint: self.token_mint,
                vault_authority,
                staking_vault,
                rewards_vault,
                token_program: spl_token::ID,
                system_program: system_program::ID,
                rent: sysvar::rent::ID,
            }
            .to_account_metas(None),
            data: fetch_staking::instruction::InitializeVault {
                claimable,
                rewards_duration: REWARDS_DURATION,
            }
            .data(),
        };
        confirm(self.admin_send(&[ix], &[&vault]));

        self.mint_tokens(&rewards_vault, REWARD_FUNDING);
        let state = self.vault_state(&vault.pubkey());
        let notify = notify_reward_amount_ix(&program, &self.admin.pubkey(), &vault.pubkey(), &state, REWARD_FUNDING);
        confirm(self.admin_send(&[notify], &[]));
        vault.pubkey()
    }

    fn init_router(&mut self) {
        let program = self.ids.router;
        let (config, _) = derive_router(&self.token_mint, &program);
        let (router_authority, _) = derive_router_authority(&config, &program);
        let (router_token, _) = Pubkey::find_program_address(&[ROUTER_TOKEN_SEED, config.as_ref()], &program);
        let (router_lp, _) = Pubkey::find_program_address(&[ROUTER_LP_SEED, config.as_ref()], &program);

        let ix = Instruction {
            program_id: program,
            accounts: fetch_router::accounts::InitializeRouter {
                owner: self.admin.pubkey(),
                token_mint: self.token_mint,
                pool: self.pool,
                lp_mint: self.lp_mint,
                sale: self.sale,
                stake_claimable: self.claimable,
                stake_non_claimable: self.locked,
                config,
                router_authority,
                router_token,
                router_lp,
                token_program: spl_token::ID,
                system_program: system_program::ID,
                rent: sysvar::rent::ID,
            }
            .to_account_metas(None),
            data: fetch_router::instruction::InitializeRouter.data(),
        };
        let burn_sink = create_ata_idempotent_ix(&self.admin.pubkey(), &INCINERATOR, &self.lp_mint);
        confirm(self.admin_send(&[ix, burn_sink], &[]));
        self.router = config;
    }

    // ── token plumbing ──────────────────────────────────────────────────────

    /// Create (idempotently) and return `wallet`'s ATA for `mint`.
    pub fn ata(&mut self, wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
        let ix = create_ata_idempotent_ix(&self.admin.pubkey(), wallet, mint);
        confirm(self.admin_send(&[ix], &[]));
        derive_ata(wallet, mint)
    }

    pub fn mint_tokens(&mut self, destination: &Pubkey, amount: u64) {
        let ix = spl_token::instruction::mint_to(
            &spl_token::ID,
            &self.token_mint,
            destination,
            &self.admin.pubkey(),
            &[],
            amount,
        )
        .expect("mint_to");
        confirm(self.admin_send(&[ix], &[]));
    }

    /// Mint project tokens into `wallet`'s ATA.
    pub fn fund_tokens(&mut self, wallet: &Pubkey, amount: u64) -> Pubkey {
        let mint = self.token_mint;
        let ata = self.ata(wallet, &mint);
        if amount > 0 {
            self.mint_tokens(&ata, amount);
        }
        ata
    }

    fn wrap_for_admin(&mut self, lamports: u64) -> Pubkey {
        let admin = self.admin.pubkey();
        let ata = self.ata(&admin, &WSOL_MINT);
        let ixs = [
            system_instruction::transfer(&admin, &ata, lamports),
            spl_token::instruction::sync_native(&spl_token::ID, &ata).expect("sync_native"),
        ];
        confirm(self.admin_send(&ixs, &[]));
        ata
    }

    /// A funded depositor with project-token and LP ATAs already in place.
    pub fn user(&mut self, lamports: u64, tokens: u64) -> Keypair {
        let user = Keypair::new();
        self.svm.airdrop(&user.pubkey(), lamports).expect("airdrop");
        self.fund_tokens(&user.pubkey(), tokens);
        let lp_mint = self.lp_mint;
        self.ata(&user.pubkey(), &lp_mint);
        user
    }

    // ── transactions ────────────────────────────────────────────────────────

    pub fn send(&mut self, ixs: &[Instruction], signers: &[&Keypair]) -> TxResult {
        execute(&mut self.svm, ixs, signers)
    }

    /// Run `deposit`, or `deposit_with_token` when `token_amount` is set.
    pub fn deposit(&mut self, user: &Keypair, claimable: bool, lamports: u64, token_amount: Option<u64>) -> TxResult {
        let router_state = self.router_state();
        let pool_state = self.pool_state();
        let sale_state = self.sale_state();
        let vault = router_state.vault_for(claimable);
        let vault_state = self.vault_state(&vault);
        let ix = deposit_ix(
            &DepositAccounts {
                ids: &self.ids,
                user: user.pubkey(),
                router: self.router,
                router_state: &router_state,
                pool_state: &pool_state,
                sale_state: &sale_state,
                vault,
                vault_state: &vault_state,
            },
            claimable,
            lamports,
            token_amount,
        );
        self.send(&[set_compute_unit_limit_ix(DEPOSIT_COMPUTE_UNITS), ix], &[user])
    }

    pub fn update_split(&mut self, sale_percent: u8, pool_percent: u8) {
        let ix = update_split_ix(&self.ids.router, &self.admin.pubkey(), &self.router, sale_percent, pool_percent);
        confirm(self.admin_send(&[ix], &[]));
    }

    pub fn update_burn_percent(&mut self, burn_percent: u8) {
        let ix = update_burn_percent_ix(&self.ids.router, &self.admin.pubkey(), &self.router, burn_percent);
        confirm(self.admin_send(&[ix], &[]));
    }

    pub fn now(&self) -> i64 {
        self.svm.get_sysvar::<Clock>().unix_timestamp
    }

    pub fn warp_to(&mut self, unix_timestamp: i64) {
        let mut clock = self.svm.get_sysvar::<Clock>();
        clock.unix_timestamp = unix_timestamp;
        clock.slot += 1;
        self.svm.set_sysvar(&clock);
    }

    // ── reads ───────────────────────────────────────────────────────────────

    fn data(&self, address: &Pubkey) -> Option<Vec<u8>> {
        self.svm.get_account(address).map(|account| account.data)
    }

    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.svm.get_account(address).map_or(0, |account| account.lamports)
    }

    /// SPL balance, 0 for an account that does not exist.
    pub fn token_balance(&self, address: &Pubkey) -> u64 {
        self.data(address)
            .map_or(0, |data| parse_token_amount(&data).expect("token account"))
    }

    pub fn router_state(&self) -> RouterState {
        parse_router(&self.data(&self.router).expect("router")).expect("router layout")
    }

    pub fn pool_state(&self) -> PoolState {
        parse_pool(&self.data(&self.pool).expect("pool")).expect("pool layout")
    }

    pub fn sale_state(&self) -> SaleState {
        parse_sale(&self.data(&self.sale).expect("sale")).expect("sale layout")
    }

    pub fn vault_state(&self, vault: &Pubkey) -> VaultState {
        parse_vault(&self.data(vault).expect("vault")).expect("vault layout")
    }

    /// `(native, token)` pool reserves.
    pub fn reserves(&self) -> (u64, u64) {
        let pool = self.pool_state();
        (self.token_balance(&pool.token_a_vault), self.token_balance(&pool.token_b_vault))
    }

    pub fn lp_supply(&self) -> u64 {
        parse_mint_supply(&self.data(&self.lp_mint).expect("lp mint")).expect("mint layout")
    }

    pub fn inventory(&self) -> u64 {
        self.token_balance(&self.sale_state().inventory)
    }

    /// LP sent to the incinerator so far.
    pub fn burned(&self) -> u64 {
        self.token_balance(&derive_ata(&INCINERATOR, &self.lp_mint))
    }

    pub fn staked(&self, vault: &Pubkey, owner: &Pubkey) -> u64 {
        let (stake_account, _) = derive_stake_account(vault, owner, &self.ids.staking);
        self.data(&stake_account)
            .map_or(0, |data| parse_stake_account(&data).expect("stake layout").balance)
    }

    pub fn user_tokens(&self, owner: &Pubkey) -> u64 {
        self.token_balance(&derive_ata(owner, &self.token_mint))
    }

    /// What a deposit of this size would do against the current state.
    pub fn preview(&self, lamports: u64, token_amount: u64) -> DepositPreview {
        let router = self.router_state();
        let (native, token) = self.reserves();
        preview_deposit(
            lamports,
            token_amount,
            router.sale_percent,
            router.burn_percent,
            native,
            token,
            self.lp_supply(),
            self.pool_state().fee_rate_bps,
        )
        .expect("preview")
    }

    /// Every intermediate account the router touches is empty again.
    pub fn assert_router_drained(&self, user: &Pubkey) {
        let router = self.router_state();
        assert_eq!(self.token_balance(&router.router_token), 0, "router kept project tokens");
        assert_eq!(self.token_balance(&router.router_lp), 0, "router kept LP");
        let (escrow, _) = derive_wsol_escrow(&self.router, user, &self.ids.router);
        assert_eq!(self.lamports(&escrow), 0, "wSOL escrow left open");
        let (authority, _) = derive_router_authority(&self.router, &self.ids.router);
        assert_eq!(self.lamports(&authority), 0, "router authority holds lamports");
    }
}
