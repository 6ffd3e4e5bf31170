use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use fetch_sdk::{DepositParams, DepositPreview, FetchClient};
use serde_json::json;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};
use std::str::FromStr;

/// Headroom for the escrow rent, ATA creation and fees on top of a deposit.
const DEPOSIT_OVERHEAD_LAMPORTS: u64 = 10_000_000;

// ─── Shared helpers ───────────────────────────────────────────────────────────

fn expand_home(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => format!("{}/{}", std::env::var("HOME").unwrap_or_default(), rest),
        None => path.to_string(),
    }
}

fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded = expand_home(path);
    read_keypair_file(&expanded)
        .map_err(|e| anyhow!(
            "Cannot load keypair from '{}': {}\n  \
             Set FETCH_KEYPAIR or pass --keypair to specify a different path.",
            expanded, e
        ))
}

fn parse_router(router: Option<&str>) -> Result<Pubkey> {
    let raw = router.ok_or_else(|| anyhow!(
        "No router address. Set FETCH_ROUTER or pass --router <PUBKEY>."
    ))?;
    Pubkey::from_str(raw).with_context(|| format!("--router '{raw}' is not a valid pubkey"))
}

fn sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

fn print_banner() {
    let ver = env!("CARGO_PKG_VERSION");
    println!();
    println!("  Fetch  v{ver}  ·  one-call SOL deposits into staked liquidity");
    println!("  {}", "─".repeat(62));
    println!("  Router    {}", fetch_sdk::instructions::ROUTER_PROGRAM_ID);
    println!("  Staking   {}", fetch_sdk::instructions::STAKING_PROGRAM_ID);
    println!("  Sale      {}", fetch_sdk::instructions::SALE_PROGRAM_ID);
    println!("  AMM       {}", fetch_sdk::instructions::AMM_PROGRAM_ID);
    println!();
}

// ─── CLI definition ───────────────────────────────────────────────────────────

/// Fetch: deposit SOL, get staked liquidity.
///
/// Every command supports --json for machine-readable output.
/// Global options can also be set via environment variables:
///   FETCH_RPC_URL  Solana JSON-RPC endpoint
///   FETCH_KEYPAIR  path to an Ed25519 keypair JSON
///   FETCH_ROUTER   router config address
#[derive(Parser)]
#[command(
    name    = "fetch",
    version = env!("CARGO_PKG_VERSION"),
    about   = "Deposit SOL through the Fetch router: converted, paired, burned and staked in one transaction.",
    after_help = "\
ENVIRONMENT:
  FETCH_RPC_URL  Solana JSON-RPC endpoint  [default: https://api.mainnet-beta.solana.com]
  FETCH_KEYPAIR  Path to Ed25519 keypair JSON  [default: ~/.config/solana/id.json]
  FETCH_ROUTER   Router config address

QUICK START:
  fetch router-info
  fetch preview  --amount 100000000
  fetch deposit  --amount 100000000
  fetch position
  fetch claim"
)]
struct Cli {
    /// Solana JSON-RPC endpoint
    #[arg(
        long,
        global        = true,
        value_name    = "URL",
        default_value = "https://api.mainnet-beta.solana.com",
        env           = "FETCH_RPC_URL"
    )]
    rpc_url: String,

    /// Path to the signer's Ed25519 keypair JSON file
    #[arg(
        long,
        global        = true,
        value_name    = "PATH",
        default_value = "~/.config/solana/id.json",
        env           = "FETCH_KEYPAIR"
    )]
    keypair: String,

    /// Router config address
    #[arg(long, global = true, value_name = "PUBKEY", env = "FETCH_ROUTER")]
    router: Option<String>,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which of the router's two staking vaults to use.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum VaultChoice {
    /// Rewards can be claimed at any time
    Claimable,
    /// Claim and exit open once the vault matures
    Locked,
}

impl VaultChoice {
    fn is_claimable(self) -> bool {
        matches!(self, VaultChoice::Claimable)
    }

    fn label(self) -> &'static str {
        match self {
            VaultChoice::Claimable => "claimable",
            VaultChoice::Locked => "locked",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Deposit SOL: half is converted to the project token, the rest paired into the pool
    ///
    /// The converted half is split between the token sale and a pool swap.
    /// The LP shares minted are partly burned and the rest staked for you.
    #[command(after_help = "\
EXAMPLES:
  # Deposit 0.1 SOL into the claimable vault
  fetch deposit --amount 100000000

  # Deposit into the locked vault
  fetch deposit --amount 100000000 --vault locked")]
    Deposit {
        /// SOL to deposit, in lamports
        #[arg(long, value_name = "LAMPORTS")]
        amount: u64,

        #[arg(long, value_enum, default_value_t = VaultChoice::Claimable)]
        vault: VaultChoice,
    },

    /// Deposit SOL together with project tokens you already hold
    DepositToken {
        /// SOL to deposit, in lamports
        #[arg(long, value_name = "LAMPORTS")]
        amount: u64,

        /// Project tokens to add, in atomic units
        #[arg(long, value_name = "AMOUNT")]
        tokens: u64,

        #[arg(long, value_enum, default_value_t = VaultChoice::Claimable)]
        vault: VaultChoice,
    },

    /// Walk through a deposit against live reserves without sending anything
    Preview {
        /// SOL to deposit, in lamports
        #[arg(long, value_name = "LAMPORTS")]
        amount: u64,

        /// Optional project tokens, in atomic units
        #[arg(long, value_name = "AMOUNT")]
        tokens: Option<u64>,
    },

    /// Show your stake and earned rewards in a vault
    Position {
        #[arg(long, value_enum, default_value_t = VaultChoice::Claimable)]
        vault: VaultChoice,

        /// Look up another wallet instead of the keypair's
        #[arg(long, value_name = "PUBKEY")]
        owner: Option<String>,
    },

    /// Unstake LP shares
    Withdraw {
        /// LP shares to unstake, in atomic units
        #[arg(long, value_name = "AMOUNT")]
        amount: u64,

        #[arg(long, value_enum, default_value_t = VaultChoice::Claimable)]
        vault: VaultChoice,
    },

    /// Claim earned rewards
    Claim {
        #[arg(long, value_enum, default_value_t = VaultChoice::Claimable)]
        vault: VaultChoice,
    },

    /// Unstake everything and claim in one transaction
    Exit {
        #[arg(long, value_enum, default_value_t = VaultChoice::Claimable)]
        vault: VaultChoice,
    },

    /// Burn unstaked LP shares for SOL and project tokens
    Redeem {
        /// LP shares to burn, in atomic units
        #[arg(long, value_name = "AMOUNT")]
        amount: u64,

        /// Accept up to this much less than the current proportional amounts
        #[arg(long, value_name = "BPS", default_value_t = 50)]
        slippage_bps: u16,
    },

    /// Quote the token sale for an amount of SOL
    SalePrice {
        /// SOL, in lamports
        #[arg(long, value_name = "LAMPORTS")]
        amount: u64,
    },

    /// Buy project tokens from the sale directly
    Buy {
        /// SOL to spend, in lamports
        #[arg(long, value_name = "LAMPORTS")]
        amount: u64,
    },

    /// Router split, pool reserves and sale inventory
    RouterInfo,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().len() == 1 {
        print_banner();
        Cli::command().print_long_help().ok();
        println!();
        return Ok(());
    }

    let cli = Cli::parse();
    let client = FetchClient::new(cli.rpc_url.clone(), parse_router(cli.router.as_deref())?);

    match &cli.command {
        Commands::Deposit { amount, vault } => {
            cmd_deposit(&cli, &client, *amount, None, *vault).await?;
        }
        Commands::DepositToken { amount, tokens, vault } => {
            cmd_deposit(&cli, &client, *amount, Some(*tokens), *vault).await?;
        }
        Commands::Preview { amount, tokens } => {
            cmd_preview(&client, *amount, *tokens, cli.json).await?;
        }
        Commands::Position { vault, owner } => {
            cmd_position(&cli, &client, *vault, owner.as_deref()).await?;
        }
        Commands::Withdraw { amount, vault } => {
            cmd_withdraw(&cli, &client, *amount, *vault).await?;
        }
        Commands::Claim { vault } => {
            cmd_claim(&cli, &client, *vault).await?;
        }
        Commands::Exit { vault } => {
            cmd_exit(&cli, &client, *vault).await?;
        }
        Commands::Redeem { amount, slippage_bps } => {
            cmd_redeem(&cli, &client, *amount, *slippage_bps).await?;
        }
        Commands::SalePrice { amount } => {
            cmd_sale_price(&client, *amount, cli.json).await?;
        }
        Commands::Buy { amount } => {
            cmd_buy(&cli, &client, *amount).await?;
        }
        Commands::RouterInfo => {
            cmd_router_info(&client, cli.json).await?;
        }
    }

    Ok(())
}

// ─── deposit / deposit-token ──────────────────────────────────────────────────

fn preview_json(p: &DepositPreview) -> serde_json::Value {
    json!({
        "lamports":           p.lamports,
        "token_amount":       p.token_amount,
        "sale_lamports":      p.sale_lamports,
        "sale_tokens":        p.sale_tokens,
        "swap_lamports":      p.swap_lamports,
        "swap_tokens":        p.swap_tokens,
        "liquidity_lamports": p.liquidity_lamports,
        "native_added":       p.native_added,
        "tokens_added":       p.tokens_added,
        "shares":             p.shares,
        "burned":             p.burned,
        "staked":             p.staked,
        "refund_lamports":    p.refund_lamports,
        "refund_tokens":      p.refund_tokens,
    })
}

fn print_preview(p: &DepositPreview) {
    println!("  Deposit          {:>20}  ({:.4} SOL)", p.lamports, sol(p.lamports));
    if p.token_amount > 0 {
        println!("  Tokens in        {:>20}", p.token_amount);
    }
    println!();
    println!("  ─── Conversion ───────────────────────────────────");
    println!("  Sale leg         {:>20}  → {} tokens", p.sale_lamports, p.sale_tokens);
    println!("  Swap leg         {:>20}  → {} tokens", p.swap_lamports, p.swap_tokens);
    println!("  Liquidity leg    {:>20}", p.liquidity_lamports);
    println!();
    println!("  ─── Liquidity ────────────────────────────────────");
    println!("  SOL paired       {:>20}", p.native_added);
    println!("  Tokens paired    {:>20}", p.tokens_added);
    println!("  LP shares        {:>20}", p.shares);
    println!("  Burned           {:>20}", p.burned);
    println!("  Staked           {:>20}", p.staked);
    if p.refund_lamports > 0 || p.refund_tokens > 0 {
        println!("  Returned         {:>20} lamports  +  {} tokens", p.refund_lamports, p.refund_tokens);
    }
}

async fn cmd_deposit(
    cli:          &Cli,
    client:       &FetchClient,
    lamports:     u64,
    token_amount: Option<u64>,
    vault:        VaultChoice,
) -> Result<()> {
    if lamports == 0 {
        return Err(anyhow!("--amount must be > 0 (lamports)"));
    }
    if token_amount == Some(0) {
        return Err(anyhow!("--tokens must be > 0; use `deposit` for a SOL-only deposit"));
    }
    let payer = load_keypair(&cli.keypair)?;

    let balance = RpcClient::new_with_commitment(cli.rpc_url.clone(), CommitmentConfig::confirmed())
        .get_balance(&payer.pubkey())
        .await
        .context("Failed to fetch SOL balance. Check your RPC endpoint")?;
    let needed = lamports.saturating_add(DEPOSIT_OVERHEAD_LAMPORTS);
    if balance < needed {
        return Err(anyhow!(
            "Insufficient SOL: have {:.4}, need about {:.4} (deposit plus rent and fees).",
            sol(balance), sol(needed)
        ));
    }

    let result = client
        .deposit(&payer, DepositParams {
            lamports,
            token_amount,
            use_claimable_vault: vault.is_claimable(),
        })
        .await
        .context("Deposit failed")?;

    if cli.json {
        println!("{}", json!({
            "status":        "ok",
            "command":       if token_amount.is_some() { "deposit-token" } else { "deposit" },
            "signature":     result.signature,
            "depositor":     payer.pubkey().to_string(),
            "vault":         result.vault.to_string(),
            "vault_kind":    vault.label(),
            "staked_before": result.staked_before,
            "staked_after":  result.staked_after,
            "preview":       preview_json(&result.preview),
        }));
    } else {
        println!("─── Deposit ──────────────────────────────────────────────────────");
        println!("  Depositor        {}", payer.pubkey());
        println!("  Vault            {}  ({})", result.vault, vault.label());
        println!();
        print_preview(&result.preview);
        println!();
        println!("  Stake balance    {:>20}  →  {}", result.staked_before, result.staked_after);
        println!("  Transaction      {}", result.signature);
    }
    Ok(())
}

// ─── preview ──────────────────────────────────────────────────────────────────

async fn cmd_preview(client: &FetchClient, lamports: u64, tokens: Option<u64>, json_output: bool) -> Result<()> {
    if lamports == 0 {
        return Err(anyhow!("--amount must be > 0 (lamports)"));
    }
    let preview = client
        .preview(&DepositParams {
            lamports,
            token_amount: tokens,
            use_claimable_vault: true,
        })
        .await
        .context("Could not preview deposit")?;

    if json_output {
        println!("{}", json!({
            "status":  "ok",
            "command": "preview",
            "router":  client.router().to_string(),
            "preview": preview_json(&preview),
        }));
    } else {
        println!("─── Deposit Preview ──────────────────────────────────────────────");
        print_preview(&preview);
        println!();
        println!("  No transaction sent. To execute:");
        match tokens {
            Some(t) => println!("    fetch deposit-token --amount {lamports} --tokens {t}"),
            None => println!("    fetch deposit --amount {lamports}"),
        }
    }
    Ok(())
}

// ─── position ─────────────────────────────────────────────────────────────────

async fn cmd_position(cli: &Cli, client: &FetchClient, vault: VaultChoice, owner: Option<&str>) -> Result<()> {
    let owner = match owner {
        Some(raw) => Pubkey::from_str(raw).with_context(|| format!("--owner '{raw}' is not a valid pubkey"))?,
        None => load_keypair(&cli.keypair)?.pubkey(),
    };
    let pos = client
        .position(&owner, vault.is_claimable())
        .await
        .context("Could not load position")?;

    if cli.json {
        println!("{}", json!({
            "status":        "ok",
            "command":       "position",
            "owner":         owner.to_string(),
            "vault":         pos.vault.to_string(),
            "vault_kind":    vault.label(),
            "stake_account": pos.stake_account.to_string(),
            "balance":       pos.balance,
            "total_staked":  pos.total_staked,
            "earned":        pos.earned,
            "reward_rate":   pos.reward_rate,
            "period_finish": pos.period_finish,
            "matures_at":    pos.matures_at,
            "unlocked":      pos.unlocked,
        }));
    } else {
        let share = if pos.total_staked == 0 {
            0.0
        } else {
            pos.balance as f64 * 100.0 / pos.total_staked as f64
        };
        println!("─── Position ─────────────────────────────────────────────────────");
        println!("  Owner            {owner}");
        println!("  Vault            {}  ({})", pos.vault, vault.label());
        println!("  Staked           {:>20}  ({share:.4}% of vault)", pos.balance);
        println!("  Earned           {:>20}", pos.earned);
        println!("  Reward rate      {:>20}  per second", pos.reward_rate);
        println!("  Period ends      {:>20}", pos.period_finish);
        if !pos.unlocked {
            println!("  Locked until     {:>20}", pos.matures_at);
        }
        if pos.balance == 0 && pos.earned == 0 {
            println!();
            println!("  Nothing staked. Run `fetch deposit --amount <LAMPORTS>` to start.");
        }
    }
    Ok(())
}

// ─── withdraw / claim / exit ──────────────────────────────────────────────────

fn print_stake_tx(cli: &Cli, command: &str, vault: VaultChoice, result: &fetch_sdk::StakeTxResult) {
    if cli.json {
        println!("{}", json!({
            "status":     "ok",
            "command":    command,
            "signature":  result.signature,
            "vault":      result.vault.to_string(),
            "vault_kind": vault.label(),
            "lp_out":     result.lp_out,
            "reward_out": result.reward_out,
        }));
    } else {
        println!("─── {command} ─────────────────────────────────────────────────────");
        println!("  Vault            {}  ({})", result.vault, vault.label());
        println!("  LP returned      {:>20}", result.lp_out);
        println!("  Rewards paid     {:>20}", result.reward_out);
        println!("  Transaction      {}", result.signature);
    }
}

async fn cmd_withdraw(cli: &Cli, client: &FetchClient, amount: u64, vault: VaultChoice) -> Result<()> {
    if amount == 0 {
        return Err(anyhow!("--amount must be > 0"));
    }
    let payer = load_keypair(&cli.keypair)?;
    let result = client
        .withdraw(&payer, vault.is_claimable(), amount)
        .await
        .context("Withdraw failed")?;
    print_stake_tx(cli, "withdraw", vault, &result);
    Ok(())
}

async fn cmd_claim(cli: &Cli, client: &FetchClient, vault: VaultChoice) -> Result<()> {
    let payer = load_keypair(&cli.keypair)?;
    let result = client
        .get_reward(&payer, vault.is_claimable())
        .await
        .context("Claim failed")?;
    print_stake_tx(cli, "claim", vault, &result);
    Ok(())
}

async fn cmd_exit(cli: &Cli, client: &FetchClient, vault: VaultChoice) -> Result<()> {
    let payer = load_keypair(&cli.keypair)?;
    let result = client
        .exit(&payer, vault.is_claimable())
        .await
        .context("Exit failed")?;
    print_stake_tx(cli, "exit", vault, &result);
    Ok(())
}

// ─── redeem ───────────────────────────────────────────────────────────────────

async fn cmd_redeem(cli: &Cli, client: &FetchClient, amount: u64, slippage_bps: u16) -> Result<()> {
    if amount == 0 {
        return Err(anyhow!("--amount must be > 0"));
    }
    let payer = load_keypair(&cli.keypair)?;
    let result = client
        .redeem(&payer, amount, slippage_bps)
        .await
        .context("Redeem failed")?;
    if cli.json {
        println!("{}", json!({
            "status":    "ok",
            "command":   "redeem",
            "signature": result.signature,
            "lp_burned": result.lp_burned,
            "lamports":  result.lamports,
            "tokens":    result.tokens,
        }));
    } else {
        println!("─── Redeem ───────────────────────────────────────────────────────");
        println!("  LP burned        {:>20}", result.lp_burned);
        println!("  SOL              {:>20}  ({:.4} SOL)", result.lamports, sol(result.lamports));
        println!("  Tokens           {:>20}", result.tokens);
        println!("  Transaction      {}", result.signature);
    }
    Ok(())
}

// ─── sale-price / buy ─────────────────────────────────────────────────────────

async fn cmd_sale_price(client: &FetchClient, lamports: u64, json_output: bool) -> Result<()> {
    if lamports == 0 {
        return Err(anyhow!("--amount must be > 0 (lamports)"));
    }
    let quote = client.sale_price(lamports).await.context("Could not quote the sale")?;
    if json_output {
        println!("{}", json!({
            "status":    "ok",
            "command":   "sale-price",
            "sale":      quote.sale.to_string(),
            "lamports":  quote.lamports,
            "tokens":    quote.tokens,
            "inventory": quote.inventory,
            "paused":    quote.paused,
        }));
    } else {
        println!("─── Sale Quote ───────────────────────────────────────────────────");
        println!("  Sale             {}", quote.sale);
        println!("  Pay              {:>20}  ({:.4} SOL)", quote.lamports, sol(quote.lamports));
        println!("  Receive          {:>20}", quote.tokens);
        println!("  Inventory        {:>20}", quote.inventory);
        if quote.paused {
            println!("  Sale is paused.");
        } else if quote.tokens > quote.inventory {
            println!("  Inventory is too low for this amount.");
        }
    }
    Ok(())
}

async fn cmd_buy(cli: &Cli, client: &FetchClient, lamports: u64) -> Result<()> {
    if lamports == 0 {
        return Err(anyhow!("--amount must be > 0 (lamports)"));
    }
    let payer = load_keypair(&cli.keypair)?;
    let result = client.buy(&payer, lamports).await.context("Buy failed")?;
    if cli.json {
        println!("{}", json!({
            "status":    "ok",
            "command":   "buy",
            "signature": result.signature,
            "lamports":  result.lamports,
            "tokens":    result.tokens,
        }));
    } else {
        println!("─── Buy ──────────────────────────────────────────────────────────");
        println!("  Paid             {:>20}  ({:.4} SOL)", result.lamports, sol(result.lamports));
        println!("  Received         {:>20}", result.tokens);
        println!("  Transaction      {}", result.signature);
    }
    Ok(())
}

// ─── router-info ──────────────────────────────────────────────────────────────

async fn cmd_router_info(client: &FetchClient, json_output: bool) -> Result<()> {
    let info = client.router_info().await.context("Could not load router")?;
    if json_output {
        println!("{}", json!({
            "status":              "ok",
            "command":             "router-info",
            "router":              info.router.to_string(),
            "owner":               info.owner.to_string(),
            "token_mint":          info.token_mint.to_string(),
            "pool":                info.pool.to_string(),
            "lp_mint":             info.lp_mint.to_string(),
            "sale":                info.sale.to_string(),
            "sale_paused":         info.sale_paused,
            "sale_inventory":      info.sale_inventory,
            "sale_percent":        info.sale_percent,
            "pool_percent":        info.pool_percent,
            "burn_percent":        info.burn_percent,
            "stake_claimable":     info.stake_claimable.to_string(),
            "stake_non_claimable": info.stake_non_claimable.to_string(),
            "reserve_native":      info.reserve_native,
            "reserve_token":       info.reserve_token,
            "lp_supply":           info.lp_supply,
            "fee_rate_bps":        info.fee_rate_bps,
            "spot_price":          info.spot_price,
        }));
    } else {
        println!("─── Router ───────────────────────────────────────────────────────");
        println!("  Router           {}", info.router);
        println!("  Owner            {}", info.owner);
        println!("  Token            {}", info.token_mint);
        println!("  Pool             {}", info.pool);
        println!("  LP mint          {}", info.lp_mint);
        println!();
        println!("  ─── Split ────────────────────────────────────────");
        println!("  Sale / pool      {:>17}% / {}%", info.sale_percent, info.pool_percent);
        println!("  LP burned        {:>19}%", info.burn_percent);
        println!("  Claimable vault  {}", info.stake_claimable);
        println!("  Locked vault     {}", info.stake_non_claimable);
        println!();
        println!("  ─── Pool ─────────────────────────────────────────");
        println!("  SOL reserve      {:>20}  ({:.4} SOL)", info.reserve_native, sol(info.reserve_native));
        println!("  Token reserve    {:>20}", info.reserve_token);
        println!("  LP supply        {:>20}", info.lp_supply);
        println!("  Fee              {:>19.2}%", info.fee_rate_bps as f64 / 100.0);
        println!("  Tokens per SOL   {:>20.6}", info.spot_price);
        println!();
        println!("  ─── Sale ─────────────────────────────────────────");
        println!("  Sale             {}{}", info.sale, if info.sale_paused { "  (paused)" } else { "" });
        println!("  Inventory        {:>20}", info.sale_inventory);
    }
    Ok(())
}
