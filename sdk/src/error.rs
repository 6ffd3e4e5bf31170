//! SDK error type.

use solana_sdk::pubkey::Pubkey;

/// All errors returned by the Fetch SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── RPC / network ────────────────────────────────────────────────────────
    /// A Solana JSON-RPC call failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    /// The account does not exist (or holds no data) at the given address.
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    // ── Pricing ──────────────────────────────────────────────────────────────
    /// One of the pool reserves is empty, nothing can be quoted.
    #[error("Pool has no liquidity; seed it with add_liquidity first")]
    NoLiquidity,

    /// The deposit is too small for the pool to mint a single LP share.
    #[error("Deposit of {lamports} lamports mints no LP shares at current reserves")]
    NothingMinted { lamports: u64 },

    // ── Staking ──────────────────────────────────────────────────────────────
    /// The vault is locked; claim and exit open at `matures_at`.
    #[error("Vault is locked until unix time {matures_at}")]
    VaultLocked { matures_at: i64 },

    // ── Arithmetic ───────────────────────────────────────────────────────────
    #[error("Integer overflow in pricing / reward math")]
    MathOverflow,

    // ── Account parsing ──────────────────────────────────────────────────────
    /// Raw account bytes could not be deserialized.
    #[error("Account parse error at offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
