#![allow(ambiguous_glob_reexports)]

pub mod admin;
pub mod earned;
pub mod exit;
pub mod get_reward;
pub mod initialize_vault;
pub mod notify_reward_amount;
pub mod stake;
pub mod withdraw;

pub use admin::*;
pub use earned::*;
pub use exit::*;
pub use get_reward::*;
pub use initialize_vault::*;
pub use notify_reward_amount::*;
pub use stake::*;
pub use withdraw::*;
