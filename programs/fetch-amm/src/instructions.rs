#![allow(ambiguous_glob_reexports)]

pub mod initialize_pool;
pub mod add_liquidity;
pub mod remove_liquidity;
pub mod swap;

pub use initialize_pool::*;
pub use add_liquidity::*;
pub use remove_liquidity::*;
pub use swap::*;
