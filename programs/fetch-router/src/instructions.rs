#![allow(ambiguous_glob_reexports)]

pub mod admin;
pub mod deposit;
pub mod initialize_router;

pub use admin::*;
pub use deposit::*;
pub use initialize_router::*;
