#![allow(ambiguous_glob_reexports)]

pub mod admin;
pub mod buy;
pub mod get_sale_price;
pub mod initialize_sale;

pub use admin::*;
pub use buy::*;
pub use get_sale_price::*;
pub use initialize_sale::*;
