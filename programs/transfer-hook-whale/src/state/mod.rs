pub mod mint_config;
pub mod whale_ledger;

pub use mint_config::*;
pub use whale_ledger::*;
