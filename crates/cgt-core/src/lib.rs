pub mod accounting;
pub mod config;
pub mod corporate_actions;
pub mod error;
pub mod fy;
pub mod ledger;
pub mod lp;
pub mod models;
pub mod orchestrator;
pub mod short_sell;

pub use config::Config;
pub use error::CgtError;
pub use ledger::TradeLedger;
pub use models::*;
