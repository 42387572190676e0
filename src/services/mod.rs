pub mod settlement;
pub mod wallet;

pub use settlement::{SettlementEngine, SettlementOutcome};
pub use wallet::{WalletError, WalletService};
