//! Settlement engine for split bills: per-participant shares under four
//! division methods, allocation checks, payment tracking and balance netting.

pub mod allocation;
pub mod config;
pub mod constants;
pub mod error;
pub mod ledger;
pub mod models;
pub mod report;
pub mod settlement;
pub mod utils;

pub use allocation::{AllocationCheck, compute_share, compute_shares, validate_allocation};
pub use error::{AllocationError, ConfigError, LedgerError};
pub use ledger::Ledger;
pub use settlement::{
    BalanceSummary, net_balance_for_participant, paid_by_participant, participant_outstanding,
    remaining_balance, total_paid,
};
