// Receipt Points - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod receipt;
pub mod amount;
pub mod validation;
pub mod scoring;
pub mod store;
pub mod config;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use receipt::{Receipt, ReceiptItem};
pub use amount::{is_decimal_numeral, parse_amount};
pub use validation::{validate, parse_purchase_date, parse_purchase_time, ValidationError};
pub use scoring::{
    score, score_breakdown,
    PointsBreakdown, PointsRule, RuleContribution, ScoringError,
};
pub use store::{InMemoryReceiptStore, ReceiptStore, StoredReceipt};
pub use config::ServerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
