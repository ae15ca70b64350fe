// Allocation tolerances and field defaults
pub const EPSILON: f64 = 0.01;
pub const PERCENT_TOTAL: f64 = 100.0;
pub const DEFAULT_AMOUNT: f64 = 0.0;
pub const DEFAULT_PERCENTAGE: f64 = 0.0;
pub const DEFAULT_WEIGHT: f64 = 1.0;

// Presentation
pub const CURRENCY_DECIMALS: i32 = 2;

// Configuration defaults
pub const DEFAULT_LEDGER_PATH: &str = "data/ledger.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Environment keys
pub const ENV_LEDGER_PATH: &str = "LEDGER_PATH";
pub const ENV_CURRENT_PARTICIPANT: &str = "CURRENT_PARTICIPANT_ID";
pub const ENV_INCLUDE_COMPLETED: &str = "INCLUDE_COMPLETED";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

// Validation limits
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_NOTES_LENGTH: usize = 500;

// Error messages
pub const ERR_READ_LEDGER: &str = "Failed to read ledger snapshot";
pub const ERR_PARSE_LEDGER: &str = "Failed to parse ledger snapshot";
