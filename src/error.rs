use thiserror::Error;

/// Programmer errors surfaced by the allocation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("Unknown division method: {0:?}")]
    UnknownMethod(String),
}

/// Lifecycle rule violations rejected by the ledger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),
    #[error("Participant {0} is still referenced by a bill, payment or group")]
    ParticipantInUse(String),
    #[error("Group not found: {0}")]
    GroupNotFound(String),
    #[error("Group {0} is still referenced by a bill")]
    GroupInUse(String),
    #[error("Bill not found: {0}")]
    BillNotFound(String),
    #[error("Bill {0} is completed and can no longer be edited")]
    BillCompleted(String),
    #[error("Bill {0} is already completed")]
    BillAlreadyCompleted(String),
    #[error("Payment not found: {0}")]
    PaymentNotFound(String),
    #[error("Participant {0} appears more than once in the share list")]
    DuplicateShare(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} must not be blank when set")]
    BlankValue(String),
    #[error("Invalid boolean for {key}: {value}")]
    InvalidFlag { key: String, value: String },
}
