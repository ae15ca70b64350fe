#![allow(dead_code)]

use split_settlement::ledger::Ledger;
use split_settlement::models::{
    Bill, BillStatus, DivisionMethod, NewBill, NewPayment, ParticipantShare, Payment,
};

pub const TEST_BASE_TIMESTAMP: i64 = 1700000000; // Nov 14, 2023 22:13:20 UTC
pub const FLOAT_TOLERANCE: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < FLOAT_TOLERANCE,
        "expected {}, got {}",
        expected,
        actual
    );
}

pub fn make_bill(id: &str, total: f64, method: DivisionMethod, shares: Vec<ParticipantShare>) -> Bill {
    Bill {
        id: id.to_string(),
        description: format!("Test bill {}", id),
        total_amount: total,
        division_method: method,
        timestamp: TEST_BASE_TIMESTAMP,
        category_id: None,
        group_id: None,
        status: BillStatus::Active,
        shares,
    }
}

pub fn make_payment(id: &str, bill_id: &str, participant_id: &str, amount: f64) -> Payment {
    Payment {
        id: id.to_string(),
        split_bill_id: bill_id.to_string(),
        participant_id: participant_id.to_string(),
        amount,
        timestamp: TEST_BASE_TIMESTAMP,
        notes: None,
    }
}

pub fn equal_shares<S: AsRef<str>>(ids: &[S]) -> Vec<ParticipantShare> {
    ids.iter()
        .map(|id| ParticipantShare::included(id.as_ref()))
        .collect()
}

/// A ledger with three participants (Alice, Bob, Carol). Returns their ids in that order.
pub fn setup_ledger() -> (Ledger, Vec<String>) {
    let mut ledger = Ledger::new();
    let ids = ["Alice", "Bob", "Carol"]
        .iter()
        .map(|name| {
            ledger
                .add_participant(name, None, None)
                .unwrap_or_else(|e| panic!("Failed to add participant {}: {}", name, e))
                .id
                .clone()
        })
        .collect();
    (ledger, ids)
}

pub fn new_bill(total: f64, method: DivisionMethod, shares: Vec<ParticipantShare>) -> NewBill {
    NewBill {
        description: "Groceries".to_string(),
        total_amount: total,
        division_method: method,
        timestamp: Some(TEST_BASE_TIMESTAMP),
        category_id: None,
        group_id: None,
        shares,
    }
}

pub fn new_payment(bill_id: &str, participant_id: &str, amount: f64) -> NewPayment {
    NewPayment {
        split_bill_id: bill_id.to_string(),
        participant_id: participant_id.to_string(),
        amount,
        timestamp: Some(TEST_BASE_TIMESTAMP),
        notes: None,
    }
}
