//! Payment tracking and balance netting across bills.

use serde::Serialize;

use crate::allocation::{compute_share, compute_shares};
use crate::models::{Bill, Payment};

/// Amounts owed to and by one participant across a set of bills.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct BalanceSummary {
    pub to_receive: f64,
    pub to_pay: f64,
    pub net: f64,
}

fn payments_for<'a>(bill: &'a Bill, payments: &'a [Payment]) -> impl Iterator<Item = &'a Payment> {
    payments
        .iter()
        .filter(move |payment| payment.split_bill_id == bill.id)
}

/// Sum of every payment recorded against `bill`, regardless of who paid.
pub fn total_paid(bill: &Bill, payments: &[Payment]) -> f64 {
    payments_for(bill, payments).map(|p| p.amount).sum()
}

/// What is left to settle on `bill`. Negative when overpaid.
pub fn remaining_balance(bill: &Bill, payments: &[Payment]) -> f64 {
    bill.total_amount - total_paid(bill, payments)
}

pub fn paid_by_participant(bill: &Bill, participant_id: &str, payments: &[Payment]) -> f64 {
    payments_for(bill, payments)
        .filter(|p| p.participant_id == participant_id)
        .map(|p| p.amount)
        .sum()
}

/// The participant's computed share minus what they already paid on `bill`.
pub fn participant_outstanding(bill: &Bill, participant_id: &str, payments: &[Payment]) -> f64 {
    compute_share(bill, participant_id) - paid_by_participant(bill, participant_id, payments)
}

/// Net position of `participant_id` under the "I fronted the bill" model.
///
/// For every considered bill that includes the participant, the shares of the
/// other included participants count as owed to them and their own share
/// counts as owed by them. Debts are not simplified across participants.
/// `payments` does not change the figures.
pub fn net_balance_for_participant(
    participant_id: &str,
    bills: &[Bill],
    _payments: &[Payment],
    exclude_completed: bool,
) -> BalanceSummary {
    let mut summary = BalanceSummary::default();

    for bill in bills {
        if exclude_completed && bill.is_completed() {
            continue;
        }
        if !bill.includes(participant_id) {
            continue;
        }

        summary.to_receive += compute_shares(bill)
            .into_iter()
            .filter(|(id, _)| *id != participant_id)
            .map(|(_, amount)| amount)
            .sum::<f64>();
        summary.to_pay += compute_share(bill, participant_id);
    }

    summary.net = summary.to_receive - summary.to_pay;
    summary
}
