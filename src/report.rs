//! Settlement report rendered from a ledger snapshot.
//!
//! This is the presentation edge: every money figure here is rounded to
//! currency precision.

use serde::Serialize;

use crate::allocation::{AllocationCheck, compute_shares, validate_allocation};
use crate::ledger::Ledger;
use crate::models::{Bill, BillStatus, DivisionMethod};
use crate::settlement::{
    BalanceSummary, net_balance_for_participant, paid_by_participant, remaining_balance,
    total_paid,
};
use crate::utils::round_currency;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ShareLine {
    pub participant_id: String,
    pub participant_name: Option<String>,
    pub included: bool,
    pub share: f64,
    pub paid: f64,
    pub outstanding: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BillReport {
    pub bill_id: String,
    pub description: String,
    pub status: BillStatus,
    pub division_method: DivisionMethod,
    pub total_amount: f64,
    pub total_paid: f64,
    pub remaining_balance: f64,
    pub allocation: AllocationCheck,
    pub shares: Vec<ShareLine>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SettlementReport {
    pub generated_at: i64,
    pub bills: Vec<BillReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<BalanceSummary>,
}

impl SettlementReport {
    /// Builds the report for every bill in `ledger`.
    ///
    /// Completed bills are listed only when `include_completed` is set; the
    /// same flag controls whether they count toward the balance summary of
    /// `current_participant`.
    pub fn build(ledger: &Ledger, current_participant: Option<&str>, include_completed: bool) -> Self {
        let bills = ledger
            .bills
            .iter()
            .filter(|bill| include_completed || !bill.is_completed())
            .map(|bill| bill_report(ledger, bill))
            .collect();

        let balance = current_participant.map(|participant_id| {
            let summary = net_balance_for_participant(
                participant_id,
                &ledger.bills,
                &ledger.payments,
                !include_completed,
            );
            BalanceSummary {
                to_receive: round_currency(summary.to_receive),
                to_pay: round_currency(summary.to_pay),
                net: round_currency(summary.net),
            }
        });

        SettlementReport {
            generated_at: time::OffsetDateTime::now_utc().unix_timestamp(),
            bills,
            balance,
        }
    }
}

fn bill_report(ledger: &Ledger, bill: &Bill) -> BillReport {
    let shares = compute_shares(bill)
        .into_iter()
        .map(|(participant_id, share)| {
            let paid = paid_by_participant(bill, participant_id, &ledger.payments);
            ShareLine {
                participant_id: participant_id.to_string(),
                participant_name: ledger.participant(participant_id).map(|p| p.name.clone()),
                included: bill.includes(participant_id),
                share: round_currency(share),
                paid: round_currency(paid),
                outstanding: round_currency(share - paid),
            }
        })
        .collect();

    let allocation = match validate_allocation(bill) {
        AllocationCheck::AmountMismatch(diff) => AllocationCheck::AmountMismatch(round_currency(diff)),
        AllocationCheck::PercentageMismatch(diff) => {
            AllocationCheck::PercentageMismatch(round_currency(diff))
        }
        other => other,
    };

    BillReport {
        bill_id: bill.id.clone(),
        description: bill.description.clone(),
        status: bill.status,
        division_method: bill.division_method,
        total_amount: round_currency(bill.total_amount),
        total_paid: round_currency(total_paid(bill, &ledger.payments)),
        remaining_balance: round_currency(remaining_balance(bill, &ledger.payments)),
        allocation,
        shares,
    }
}
