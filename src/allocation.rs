//! Share allocation for split bills.
//!
//! Every share is normalized once (unset `amount`/`percentage` become 0, unset
//! `weight` becomes 1, an explicit weight of 0 is kept) and the four division
//! methods operate on the normalized values. Results are exact: rounding to
//! currency precision is left to the presentation layer so repeated
//! aggregation does not accumulate rounding error.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::constants::*;
use crate::models::{Bill, DivisionMethod, ParticipantShare};

/// A share with every method-specific field resolved to a concrete value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedShare<'a> {
    pub participant_id: &'a str,
    pub is_included: bool,
    pub amount: f64,
    pub percentage: f64,
    pub weight: f64,
}

pub fn normalize_share(share: &ParticipantShare) -> NormalizedShare<'_> {
    NormalizedShare {
        participant_id: &share.participant_id,
        is_included: share.is_included,
        amount: share.amount.unwrap_or(DEFAULT_AMOUNT),
        percentage: share.percentage.unwrap_or(DEFAULT_PERCENTAGE),
        weight: share.weight.unwrap_or(DEFAULT_WEIGHT),
    }
}

/// Outcome of checking a bill's shares against its division method.
///
/// Advisory: callers decide whether a mismatch blocks saving.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "kind", content = "difference")]
pub enum AllocationCheck {
    Ok,
    /// `total - sum(amount)` for a fixed bill.
    AmountMismatch(f64),
    /// `100 - sum(percentage)` for a percentage bill.
    PercentageMismatch(f64),
    NoParticipants,
}

impl AllocationCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, AllocationCheck::Ok)
    }
}

/// Computes what `participant_id` owes on `bill`.
///
/// Returns 0 for participants without a share or with an excluded share.
pub fn compute_share(bill: &Bill, participant_id: &str) -> f64 {
    let Some(share) = bill.share_for(participant_id) else {
        return 0.0;
    };
    let share = normalize_share(share);
    if !share.is_included {
        return 0.0;
    }

    let included: Vec<NormalizedShare<'_>> = bill.included_shares().map(normalize_share).collect();
    share_of(bill, &share, &included)
}

/// Computed share for every participant of `bill`, in share order.
///
/// A participant listed more than once keeps only its first record, the one
/// `compute_share` reads.
pub fn compute_shares(bill: &Bill) -> Vec<(&str, f64)> {
    let included: Vec<NormalizedShare<'_>> = bill.included_shares().map(normalize_share).collect();
    let mut seen = HashSet::new();

    bill.shares
        .iter()
        .filter(|&share| seen.insert(share.participant_id.as_str()))
        .map(normalize_share)
        .map(|share| {
            let amount = if share.is_included {
                share_of(bill, &share, &included)
            } else {
                0.0
            };
            (share.participant_id, amount)
        })
        .collect()
}

fn share_of(bill: &Bill, share: &NormalizedShare<'_>, included: &[NormalizedShare<'_>]) -> f64 {
    let total = bill.total_amount;

    match bill.division_method {
        DivisionMethod::Equal => {
            if included.is_empty() {
                debug!(bill_id = %bill.id, "equal split with no included participants");
                return 0.0;
            }
            total / included.len() as f64
        }
        DivisionMethod::Fixed => share.amount,
        DivisionMethod::Percentage => total * (share.percentage / PERCENT_TOTAL),
        DivisionMethod::Weight => {
            let total_weight: f64 = included.iter().map(|s| s.weight).sum();
            if total_weight == 0.0 {
                debug!(bill_id = %bill.id, "weighted split with zero total weight");
                return 0.0;
            }
            total * (share.weight / total_weight)
        }
    }
}

/// Checks that the included shares are consistent with the division method.
pub fn validate_allocation(bill: &Bill) -> AllocationCheck {
    let included: Vec<NormalizedShare<'_>> = bill.included_shares().map(normalize_share).collect();
    if included.is_empty() {
        return AllocationCheck::NoParticipants;
    }

    match bill.division_method {
        DivisionMethod::Fixed => {
            let assigned: f64 = included.iter().map(|s| s.amount).sum();
            let difference = bill.total_amount - assigned;
            if difference.abs() > EPSILON {
                return AllocationCheck::AmountMismatch(difference);
            }
        }
        DivisionMethod::Percentage => {
            let assigned: f64 = included.iter().map(|s| s.percentage).sum();
            let difference = PERCENT_TOTAL - assigned;
            if difference.abs() > EPSILON {
                return AllocationCheck::PercentageMismatch(difference);
            }
        }
        DivisionMethod::Equal | DivisionMethod::Weight => {}
    }

    AllocationCheck::Ok
}
