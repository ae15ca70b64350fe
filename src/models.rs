use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AllocationError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub participant_ids: Vec<String>,
}

/// How a bill's total is divided among its included participants.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DivisionMethod {
    Equal,
    Fixed,
    Percentage,
    Weight,
}

impl DivisionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DivisionMethod::Equal => "equal",
            DivisionMethod::Fixed => "fixed",
            DivisionMethod::Percentage => "percentage",
            DivisionMethod::Weight => "weight",
        }
    }
}

impl fmt::Display for DivisionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DivisionMethod {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(DivisionMethod::Equal),
            "fixed" => Ok(DivisionMethod::Fixed),
            "percentage" => Ok(DivisionMethod::Percentage),
            "weight" => Ok(DivisionMethod::Weight),
            _ => Err(AllocationError::UnknownMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for DivisionMethod {
    type Error = AllocationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Active,
    Completed,
}

/// A participant's allocation record within a bill.
///
/// Only the field matching the bill's division method is read; the others
/// are ignored. Unset numeric fields are defaulted during normalization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParticipantShare {
    pub participant_id: String,
    #[serde(alias = "isIncluded", default = "default_included")]
    pub is_included: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

fn default_included() -> bool {
    true
}

impl ParticipantShare {
    pub fn included(participant_id: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            is_included: true,
            amount: None,
            percentage: None,
            weight: None,
        }
    }

    pub fn excluded(participant_id: impl Into<String>) -> Self {
        Self {
            is_included: false,
            ..Self::included(participant_id)
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Bill {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub total_amount: f64,
    pub division_method: DivisionMethod,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default)]
    pub shares: Vec<ParticipantShare>,
}

impl Bill {
    pub fn share_for(&self, participant_id: &str) -> Option<&ParticipantShare> {
        self.shares
            .iter()
            .find(|share| share.participant_id == participant_id)
    }

    pub fn included_shares(&self) -> impl Iterator<Item = &ParticipantShare> {
        self.shares.iter().filter(|share| share.is_included)
    }

    pub fn includes(&self, participant_id: &str) -> bool {
        self.share_for(participant_id)
            .is_some_and(|share| share.is_included)
    }

    pub fn references_participant(&self, participant_id: &str) -> bool {
        self.share_for(participant_id).is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.status == BillStatus::Completed
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: String,
    #[serde(alias = "splitBillId")]
    pub split_bill_id: String,
    pub participant_id: String,
    pub amount: f64,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Input for creating a bill through the ledger.
#[derive(Debug, Clone)]
pub struct NewBill {
    pub description: String,
    pub total_amount: f64,
    pub division_method: DivisionMethod,
    pub timestamp: Option<i64>,
    pub category_id: Option<String>,
    pub group_id: Option<String>,
    pub shares: Vec<ParticipantShare>,
}

/// Input for recording a payment through the ledger.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub split_bill_id: String,
    pub participant_id: String,
    pub amount: f64,
    pub timestamp: Option<i64>,
    pub notes: Option<String>,
}
