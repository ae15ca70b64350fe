//! In-memory ledger snapshot.
//!
//! The owning application keeps the authoritative copy of participants,
//! groups, bills and payments; this type applies the lifecycle rules when
//! that copy changes and hands snapshots to the pure allocation functions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::allocation::{AllocationCheck, validate_allocation};
use crate::constants::*;
use crate::error::LedgerError;
use crate::models::{
    Bill, BillStatus, DivisionMethod, Group, NewBill, NewPayment, Participant, ParticipantShare,
    Payment,
};
use crate::utils::{
    validate_optional_text, validate_positive_amount, validate_share_value, validate_string_length,
};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_timestamp() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn bill(&self, id: &str) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    pub fn payment(&self, id: &str) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    pub fn payments_for_bill<'a>(&'a self, bill_id: &'a str) -> impl Iterator<Item = &'a Payment> {
        self.payments.iter().filter(move |p| p.split_bill_id == bill_id)
    }

    // Participants

    pub fn add_participant(
        &mut self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<&Participant, LedgerError> {
        let participant = Participant {
            id: new_id(),
            name: validate_string_length(name, "Participant name", MAX_NAME_LENGTH)?,
            email: validate_optional_text(email, "Email", MAX_NAME_LENGTH)?,
            phone: validate_optional_text(phone, "Phone", MAX_NAME_LENGTH)?,
        };
        info!(participant_id = %participant.id, "participant added");

        let index = self.participants.len();
        self.participants.push(participant);
        Ok(&self.participants[index])
    }

    /// Replaces a participant's name and contact fields. The id never changes.
    pub fn update_participant(
        &mut self,
        id: &str,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<&Participant, LedgerError> {
        let name = validate_string_length(name, "Participant name", MAX_NAME_LENGTH)?;
        let email = validate_optional_text(email, "Email", MAX_NAME_LENGTH)?;
        let phone = validate_optional_text(phone, "Phone", MAX_NAME_LENGTH)?;

        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LedgerError::ParticipantNotFound(id.to_string()))?;
        participant.name = name;
        participant.email = email;
        participant.phone = phone;
        Ok(&*participant)
    }

    pub fn delete_participant(&mut self, id: &str) -> Result<Participant, LedgerError> {
        let index = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LedgerError::ParticipantNotFound(id.to_string()))?;

        let referenced = self.bills.iter().any(|b| b.references_participant(id))
            || self.payments.iter().any(|p| p.participant_id == id)
            || self
                .groups
                .iter()
                .any(|g| g.participant_ids.iter().any(|pid| pid == id));
        if referenced {
            warn!(participant_id = %id, "refusing to delete referenced participant");
            return Err(LedgerError::ParticipantInUse(id.to_string()));
        }

        info!(participant_id = %id, "participant deleted");
        Ok(self.participants.remove(index))
    }

    // Groups

    pub fn add_group(
        &mut self,
        name: &str,
        participant_ids: Vec<String>,
    ) -> Result<&Group, LedgerError> {
        let name = validate_string_length(name, "Group name", MAX_NAME_LENGTH)?;
        let mut seen = HashSet::new();
        for participant_id in &participant_ids {
            self.require_participant(participant_id)?;
            if !seen.insert(participant_id.as_str()) {
                return Err(LedgerError::InvalidField {
                    field: "Group members".to_string(),
                    reason: format!("{} is listed twice", participant_id),
                });
            }
        }

        let group = Group {
            id: new_id(),
            name,
            participant_ids,
        };
        info!(group_id = %group.id, members = group.participant_ids.len(), "group added");

        let index = self.groups.len();
        self.groups.push(group);
        Ok(&self.groups[index])
    }

    pub fn delete_group(&mut self, id: &str) -> Result<Group, LedgerError> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| LedgerError::GroupNotFound(id.to_string()))?;

        if self.bills.iter().any(|b| b.group_id.as_deref() == Some(id)) {
            warn!(group_id = %id, "refusing to delete group referenced by a bill");
            return Err(LedgerError::GroupInUse(id.to_string()));
        }

        info!(group_id = %id, "group deleted");
        Ok(self.groups.remove(index))
    }

    // Bills

    /// Stores a new active bill.
    ///
    /// The allocation check is returned alongside the bill rather than
    /// enforced, so callers can save an unbalanced bill after confirmation.
    pub fn create_bill(&mut self, new_bill: NewBill) -> Result<(&Bill, AllocationCheck), LedgerError> {
        let description =
            validate_string_length(&new_bill.description, "Description", MAX_DESCRIPTION_LENGTH)?;
        let total_amount = validate_positive_amount(new_bill.total_amount, "Total amount")?;
        let category_id =
            validate_optional_text(new_bill.category_id.as_deref(), "Category", MAX_NAME_LENGTH)?;
        if let Some(group_id) = new_bill.group_id.as_deref() {
            if self.group(group_id).is_none() {
                return Err(LedgerError::GroupNotFound(group_id.to_string()));
            }
        }
        self.validate_shares(&new_bill.shares)?;

        let bill = Bill {
            id: new_id(),
            description,
            total_amount,
            division_method: new_bill.division_method,
            timestamp: new_bill.timestamp.unwrap_or_else(now_timestamp),
            category_id,
            group_id: new_bill.group_id,
            status: BillStatus::Active,
            shares: new_bill.shares,
        };

        let check = validate_allocation(&bill);
        if !check.is_ok() {
            warn!(bill_id = %bill.id, ?check, "bill saved with unbalanced allocation");
        }
        info!(bill_id = %bill.id, method = %bill.division_method, "bill created");

        let index = self.bills.len();
        self.bills.push(bill);
        Ok((&self.bills[index], check))
    }

    /// Replaces the division method and share list of an active bill.
    pub fn update_bill_shares(
        &mut self,
        bill_id: &str,
        division_method: DivisionMethod,
        shares: Vec<ParticipantShare>,
    ) -> Result<AllocationCheck, LedgerError> {
        let bill = self.require_bill(bill_id)?;
        if bill.is_completed() {
            return Err(LedgerError::BillCompleted(bill_id.to_string()));
        }
        self.validate_shares(&shares)?;

        let bill = self.require_bill_mut(bill_id)?;
        bill.division_method = division_method;
        bill.shares = shares;

        let check = validate_allocation(bill);
        info!(bill_id = %bill_id, ?check, "bill shares updated");
        Ok(check)
    }

    /// Moves an active bill to completed. There is no way back.
    pub fn complete_bill(&mut self, bill_id: &str) -> Result<&Bill, LedgerError> {
        let bill = self.require_bill_mut(bill_id)?;
        if bill.is_completed() {
            return Err(LedgerError::BillAlreadyCompleted(bill_id.to_string()));
        }
        bill.status = BillStatus::Completed;
        info!(bill_id = %bill_id, "bill completed");
        Ok(&*bill)
    }

    /// Removes a bill together with its payments. Returns how many payments went with it.
    pub fn delete_bill(&mut self, bill_id: &str) -> Result<usize, LedgerError> {
        let index = self
            .bills
            .iter()
            .position(|b| b.id == bill_id)
            .ok_or_else(|| LedgerError::BillNotFound(bill_id.to_string()))?;
        self.bills.remove(index);

        let before = self.payments.len();
        self.payments.retain(|p| p.split_bill_id != bill_id);
        let removed = before - self.payments.len();

        info!(bill_id = %bill_id, payments_removed = removed, "bill deleted");
        Ok(removed)
    }

    // Payments

    /// Records a (possibly partial) payment. Completed bills still accept late payments.
    pub fn record_payment(&mut self, new_payment: NewPayment) -> Result<&Payment, LedgerError> {
        let amount = validate_positive_amount(new_payment.amount, "Payment amount")?;
        self.require_bill(&new_payment.split_bill_id)?;
        self.require_participant(&new_payment.participant_id)?;
        let notes = validate_optional_text(new_payment.notes.as_deref(), "Notes", MAX_NOTES_LENGTH)?;

        let payment = Payment {
            id: new_id(),
            split_bill_id: new_payment.split_bill_id,
            participant_id: new_payment.participant_id,
            amount,
            timestamp: new_payment.timestamp.unwrap_or_else(now_timestamp),
            notes,
        };
        info!(
            payment_id = %payment.id,
            bill_id = %payment.split_bill_id,
            amount = payment.amount,
            "payment recorded"
        );

        let index = self.payments.len();
        self.payments.push(payment);
        Ok(&self.payments[index])
    }

    pub fn delete_payment(&mut self, payment_id: &str) -> Result<Payment, LedgerError> {
        let index = self
            .payments
            .iter()
            .position(|p| p.id == payment_id)
            .ok_or_else(|| LedgerError::PaymentNotFound(payment_id.to_string()))?;
        info!(payment_id = %payment_id, "payment deleted");
        Ok(self.payments.remove(index))
    }

    fn require_participant(&self, id: &str) -> Result<&Participant, LedgerError> {
        self.participant(id)
            .ok_or_else(|| LedgerError::ParticipantNotFound(id.to_string()))
    }

    fn require_bill(&self, id: &str) -> Result<&Bill, LedgerError> {
        self.bill(id)
            .ok_or_else(|| LedgerError::BillNotFound(id.to_string()))
    }

    fn require_bill_mut(&mut self, id: &str) -> Result<&mut Bill, LedgerError> {
        self.bills
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| LedgerError::BillNotFound(id.to_string()))
    }

    fn validate_shares(&self, shares: &[ParticipantShare]) -> Result<(), LedgerError> {
        let mut seen = HashSet::new();
        for share in shares {
            self.require_participant(&share.participant_id)?;
            if !seen.insert(share.participant_id.as_str()) {
                return Err(LedgerError::DuplicateShare(share.participant_id.clone()));
            }
            validate_share_value(share.amount, "Share amount")?;
            validate_share_value(share.percentage, "Share percentage")?;
            validate_share_value(share.weight, "Share weight")?;
        }
        Ok(())
    }
}
