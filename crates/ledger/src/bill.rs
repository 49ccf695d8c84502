//! Bill and Participant model
//!
//! Serialized with camelCase field names so the persisted snapshot keeps the
//! `bills.json` layout: `totalAmount`, `createdAt`, `paymentReference`, ...
//! Older snapshots that call the payment reference `txHash` still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use splitbill_core::{Address, Amount};
use std::fmt;
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::error::LedgerError;

/// Unique bill identifier.
///
/// New bills get a UUID v4; any non-empty string loaded from storage is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(String);

impl BillId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BillId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BillId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Bill lifecycle state. `Completed` is terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Active,
    Completed,
}

/// How the total is divided between participants
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    /// Total divided evenly between every participant and the creator
    #[default]
    Equal,
    /// Each participant owes a caller-supplied amount
    Custom,
}

/// A party owing a share of a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub address: Address,
    pub name: String,
    pub share: Amount,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, alias = "txHash")]
    pub payment_reference: Option<String>,
}

impl Participant {
    /// Unpaid participant; `name` falls back to the address when missing or blank
    pub fn new(address: Address, name: Option<&str>, share: Amount) -> Self {
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => address.to_string(),
        };

        Self {
            address,
            name,
            share,
            paid: false,
            payment_reference: None,
        }
    }
}

/// A shared-expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,
    pub title: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    pub total_amount: Amount,
    pub creator: Address,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: BillStatus,
}

impl Bill {
    pub fn is_completed(&self) -> bool {
        self.status == BillStatus::Completed
    }

    /// Find a participant by address (case-insensitive)
    pub fn participant(&self, address: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.address.matches(address))
    }

    /// True if `address` is the creator or one of the participants
    pub fn involves(&self, address: &str) -> bool {
        self.creator.matches(address) || self.participant(address).is_some()
    }

    pub fn all_paid(&self) -> bool {
        self.participants.iter().all(|p| p.paid)
    }

    pub fn paid_count(&self) -> usize {
        self.participants.iter().filter(|p| p.paid).count()
    }

    /// Portion of the total the creator covers.
    ///
    /// Equal split: the implicit `total / (N + 1)` share. Custom split: whatever
    /// the listed shares leave over, which is zero up to the validation tolerance.
    pub fn creator_share(&self) -> Amount {
        let listed: Amount = self.participants.iter().map(|p| p.share).sum();
        self.total_amount.saturating_sub(&listed)
    }

    /// Sum of shares not yet paid
    pub fn outstanding(&self) -> Amount {
        self.participants
            .iter()
            .filter(|p| !p.paid)
            .map(|p| p.share)
            .sum()
    }

    /// Mark one participant as paid and re-derive the status.
    ///
    /// Re-recording an already paid participant overwrites the reference and
    /// changes nothing else. Status only ever moves forward.
    pub(crate) fn record_payment(
        &mut self,
        address: &str,
        reference: String,
    ) -> Result<&Participant, LedgerError> {
        let index = self
            .participants
            .iter()
            .position(|p| p.address.matches(address))
            .ok_or_else(|| LedgerError::ParticipantNotFound {
                bill_id: self.id.clone(),
                address: address.to_string(),
            })?;

        let participant = &mut self.participants[index];
        participant.paid = true;
        participant.payment_reference = Some(reference);

        if self.all_paid() {
            self.status = BillStatus::Completed;
        }

        Ok(&self.participants[index])
    }
}

/// One participant line of a bill submission.
///
/// Missing fields deserialize to blanks so the validator reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipant {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Only read for custom splits; a missing amount counts as zero
    #[serde(
        default,
        alias = "share",
        alias = "customAmount",
        deserialize_with = "lenient_optional_amount"
    )]
    pub amount: Option<f64>,
}

impl NewParticipant {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            amount: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// Unvalidated bill submission, as received from a caller.
///
/// Every field is optional on the wire: a missing title, creator or total
/// reaches `validate_bill` and fails there. Amounts may arrive as numbers or
/// numeric strings; anything else becomes NaN and is rejected as invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_amount: f64,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub split_method: SplitMethod,
    #[serde(default)]
    pub participants: Vec<NewParticipant>,
}

impl NewBill {
    /// Equal-split submission with no participants yet
    pub fn new(title: impl Into<String>, total_amount: f64, creator: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            total_amount,
            creator: creator.into(),
            split_method: SplitMethod::Equal,
            participants: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_split(mut self, method: SplitMethod) -> Self {
        self.split_method = method;
        self
    }

    pub fn with_participant(mut self, participant: NewParticipant) -> Self {
        self.participants.push(participant);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn value(self) -> f64 {
        match self {
            RawAmount::Number(v) => v,
            RawAmount::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(raw.map_or(f64::NAN, RawAmount::value))
}

fn lenient_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(raw.map(RawAmount::value))
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
