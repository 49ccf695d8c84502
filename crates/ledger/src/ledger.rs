//! Bill ledger - owner of all bills
//!
//! Every mutation is a snapshot transaction:
//! clone current snapshot → mutate the copy → `store.save(copy)` → publish.
//!
//! Mutations are serialized by `write_lock`. Readers only clone the published
//! `Arc<Vec<Bill>>` and never wait on a mutation in progress; they see the
//! snapshot before or after it, nothing in between. If `save` fails the copy is
//! dropped, so memory and storage both keep the pre-operation state.

use chrono::Utc;
use serde::Serialize;
use splitbill_core::{Address, Amount};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::bill::{Bill, BillId, BillStatus, NewBill};
use crate::error::{LedgerError, ValidationError};
use crate::split::compute_shares;
use crate::store::LedgerStore;
use crate::validation::validate_bill;

/// Per-address dashboard figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    /// Bills the address created or participates in
    pub total_bills: usize,
    /// Bills where the address is a participant that has not paid yet
    pub pending_payments: usize,
    /// Sum of the unpaid shares of the address
    pub total_owed: Amount,
}

/// In-memory bill collection backed by a `LedgerStore`
pub struct BillLedger {
    store: Box<dyn LedgerStore>,
    snapshot: RwLock<Arc<Vec<Bill>>>,
    write_lock: Mutex<()>,
}

impl BillLedger {
    /// Open a ledger, loading the current snapshot from `store`
    pub fn open(store: impl LedgerStore + 'static) -> Result<Self, LedgerError> {
        let bills = store.load()?;
        debug!(bills = bills.len(), "ledger loaded");

        Ok(Self {
            store: Box::new(store),
            snapshot: RwLock::new(Arc::new(bills)),
            write_lock: Mutex::new(()),
        })
    }

    /// Current immutable snapshot, in insertion order
    pub fn snapshot(&self) -> Arc<Vec<Bill>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of bills in the ledger
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Validate a submission, compute its shares and append it as a new active bill
    pub fn create(&self, input: NewBill) -> Result<Bill, LedgerError> {
        validate_bill(&input)?;

        let total = Amount::new(input.total_amount)
            .map_err(|e| ValidationError::InvalidTitleOrAmount(e.to_string()))?;
        let creator = Address::parse(&input.creator)
            .map_err(|_| ValidationError::InvalidAddress(input.creator.clone()))?;
        let participants = compute_shares(total, input.split_method, &input.participants)?;

        let mut bill = Bill {
            id: BillId::generate(),
            title: input.title.trim().to_string(),
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            total_amount: total,
            creator,
            participants,
            created_at: Utc::now(),
            status: BillStatus::Active,
        };

        let bill = self.commit(move |bills| {
            while bills.iter().any(|b| b.id == bill.id) {
                bill.id = BillId::generate();
            }
            bills.push(bill.clone());
            Ok(bill)
        })?;

        info!(
            bill_id = %bill.id,
            creator = %bill.creator,
            total = %bill.total_amount,
            participants = bill.participants.len(),
            split = %input.split_method,
            "bill created"
        );
        Ok(bill)
    }

    /// Look up a single bill
    pub fn get(&self, bill_id: &str) -> Result<Bill, LedgerError> {
        self.snapshot()
            .iter()
            .find(|b| b.id.as_str() == bill_id)
            .cloned()
            .ok_or_else(|| LedgerError::BillNotFound(BillId::from(bill_id)))
    }

    /// Bills created by or owed by `address` (case-insensitive), in insertion order
    pub fn list_for(&self, address: &str) -> Vec<Bill> {
        let bills: Vec<Bill> = self
            .snapshot()
            .iter()
            .filter(|b| b.involves(address))
            .cloned()
            .collect();

        debug!(address, count = bills.len(), "listed bills");
        bills
    }

    /// Dashboard figures for `address`
    pub fn summary_for(&self, address: &str) -> BillSummary {
        let snapshot = self.snapshot();
        let visible: Vec<&Bill> = snapshot.iter().filter(|b| b.involves(address)).collect();

        let unpaid: Vec<Amount> = visible
            .iter()
            .filter_map(|b| b.participant(address))
            .filter(|p| !p.paid)
            .map(|p| p.share)
            .collect();

        BillSummary {
            total_bills: visible.len(),
            pending_payments: unpaid.len(),
            total_owed: unpaid.iter().sum(),
        }
    }

    /// Mark `participant` of `bill_id` as paid with an external payment reference.
    ///
    /// Completes the bill when this was the last unpaid participant. Repeating the
    /// call for a paid participant only re-sets the same fields.
    pub fn record_payment(
        &self,
        bill_id: &str,
        participant: &str,
        reference: impl Into<String>,
    ) -> Result<Bill, LedgerError> {
        let reference = reference.into();

        let (bill, completed_now) = self.commit(|bills| {
            let bill = find_mut(bills, bill_id)?;
            let was_completed = bill.is_completed();
            bill.record_payment(participant, reference.clone())?;
            Ok((bill.clone(), !was_completed && bill.is_completed()))
        })?;

        info!(
            bill_id = %bill.id,
            participant,
            reference = %reference,
            paid = bill.paid_count(),
            of = bill.participants.len(),
            "payment recorded"
        );
        if completed_now {
            info!(bill_id = %bill.id, "bill completed");
        }
        Ok(bill)
    }

    /// Delete a bill. Only its creator may do so.
    pub fn remove(&self, bill_id: &str, requester: &str) -> Result<(), LedgerError> {
        self.commit(|bills| {
            let index = bills
                .iter()
                .position(|b| b.id.as_str() == bill_id)
                .ok_or_else(|| LedgerError::BillNotFound(BillId::from(bill_id)))?;

            if !bills[index].creator.matches(requester) {
                return Err(LedgerError::Forbidden {
                    bill_id: bills[index].id.clone(),
                    requester: requester.to_string(),
                });
            }

            bills.remove(index);
            Ok(())
        })?;

        info!(bill_id, requester, "bill removed");
        Ok(())
    }

    /// Persist the current snapshot unchanged
    pub fn flush(&self) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = self.snapshot();
        self.store.save(&snapshot)?;
        debug!(bills = snapshot.len(), "ledger flushed");
        Ok(())
    }

    /// Replace the in-memory snapshot with what the store currently holds
    pub fn reload(&self) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let bills = self.store.load()?;
        debug!(bills = bills.len(), "ledger reloaded");
        self.publish(bills);
        Ok(())
    }

    /// Run one read-modify-write transaction against the snapshot
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut Vec<Bill>) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut next = Vec::clone(&self.snapshot());
        let output = mutate(&mut next)?;

        if let Err(e) = self.store.save(&next) {
            warn!(error = %e, "snapshot save failed, mutation rolled back");
            return Err(LedgerError::StoreUnavailable(e));
        }

        self.publish(next);
        Ok(output)
    }

    fn publish(&self, bills: Vec<Bill>) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(bills);
    }
}

fn find_mut<'a>(bills: &'a mut [Bill], bill_id: &str) -> Result<&'a mut Bill, LedgerError> {
    bills
        .iter_mut()
        .find(|b| b.id.as_str() == bill_id)
        .ok_or_else(|| LedgerError::BillNotFound(BillId::from(bill_id)))
}
