//! Share calculation
//!
//! Turns a validated submission into the participant list of a bill.
//! Pure functions: no I/O, same input gives the same shares.

use splitbill_core::{Address, Amount};

use crate::bill::{NewParticipant, Participant, SplitMethod};
use crate::error::ValidationError;

/// Share owed by each listed participant under an equal split.
///
/// The creator counts as one extra party that is never stored as a participant,
/// so the total is divided by `participants + 1`.
pub fn equal_share(total: Amount, participants: usize) -> Amount {
    // participants + 1 is never zero
    total.split_evenly(participants + 1).unwrap_or(Amount::ZERO)
}

/// Compute the participant records for a bill.
///
/// Equal: every participant owes `equal_share`. Custom: each supplied amount is
/// passed through unchanged (a missing amount counts as zero); whether they add up
/// to the total is checked by the validator, not here.
pub fn compute_shares(
    total: Amount,
    method: SplitMethod,
    participants: &[NewParticipant],
) -> Result<Vec<Participant>, ValidationError> {
    let equal = equal_share(total, participants.len());

    participants
        .iter()
        .map(|input| {
            let address = Address::parse(&input.address)
                .map_err(|_| ValidationError::InvalidAddress(input.address.clone()))?;

            let share = match method {
                SplitMethod::Equal => equal,
                SplitMethod::Custom => custom_share(input)?,
            };

            Ok(Participant::new(address, input.name.as_deref(), share))
        })
        .collect()
}

/// Caller-supplied amount of one participant as an `Amount`
pub(crate) fn custom_share(input: &NewParticipant) -> Result<Amount, ValidationError> {
    Amount::new(input.amount.unwrap_or(0.0)).map_err(|e| ValidationError::InvalidShare {
        address: input.address.clone(),
        reason: e.to_string(),
    })
}
