//! Bill submission validation
//!
//! Checks run in a fixed order and stop at the first violation:
//! 1. title non-empty, total finite and > 0
//! 2. at least one participant
//! 3. every participant address is valid
//! 4. participant addresses are distinct (case-insensitive)
//! 5. creator is a valid address
//! 6. custom split only: every amount is a valid share and the amounts sum to
//!    the total within `AMOUNT_TOLERANCE`
//!
//! Equal-split shares are derived by the share calculator and never checked
//! against the total here.

use splitbill_core::{Address, Amount};
use std::collections::HashSet;

use crate::bill::{NewBill, SplitMethod};
use crate::error::ValidationError;
use crate::split::custom_share;

/// Maximum absolute difference between the custom shares and the total
pub const AMOUNT_TOLERANCE: f64 = 0.001;

/// Validation result with the first violated invariant
pub type ValidationResult = Result<(), ValidationError>;

/// Validate a bill submission without modifying it
pub fn validate_bill(input: &NewBill) -> ValidationResult {
    validate_header(input)?;
    validate_participants(input)?;

    Address::parse(&input.creator)
        .map_err(|_| ValidationError::InvalidAddress(input.creator.clone()))?;

    match input.split_method {
        SplitMethod::Custom => validate_custom_amounts(input),
        SplitMethod::Equal => Ok(()),
    }
}

fn validate_header(input: &NewBill) -> ValidationResult {
    if input.title.trim().is_empty() {
        return Err(ValidationError::InvalidTitleOrAmount(
            "title cannot be empty".to_string(),
        ));
    }

    if !input.total_amount.is_finite() || input.total_amount <= 0.0 {
        return Err(ValidationError::InvalidTitleOrAmount(format!(
            "total amount must be a positive number, got {}",
            input.total_amount
        )));
    }

    Ok(())
}

fn validate_participants(input: &NewBill) -> ValidationResult {
    if input.participants.is_empty() {
        return Err(ValidationError::EmptyParticipants);
    }

    let mut addresses = Vec::with_capacity(input.participants.len());
    for participant in &input.participants {
        let address = Address::parse(&participant.address)
            .map_err(|_| ValidationError::InvalidAddress(participant.address.clone()))?;
        addresses.push(address);
    }

    let mut seen = HashSet::with_capacity(addresses.len());
    for address in addresses {
        if !seen.insert(address.clone()) {
            return Err(ValidationError::DuplicateParticipant(address.to_string()));
        }
    }

    Ok(())
}

fn validate_custom_amounts(input: &NewBill) -> ValidationResult {
    let mut shares = Vec::with_capacity(input.participants.len());
    for participant in &input.participants {
        shares.push(custom_share(participant)?);
    }

    let actual: Amount = shares.iter().sum();
    if (actual.value() - input.total_amount).abs() > AMOUNT_TOLERANCE {
        return Err(ValidationError::AmountMismatch {
            expected: input.total_amount,
            actual: actual.value(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::NewParticipant;

    const CREATOR: &str = "0x00000000000000000000000000000000000ca201";
    const A: &str = "0x000000000000000000000000000000000000000a";
    const B: &str = "0x000000000000000000000000000000000000000b";

    fn custom(total: f64, amounts: &[f64]) -> NewBill {
        amounts
            .iter()
            .enumerate()
            .fold(
                NewBill::new("Trip", total, CREATOR).with_split(SplitMethod::Custom),
                |bill, (i, amount)| {
                    bill.with_participant(
                        NewParticipant::new(format!("0x{:040x}", i + 1)).with_amount(*amount),
                    )
                },
            )
    }

    #[test]
    fn test_valid_equal_bill() {
        let bill = NewBill::new("Dinner", 90.0, CREATOR)
            .with_participant(NewParticipant::new(A))
            .with_participant(NewParticipant::new(B));
        assert!(validate_bill(&bill).is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let bill = NewBill::new("   ", 10.0, CREATOR).with_participant(NewParticipant::new(A));
        assert!(matches!(
            validate_bill(&bill),
            Err(ValidationError::InvalidTitleOrAmount(_))
        ));
    }

    #[test]
    fn test_non_positive_or_non_finite_total_rejected() {
        for total in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let bill = NewBill::new("Dinner", total, CREATOR).with_participant(NewParticipant::new(A));
            assert!(
                matches!(validate_bill(&bill), Err(ValidationError::InvalidTitleOrAmount(_))),
                "total {total} accepted"
            );
        }
    }

    #[test]
    fn test_invalid_creator_rejected() {
        let bill = NewBill::new("Dinner", 10.0, "alice").with_participant(NewParticipant::new(A));
        assert_eq!(
            validate_bill(&bill),
            Err(ValidationError::InvalidAddress("alice".to_string()))
        );
    }

    #[test]
    fn test_participant_checks_run_before_creator_check() {
        let bill = NewBill::new("Dinner", 10.0, "alice");
        assert_eq!(validate_bill(&bill), Err(ValidationError::EmptyParticipants));

        let bill = NewBill::new("Dinner", 10.0, "alice")
            .with_participant(NewParticipant::new(A))
            .with_participant(NewParticipant::new(A));
        assert_eq!(
            validate_bill(&bill),
            Err(ValidationError::DuplicateParticipant(A.to_string()))
        );
    }

    #[test]
    fn test_empty_participants_rejected() {
        let bill = NewBill::new("Dinner", 10.0, CREATOR);
        assert_eq!(validate_bill(&bill), Err(ValidationError::EmptyParticipants));
    }

    #[test]
    fn test_invalid_participant_address_named() {
        let bill = NewBill::new("Dinner", 10.0, CREATOR)
            .with_participant(NewParticipant::new(A))
            .with_participant(NewParticipant::new("0xnothex"));
        assert_eq!(
            validate_bill(&bill),
            Err(ValidationError::InvalidAddress("0xnothex".to_string()))
        );
    }

    #[test]
    fn test_duplicate_participant_case_insensitive() {
        let bill = NewBill::new("Dinner", 10.0, CREATOR)
            .with_participant(NewParticipant::new(A))
            .with_participant(NewParticipant::new(A.to_uppercase()));
        assert_eq!(
            validate_bill(&bill),
            Err(ValidationError::DuplicateParticipant(A.to_string()))
        );
    }

    #[test]
    fn test_invalid_address_reported_before_duplicate() {
        let bill = NewBill::new("Dinner", 10.0, CREATOR)
            .with_participant(NewParticipant::new(A))
            .with_participant(NewParticipant::new(A))
            .with_participant(NewParticipant::new("bad"));
        assert_eq!(
            validate_bill(&bill),
            Err(ValidationError::InvalidAddress("bad".to_string()))
        );
    }

    #[test]
    fn test_custom_amounts_matching_total() {
        assert!(validate_bill(&custom(100.0, &[40.0, 60.0])).is_ok());
        // Within tolerance
        assert!(validate_bill(&custom(100.0, &[33.3333, 33.3333, 33.3334])).is_ok());
        assert!(validate_bill(&custom(0.3, &[0.1, 0.2])).is_ok());
    }

    #[test]
    fn test_custom_amounts_mismatch() {
        let result = validate_bill(&custom(100.0, &[40.0, 50.0]));
        assert_eq!(
            result,
            Err(ValidationError::AmountMismatch {
                expected: 100.0,
                actual: 90.0
            })
        );

        assert!(matches!(
            validate_bill(&custom(100.0, &[40.0, 60.002])),
            Err(ValidationError::AmountMismatch { .. })
        ));
    }

    #[test]
    fn test_custom_negative_share_rejected() {
        assert!(matches!(
            validate_bill(&custom(10.0, &[20.0, -10.0])),
            Err(ValidationError::InvalidShare { .. })
        ));
    }

    #[test]
    fn test_equal_split_exempt_from_sum_check() {
        // Amounts supplied on an equal split are ignored
        let bill = NewBill::new("Dinner", 100.0, CREATOR)
            .with_participant(NewParticipant::new(A).with_amount(1.0));
        assert!(validate_bill(&bill).is_ok());
    }
}
