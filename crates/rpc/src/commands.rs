//! CLI commands

use anyhow::{bail, Context};
use splitbill_ledger::{Bill, BillSummary, NewBill, NewParticipant};

use crate::context::AppContext;

/// Parse a `--participant` value: `ADDRESS[:NAME][=AMOUNT]`
pub fn parse_participant(value: &str) -> Result<NewParticipant, anyhow::Error> {
    let (head, amount) = match value.rsplit_once('=') {
        Some((head, amount)) => {
            let amount: f64 = amount
                .trim()
                .parse()
                .with_context(|| format!("Invalid amount in participant '{}'", value))?;
            (head, Some(amount))
        }
        None => (value, None),
    };

    let (address, name) = match head.split_once(':') {
        Some((address, name)) => (address, Some(name)),
        None => (head, None),
    };

    if address.trim().is_empty() {
        bail!("Missing address in participant '{}'", value);
    }

    let mut participant = NewParticipant::new(address.trim());
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        participant = participant.named(name.trim());
    }
    if let Some(amount) = amount {
        participant = participant.with_amount(amount);
    }
    Ok(participant)
}

/// Create a bill
pub fn create(ctx: &AppContext, input: NewBill) -> Result<Bill, anyhow::Error> {
    let bill = ctx.ledger.create(input)?;

    println!("✅ Created bill {} ({})", bill.id, bill.title);
    print_bill(&bill);
    Ok(bill)
}

/// List bills for an address, most recent first
pub fn list(ctx: &AppContext, address: &str) -> Result<Vec<Bill>, anyhow::Error> {
    let mut bills = ctx.ledger.list_for(address);
    bills.reverse();

    if bills.is_empty() {
        println!("📭 No bills found for {}", address);
    } else {
        println!("🧾 Bills for {} ({}):", address, bills.len());
        for bill in &bills {
            let share = bill
                .participant(address)
                .map(|p| format!(" | your share: {}{}", p.share, if p.paid { " (paid)" } else { "" }))
                .unwrap_or_default();
            println!(
                "  - [{}] {} | {} | {} | {}/{} paid{}",
                bill.id,
                bill.title,
                bill.total_amount,
                bill.status,
                bill.paid_count(),
                bill.participants.len(),
                share
            );
        }
    }
    Ok(bills)
}

/// Show a single bill
pub fn show(ctx: &AppContext, bill_id: &str) -> Result<Bill, anyhow::Error> {
    let bill = ctx.ledger.get(bill_id)?;
    print_bill(&bill);
    Ok(bill)
}

/// Record a payment observed for a participant
pub fn pay(
    ctx: &AppContext,
    bill_id: &str,
    participant: &str,
    reference: &str,
) -> Result<Bill, anyhow::Error> {
    let bill = ctx.ledger.record_payment(bill_id, participant, reference)?;

    println!(
        "✅ Recorded payment of {} for bill {} (ref: {})",
        participant, bill.id, reference
    );
    if bill.is_completed() {
        println!("🎉 All participants have paid, bill completed");
    }
    Ok(bill)
}

/// Delete a bill (creator only)
pub fn delete(ctx: &AppContext, bill_id: &str, requester: &str) -> Result<(), anyhow::Error> {
    ctx.ledger.remove(bill_id, requester)?;
    println!("🗑️  Deleted bill {}", bill_id);
    Ok(())
}

/// Dashboard figures for an address
pub fn summary(ctx: &AppContext, address: &str) -> Result<BillSummary, anyhow::Error> {
    let summary = ctx.ledger.summary_for(address);

    println!("📊 Summary for {}", address);
    println!("   Bills:            {}", summary.total_bills);
    println!("   Pending payments: {}", summary.pending_payments);
    println!("   Total owed:       {}", summary.total_owed);
    Ok(summary)
}

/// Show the effective configuration
pub fn config(ctx: &AppContext) -> Result<(), anyhow::Error> {
    println!("⚙️  Current Configuration:");
    println!("{}", serde_json::to_string_pretty(&ctx.config)?);
    println!();
    println!("📍 Bind address: {}", ctx.config.bind_address());
    println!("📁 Bills file:   {}", ctx.config.bills_file().display());
    Ok(())
}

fn print_bill(bill: &Bill) {
    println!("   Title:    {}", bill.title);
    if let Some(description) = &bill.description {
        println!("   Note:     {}", description);
    }
    println!("   Total:    {}", bill.total_amount);
    println!("   Status:   {}", bill.status);
    println!("   Created:  {}", bill.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!(
        "   Creator:  {} (covers {})",
        bill.creator.short(),
        bill.creator_share()
    );
    println!("   Participants ({}):", bill.participants.len());
    for p in &bill.participants {
        let status = match (&p.paid, &p.payment_reference) {
            (true, Some(reference)) => format!("✓ paid ({})", reference),
            (true, None) => "✓ paid".to_string(),
            (false, _) => "⏳ pending".to_string(),
        };
        println!("     - {} [{}] {} {}", p.name, p.address.short(), p.share, status);
    }
}
