//! Export composer - turns a receipt subset into a shareable text block.
//!
//! The output goes to the clipboard and into messaging apps, so it must be
//! byte-for-byte reproducible: identical inputs always compose the exact
//! same string. Receipts are listed oldest first (the inverse of the list
//! views) because that reads better in a message.

use crate::core::filter::effective_date;
use crate::core::receipt::vat_amount;
use crate::entities::{PaymentMethod, profile, receipt};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Which pieces of the export to include.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Include the business-info block at the top
    pub include_business: bool,
    /// Include the business name inside the block
    pub include_business_name: bool,
    /// Include the registration number inside the block
    pub include_business_reg_no: bool,
    /// Include the representative inside the block
    pub include_business_rep: bool,
    /// Include the date on each receipt line
    pub include_date: bool,
    /// Include the amount on each receipt line
    pub include_amount: bool,
    /// Include the payment method on each receipt line
    pub include_payment: bool,
    /// Append the receiver-email line
    pub include_receiver_email: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_business: true,
            include_business_name: true,
            include_business_reg_no: true,
            include_business_rep: true,
            include_date: true,
            include_amount: true,
            include_payment: true,
            include_receiver_email: true,
        }
    }
}

/// Composes the export text for a receipt subset.
///
/// Deterministic and side-effect-free. `account_email` is the signed-in
/// account's email, used when the profile has none.
#[must_use]
pub fn compose(
    receipts: &[receipt::Model],
    profile: Option<&profile::Model>,
    account_email: Option<&str>,
    options: &ExportOptions,
) -> String {
    let mut sorted: Vec<&receipt::Model> = receipts.iter().collect();
    sorted.sort_by_key(|r| effective_date(r));

    // When the set spans calendar years the short MM/DD form is ambiguous,
    // so switch every date to YY-MM-DD.
    let years: HashSet<i32> = sorted.iter().map(|r| effective_date(r).year()).collect();
    let year_mixed = years.len() > 1;

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Receipts: {}", sorted.len()));

    if options.include_business {
        if let Some(profile) = profile {
            if options.include_business_name {
                if let Some(name) = &profile.business_name {
                    lines.push(format!("Business: {name}"));
                }
            }
            if options.include_business_reg_no {
                if let Some(reg_no) = &profile.registration_number {
                    lines.push(format!("Reg. no: {}", format_registration_number(reg_no)));
                }
            }
            if options.include_business_rep {
                if let Some(rep) = &profile.representative {
                    lines.push(format!("Representative: {rep}"));
                }
            }
        }
    }

    // A line with every field disabled would be empty; fall back to all
    // three instead.
    let any_field = options.include_date || options.include_amount || options.include_payment;
    let with_date = options.include_date || !any_field;
    let with_amount = options.include_amount || !any_field;
    let with_payment = options.include_payment || !any_field;

    for receipt in &sorted {
        let mut parts: Vec<String> = Vec::new();
        if with_date {
            parts.push(format_date(effective_date(receipt), year_mixed));
        }
        if with_amount {
            parts.push(format!("{} KRW", format_thousands(receipt.amount)));
        }
        if with_payment {
            parts.push(payment_part(receipt, year_mixed));
        }
        lines.push(format!("- {}", parts.join("  ")));
    }

    let base_total: i64 = sorted.iter().map(|r| r.amount).sum();
    let vat_total: i64 = sorted.iter().map(|r| vat_amount(r.amount, r.tax_type)).sum();

    lines.push(format!("Base total: {} KRW", format_thousands(base_total)));
    if vat_total > 0 {
        lines.push(format!("VAT total: {} KRW", format_thousands(vat_total)));
    }

    if options.include_receiver_email {
        let email = profile
            .and_then(|p| p.email.as_deref())
            .or(account_email)
            .unwrap_or("(no email)");
        lines.push(format!("Send to: {email}"));
    }

    lines.join("\n")
}

fn format_date(date: NaiveDate, year_mixed: bool) -> String {
    if year_mixed {
        date.format("%y-%m-%d").to_string()
    } else {
        date.format("%m/%d").to_string()
    }
}

fn payment_part(receipt: &receipt::Model, year_mixed: bool) -> String {
    match receipt.payment_method {
        PaymentMethod::Cash => "cash".to_string(),
        PaymentMethod::Payable => "credit".to_string(),
        PaymentMethod::Transfer => receipt.deposit_date.map_or_else(
            || "transfer".to_string(),
            |deposited| format!("transfer (deposited {})", format_date(deposited, year_mixed)),
        ),
    }
}

/// Groups digits by thousands: `45000` becomes `45,000`.
fn format_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if amount < 0 { format!("-{out}") } else { out }
}

/// Reformats a business registration number as `XXX-XX-XXXXX`, but only
/// when it contains exactly 10 digits; anything else is passed through.
fn format_registration_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("{}-{}-{}", &digits[..3], &digits[3..5], &digits[5..])
    } else {
        raw.to_string()
    }
}
