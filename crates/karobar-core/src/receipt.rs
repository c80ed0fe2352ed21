//! # Receipt Rendering
//!
//! Pure rendering of a [`CompletedSale`] into a plain-text bill artifact.
//!
//! The layout mirrors the printed bill: store header, bill details,
//! customer block, line rows, summary, notes. Rendering is a pure function
//! of the sale record — callable repeatedly for print, download or export
//! with no side effects on the sale itself.

use std::fmt::Write;

use crate::money::Money;
use crate::pricing::DiscountPolicy;
use crate::types::CompletedSale;

/// Width of the monospace bill in characters.
const BILL_WIDTH: usize = 64;

/// Renders a completed sale as a monospace text bill.
///
/// ## Example
/// ```rust,ignore
/// let text = receipt::render(&sale, "Karobar Traders");
/// printer.spool(&text)?;
/// ```
pub fn render(sale: &CompletedSale, store_name: &str) -> String {
    let mut out = String::new();
    let rule = "-".repeat(BILL_WIDTH);
    let double_rule = "=".repeat(BILL_WIDTH);

    // Header
    let _ = writeln!(out, "{:^width$}", store_name, width = BILL_WIDTH);
    let _ = writeln!(out, "{:^width$}", "BILL / INVOICE", width = BILL_WIDTH);
    let _ = writeln!(out, "{}", double_rule);

    // Bill details
    let _ = writeln!(out, "Bill No : {}", sale.receipt_number);
    let _ = writeln!(out, "Date    : {}", sale.timestamp.format("%d-%m-%Y %H:%M"));
    let _ = writeln!(out, "Payment : {}", sale.payment_method.label());
    let _ = writeln!(out, "{}", rule);

    // Customer block
    let _ = writeln!(out, "Customer: {}", sale.customer_name);
    if !sale.customer_phone.is_empty() {
        let _ = writeln!(out, "Phone   : {}", sale.customer_phone);
    }
    if !sale.customer_address.is_empty() {
        let _ = writeln!(out, "Address : {}", sale.customer_address);
    }
    let _ = writeln!(out, "{}", rule);

    // Line rows
    let _ = writeln!(
        out,
        "{:<26}{:>6} {:>10} {:>9} {:>10}",
        "Item", "Qty", "MRP", "Dividend", "Total"
    );
    for line in &sale.lines {
        let name = if line.item.item_name.chars().count() > 26 {
            let mut short: String = line.item.item_name.chars().take(25).collect();
            short.push('~');
            short
        } else {
            line.item.item_name.clone()
        };
        // Same column grid as the header row above.
        let qty = format!("{} {}", line.quantity, line.item.base_unit);
        let _ = writeln!(
            out,
            "{:<26}{:>6} {:>10} {:>9} {:>10}",
            name,
            qty,
            line.unit_price().to_string(),
            dividend_label(line.discount),
            line.line_total().to_string(),
        );
    }
    let _ = writeln!(out, "{}", rule);

    // Summary
    let _ = writeln!(
        out,
        "{:>52} {}",
        "Subtotal:",
        Money::from_paise(sale.subtotal_paise)
    );
    let _ = writeln!(
        out,
        "{:>52} {}",
        "Discount:",
        Money::from_paise(sale.total_discount_paise)
    );
    if sale.total_tax_paise > 0 {
        let _ = writeln!(
            out,
            "{:>52} {}",
            "Tax:",
            Money::from_paise(sale.total_tax_paise)
        );
    }
    let _ = writeln!(out, "{:>52} {}", "GRAND TOTAL:", sale.grand_total());

    // Notes
    if !sale.notes.is_empty() {
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Notes: {}", sale.notes);
    }

    let _ = writeln!(out, "{}", double_rule);
    let _ = writeln!(out, "{:^width$}", "Thank you, visit again!", width = BILL_WIDTH);
    out
}

/// Short dividend label for the bill row.
fn dividend_label(discount: DiscountPolicy) -> String {
    match discount {
        DiscountPolicy::None => "-".to_string(),
        DiscountPolicy::Percentage(bps) => {
            if bps % 100 == 0 {
                format!("{}%", bps / 100)
            } else {
                format!("{:.2}%", bps as f64 / 100.0)
            }
        }
        DiscountPolicy::Divisor(d) => format!("/{}", d),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
