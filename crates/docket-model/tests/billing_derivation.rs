// SPDX-License-Identifier: Apache-2.0

use bson::oid::ObjectId;
use docket_model::{round_money, Invoice, InvoiceItem, InvoiceStatus, TimeEntry};

fn draft_invoice(items: Vec<InvoiceItem>, tax_rate: f64) -> Invoice {
    Invoice {
        client: ObjectId::new(),
        case: None,
        issued_by: ObjectId::new(),
        items,
        tax_rate,
        subtotal: 0.0,
        tax_amount: 0.0,
        total: 0.0,
        status: InvoiceStatus::default(),
        due_date: None,
        currency: "INR".to_string(),
        gst_number: None,
    }
}

fn item(quantity: f64, rate: f64) -> InvoiceItem {
    InvoiceItem {
        description: "svc".to_string(),
        quantity,
        rate,
        total: 0.0,
    }
}

#[test]
fn invoice_totals_follow_quantity_rate_and_tax() {
    let mut invoice = draft_invoice(vec![item(2.0, 500.0)], 18.0);
    invoice.recompute_totals();
    assert_eq!(invoice.subtotal, 1000.0);
    assert_eq!(invoice.tax_amount, 180.0);
    assert_eq!(invoice.total, 1180.0);
    assert_eq!(invoice.items[0].total, 1000.0);
}

#[test]
fn invoice_totals_sum_across_items() {
    let mut invoice = draft_invoice(vec![item(1.0, 100.0), item(3.0, 40.5), item(0.5, 99.0)], 0.0);
    invoice.recompute_totals();
    assert_eq!(invoice.items[1].total, 121.5);
    assert_eq!(invoice.items[2].total, 49.5);
    assert_eq!(invoice.subtotal, 271.0);
    assert_eq!(invoice.tax_amount, 0.0);
    assert_eq!(invoice.total, 271.0);
}

#[test]
fn invoice_derivation_overrides_caller_supplied_values() {
    let mut invoice = draft_invoice(
        vec![InvoiceItem {
            description: "svc".to_string(),
            quantity: 2.0,
            rate: 500.0,
            total: 7.0,
        }],
        18.0,
    );
    invoice.subtotal = 1.0;
    invoice.tax_amount = 2.0;
    invoice.total = 3.0;
    invoice.recompute_totals();
    assert_eq!(invoice.items[0].total, 1000.0);
    assert_eq!(invoice.subtotal, 1000.0);
    assert_eq!(invoice.tax_amount, 180.0);
    assert_eq!(invoice.total, 1180.0);
}

#[test]
fn invoice_with_no_items_derives_zeroes() {
    let mut invoice = draft_invoice(Vec::new(), 18.0);
    invoice.subtotal = 50.0;
    invoice.recompute_totals();
    assert_eq!(invoice.subtotal, 0.0);
    assert_eq!(invoice.tax_amount, 0.0);
    assert_eq!(invoice.total, 0.0);
}

#[test]
fn fractional_rates_round_to_two_decimals() {
    let mut invoice = draft_invoice(vec![item(3.0, 33.333)], 10.0);
    invoice.recompute_totals();
    assert_eq!(invoice.items[0].total, 100.0);
    assert_eq!(invoice.subtotal, 100.0);
    assert_eq!(invoice.tax_amount, 10.0);
    assert_eq!(invoice.total, 110.0);
}

#[test]
fn time_entry_amount_is_hours_times_rate() {
    let mut entry = TimeEntry {
        case: ObjectId::new(),
        client: None,
        user: ObjectId::new(),
        description: "drafting".to_string(),
        rate: 500.0,
        hours: 2.25,
        billable: true,
        billed: false,
        started_at: None,
        ended_at: None,
        total_amount: 0.0,
    };
    entry.recompute_amount();
    assert_eq!(entry.total_amount, 1125.0);

    entry.hours = 0.333;
    entry.recompute_amount();
    assert_eq!(entry.total_amount, round_money(0.333 * 500.0));
    assert_eq!(entry.total_amount, 166.5);
}
