//! Edge cases around money parsing, rounding and the invoice lifecycle.

use chrono::{Duration, TimeZone, Utc};
use ledgerline::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn draft() -> Invoice {
    Invoice::new(
        InvoiceId::new("INV-0001"),
        CustomerId::new("CUST-1").unwrap(),
        CurrencyCode::default(),
    )
}

fn item(id: &str, quantity: Decimal, price: &str) -> LineItem {
    LineItem::from_parts(LineItemId::new(id), "PROD-1", quantity, price).unwrap()
}

fn money(text: &str) -> Money {
    Money::parse(text).unwrap()
}

// ---------------------------------------------------------------------------
// Money parsing
// ---------------------------------------------------------------------------

#[test]
fn parse_requires_exactly_two_tokens() {
    for text in ["", "USD", "100.00", "100.00 USD extra", "USD 100.00"] {
        assert!(
            matches!(Money::parse(text), Err(InvoiceError::InvalidFormat(_))),
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn parse_tolerates_surrounding_whitespace() {
    assert_eq!(money("  12.5\tUSD \n"), Money::new(dec!(12.5), "USD").unwrap());
}

#[test]
fn parse_rejects_non_decimal_notation() {
    for text in ["1e3 USD", "NaN USD", "inf USD", "1_000 USD", "1,000.00 USD", "0x10 USD"] {
        assert!(
            matches!(Money::parse(text), Err(InvoiceError::InvalidFormat(_))),
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn parse_reports_currency_and_sign_problems_precisely() {
    assert_eq!(
        Money::parse("1.00 usd"),
        Err(InvoiceError::InvalidCurrency("usd".into()))
    );
    assert_eq!(
        Money::parse("1.00 US"),
        Err(InvoiceError::InvalidCurrency("US".into()))
    );
    assert!(matches!(
        Money::parse("-0.01 USD"),
        Err(InvoiceError::InvalidAmount { .. })
    ));
}

#[test]
fn negative_zero_is_zero() {
    let zero = money("-0.00 USD");
    assert!(zero.is_zero());
    assert_eq!(zero, Money::zero(CurrencyCode::default()));
    assert_eq!(zero.format(), "0.00 USD");
}

// ---------------------------------------------------------------------------
// Precision and rounding
// ---------------------------------------------------------------------------

#[test]
fn equality_is_by_value() {
    assert_eq!(money("100 USD"), money("100.00 USD"));
    assert_ne!(money("100.00 USD"), money("100.00 EUR"));
    assert_ne!(money("0.1 USD"), money("0.11 USD"));
    assert_eq!(money("0.1 USD"), money("0.10000001 USD"));
}

#[test]
fn format_rounds_half_up_to_two_places() {
    assert_eq!(money("1.005 USD").format(), "1.01 USD");
    assert_eq!(money("1.004 USD").format(), "1.00 USD");
    assert_eq!(money("2.5 USD").format(), "2.50 USD");
    assert_eq!(money("7 USD").format(), "7.00 USD");
}

#[test]
fn amounts_are_held_in_cents() {
    let price = money("0.333 USD");
    assert_eq!(price.amount(), dec!(0.33));
    let total = price.multiply(dec!(3)).unwrap();
    assert_eq!(total.amount(), dec!(0.99));
    assert_eq!(total.format(), "0.99 USD");
}

#[test]
fn displayed_total_settles_the_invoice() {
    let mut inv = draft();
    inv.add_line_item(item("LI-1", dec!(1.5), "0.33 USD")).unwrap();
    assert_eq!(inv.total().format(), "0.50 USD");

    let shown = money(&inv.balance_due().format());
    inv.record_payment(&shown).unwrap();
    assert_eq!(inv.status(), InvoiceStatus::Paid);
    assert!(inv.balance_due().is_zero());
}

#[test]
fn decimal_addition_is_exact() {
    let sum = money("0.1 USD").add(&money("0.2 USD")).unwrap();
    assert_eq!(sum, money("0.3 USD"));
}

#[test]
fn multiply_by_zero_and_negative_factor() {
    assert!(money("9.99 USD").multiply(Decimal::ZERO).unwrap().is_zero());
    assert_eq!(
        money("9.99 USD").multiply(dec!(-1)),
        Err(InvoiceError::InvalidFactor(dec!(-1)))
    );
}

#[test]
fn overflow_is_reported() {
    let huge = Money::new(MAX_AMOUNT, "USD").unwrap();
    assert!(matches!(huge.add(&huge), Err(InvoiceError::Overflow(_))));
    assert!(matches!(huge.multiply(dec!(2)), Err(InvoiceError::Overflow(_))));
    assert!(matches!(
        Money::new(Decimal::MAX, "USD"),
        Err(InvoiceError::InvalidAmount { .. })
    ));
}

#[test]
fn largest_amount_formats_with_two_places() {
    let text = "792281625142643375935439503.35 USD";
    assert_eq!(money(text).format(), text);
    assert!(matches!(
        Money::parse("7922816251426433759354395033 USD"),
        Err(InvoiceError::InvalidAmount { .. })
    ));
}

// ---------------------------------------------------------------------------
// Invoice edge cases
// ---------------------------------------------------------------------------

#[test]
fn empty_invoice_uses_default_currency() {
    let inv = Invoice::new(
        InvoiceId::new("INV-1"),
        CustomerId::new("CUST-1").unwrap(),
        CurrencyCode::new("JPY").unwrap(),
    );
    assert_eq!(inv.total().format(), "0.00 JPY");
    assert!(!inv.has_fixed_currency());
}

#[test]
fn first_line_item_fixes_currency() {
    let mut inv = draft();
    inv.add_line_item(item("LI-1", dec!(1), "10.00 EUR")).unwrap();
    assert_eq!(inv.currency(), "EUR");
    assert_eq!(inv.amount_paid().format(), "0.00 EUR");
    assert!(inv.has_fixed_currency());
}

#[test]
fn removing_last_item_keeps_established_currency() {
    let mut inv = draft();
    inv.add_line_item(item("LI-1", dec!(1), "10.00 EUR")).unwrap();
    inv.remove_line_item(&LineItemId::new("LI-1")).unwrap();

    assert_eq!(inv.total().format(), "0.00 EUR");
    assert_eq!(inv.status(), InvoiceStatus::Draft);

    let err = inv
        .add_line_item(item("LI-2", dec!(1), "10.00 USD"))
        .unwrap_err();
    assert!(matches!(err, InvoiceError::CurrencyConflict { .. }));
}

#[test]
fn duplicate_line_item_id() {
    let mut inv = draft();
    inv.add_line_item(item("LI-1", dec!(1), "10.00 USD")).unwrap();
    assert_eq!(
        inv.add_line_item(item("LI-1", dec!(2), "5.00 USD")),
        Err(InvoiceError::DuplicateLineItem(LineItemId::new("LI-1")))
    );
    assert_eq!(inv.line_items().len(), 1);
}

#[test]
fn fractional_quantity() {
    let mut inv = draft();
    inv.add_line_item(item("LI-1", dec!(0.25), "19.99 USD")).unwrap();
    assert_eq!(inv.total().amount(), dec!(5.00));
    assert_eq!(inv.total().format(), "5.00 USD");
}

#[test]
fn empty_invoice_cannot_be_issued() {
    let mut inv = draft();
    assert_eq!(inv.issue(), Err(InvoiceError::EmptyInvoice));
    assert_eq!(inv.status(), InvoiceStatus::Draft);
}

#[test]
fn free_invoice_is_paid_on_issue() {
    let mut inv = draft();
    inv.add_line_item(item("LI-1", dec!(2), "0.00 USD")).unwrap();
    inv.add_line_item(item("LI-2", dec!(0.5), "0.001 USD")).unwrap();
    assert!(inv.total().is_zero());

    inv.issue().unwrap();
    assert_eq!(inv.status(), InvoiceStatus::Paid);
    assert!(inv.status().is_terminal());
    assert!(matches!(
        inv.record_payment(&money("0.01 USD")),
        Err(InvoiceError::PaymentExceedsBalance { .. })
    ));
}

#[test]
fn empty_invoice_counts_as_fully_paid() {
    let inv = draft();
    assert!(inv.is_fully_paid());
    assert_eq!(inv.status(), InvoiceStatus::Draft);
}

#[test]
fn payment_on_empty_invoice_exceeds_balance() {
    let mut inv = draft();
    assert!(matches!(
        inv.record_payment(&money("0.01 USD")),
        Err(InvoiceError::PaymentExceedsBalance { .. })
    ));
}

#[test]
fn payment_currency_and_zero_amount() {
    let mut inv = draft();
    inv.add_line_item(item("LI-1", dec!(1), "10.00 USD")).unwrap();

    assert!(matches!(
        inv.record_payment(&money("5.00 EUR")),
        Err(InvoiceError::CurrencyMismatch { .. })
    ));
    assert!(matches!(
        inv.record_payment(&money("0 USD")),
        Err(InvoiceError::InvalidAmount { .. })
    ));
    assert!(inv.amount_paid().is_zero());
    assert_eq!(inv.status(), InvoiceStatus::Draft);
}

#[test]
fn paid_invoice_cannot_be_cancelled() {
    let mut inv = draft();
    inv.add_line_item(item("LI-1", dec!(1), "10.00 USD")).unwrap();
    inv.record_payment(&money("10.00 USD")).unwrap();

    assert_eq!(
        inv.cancel(),
        Err(InvoiceError::InvalidTransition {
            from: InvoiceStatus::Paid,
            to: InvoiceStatus::Cancelled,
        })
    );
    assert!(InvoiceStatus::Paid.is_terminal());
}

#[test]
fn draft_can_be_cancelled() {
    let mut inv = draft();
    inv.cancel().unwrap();
    assert_eq!(inv.status(), InvoiceStatus::Cancelled);
    assert_eq!(
        inv.add_line_item(item("LI-1", dec!(1), "1.00 USD")),
        Err(InvoiceError::NotDraft(InvoiceStatus::Cancelled))
    );
}

#[test]
fn error_kinds() {
    assert_eq!(InvoiceError::InvalidQuantity(dec!(0)).kind(), ErrorKind::Validation);
    assert_eq!(InvoiceError::EmptyInvoice.kind(), ErrorKind::State);
    assert_eq!(InvoiceError::InvoiceCancelled.kind(), ErrorKind::State);
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[test]
fn future_dated_payment_is_rejected() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let tomorrow = now + Duration::days(1);
    assert_eq!(
        Payment::new_as_of(
            PaymentId::new("PAY-1"),
            InvoiceId::new("INV-1"),
            money("1.00 USD"),
            tomorrow,
            now,
        ),
        Err(InvoiceError::PaymentDateInFuture(tomorrow))
    );

    let payment = Payment::new_as_of(
        PaymentId::new("PAY-1"),
        InvoiceId::new("INV-1"),
        money("1.00 USD"),
        now,
        now,
    )
    .unwrap();
    assert_eq!(payment.date(), now);
}

#[test]
fn zero_payment_record_is_rejected() {
    assert!(matches!(
        Payment::new(
            PaymentId::new("PAY-1"),
            InvoiceId::new("INV-1"),
            money("0.00 USD"),
            Utc::now(),
        ),
        Err(InvoiceError::InvalidAmount { .. })
    ));
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[test]
fn deserialization_revalidates() {
    assert!(serde_json::from_str::<Money>(r#"{"amount":"-1","currency":"USD"}"#).is_err());
    assert!(serde_json::from_str::<Money>(r#"{"amount":"1","currency":"usd"}"#).is_err());

    let line = r#"{"id":"LI-1","product_id":"P","quantity":"0","unit_price":{"amount":"1","currency":"USD"}}"#;
    assert!(serde_json::from_str::<LineItem>(line).is_err());

    let payment = r#"{"id":"PAY-1","invoice_id":"INV-1","amount":{"amount":"0","currency":"USD"},"date":"2024-06-15T12:00:00Z"}"#;
    assert!(serde_json::from_str::<Payment>(payment).is_err());
}

#[test]
fn payment_json_round_trip() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let payment = Payment::new_as_of(
        PaymentId::new("PAY-1"),
        InvoiceId::new("INV-1"),
        money("12.50 USD"),
        now,
        now,
    )
    .unwrap();
    let json = serde_json::to_string(&payment).unwrap();
    let back: Payment = serde_json::from_str(&json).unwrap();
    assert_eq!(back, payment);
}
