use ledgerline::core::*;
use rust_decimal_macros::dec;

fn main() {
    let ids = SequentialIdGenerator::new();

    // ── 1. Money parsing ──────────────────────────────────────────────
    println!("=== Money ===");
    for text in ["12.50 USD", "12.50", "-5 USD", "1e3 USD", "10 usd"] {
        match Money::parse(text) {
            Ok(money) => println!("  {text:?} -> {money}"),
            Err(e) => println!("  {text:?} -> {e} ({:?})", e.kind()),
        }
    }

    let usd = Money::new(dec!(10), "USD").unwrap();
    let eur = Money::new(dec!(10), "EUR").unwrap();
    if let Err(e) = usd.add(&eur) {
        println!("  add: {e}");
    }
    if let Err(e) = usd.subtract(&Money::new(dec!(20), "USD").unwrap()) {
        println!("  subtract: {e}");
    }

    // ── 2. Line items ─────────────────────────────────────────────────
    println!("\n=== Line items ===");
    if let Err(e) = LineItem::from_parts(ids.next_line_item_id(), "PROD-1", dec!(0), "1.00 USD") {
        println!("  quantity 0: {e}");
    }
    if let Err(e) = LineItem::from_parts(ids.next_line_item_id(), "", dec!(1), "1.00 USD") {
        println!("  empty product: {e}");
    }

    // ── 3. Invoice lifecycle ──────────────────────────────────────────
    println!("\n=== Invoice ===");
    let mut invoice = Invoice::new(
        ids.next_invoice_id(),
        CustomerId::new("CUST-1").unwrap(),
        CurrencyCode::default(),
    );
    if let Err(e) = invoice.issue() {
        println!("  issue empty: {e}");
    }

    invoice
        .add_line_item(
            LineItem::from_parts(ids.next_line_item_id(), "PROD-1", dec!(1), "40.00 USD").unwrap(),
        )
        .unwrap();
    let conflicting =
        LineItem::from_parts(ids.next_line_item_id(), "PROD-2", dec!(1), "10.00 EUR").unwrap();
    if let Err(e) = invoice.add_line_item(conflicting) {
        println!("  mixed currency: {e}");
    }

    invoice.issue().unwrap();
    let late =
        LineItem::from_parts(ids.next_line_item_id(), "PROD-3", dec!(1), "10.00 USD").unwrap();
    if let Err(e) = invoice.add_line_item(late) {
        println!("  add after issue: {e}");
    }
    if let Err(e) = invoice.record_payment(&Money::parse("50.00 USD").unwrap()) {
        println!("  overpayment: {e}");
    }

    invoice.record_payment(&Money::parse("40.00 USD").unwrap()).unwrap();
    if let Err(e) = invoice.cancel() {
        println!("  cancel paid: {e} ({:?})", e.kind());
    }
    println!("  final: {} / {}", invoice.status(), invoice.amount_paid());
}
