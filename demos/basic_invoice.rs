use ledgerline::core::*;
use rust_decimal_macros::dec;

fn main() {
    let ids = SequentialIdGenerator::new();

    // Two products for one customer; the first line fixes the currency.
    let mut invoice = InvoiceBuilder::new(ids.next_invoice_id(), "CUST-123")
        .add_line(
            LineItem::from_parts(ids.next_line_item_id(), "PROD-001", dec!(2), "50.00 USD")
                .expect("valid line"),
        )
        .add_line(
            LineItem::from_parts(ids.next_line_item_id(), "PROD-002", dec!(1), "100.00 USD")
                .expect("valid line"),
        )
        .build()
        .expect("invoice should be valid");

    invoice
        .add_line_item(
            LineItem::from_parts(ids.next_line_item_id(), "PROD-003", dec!(1.5), "50.00 USD")
                .expect("valid line"),
        )
        .expect("draft accepts more lines");

    println!("Invoice:  {}", invoice.id());
    println!("Customer: {}", invoice.customer_id());
    println!("---");
    for line in invoice.line_items() {
        println!(
            "  {} x {} @ {} = {}",
            line.quantity(),
            line.product_id(),
            line.unit_price(),
            line.line_total().expect("line total fits")
        );
    }
    println!("---");
    println!("Total:    {}", invoice.total());

    invoice.issue().expect("non-empty draft can be issued");
    println!("Status:   {}", invoice.status());

    let payment = Payment::new(
        ids.next_payment_id(),
        invoice.id().clone(),
        Money::parse("75.00 USD").expect("valid amount"),
        chrono::Utc::now(),
    )
    .expect("valid payment");
    payment.apply_to_invoice(&mut invoice).expect("partial payment");
    println!("Paid:     {} (due {})", invoice.amount_paid(), invoice.balance_due());

    invoice
        .record_payment(&invoice.balance_due())
        .expect("settles the balance");
    println!("Status:   {}", invoice.status());
}
