use ledgerline::core::*;
use ledgerline::service::*;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ServiceError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ledgerline=debug")),
        )
        .init();

    let config = InvoicingConfig::from_toml_str(
        r#"
        default_currency = "EUR"
        currency_rule = "iso4217"

        [id_prefixes]
        invoice = "RE-"
        "#,
    )?;
    let service = InvoiceService::with_sequential_ids(InMemoryInvoiceRepository::new(), config);

    let invoice = service.create_invoice(CreateInvoice {
        customer_id: "CUST-123".into(),
        line_items: vec![
            LineItemInput::new("PROD-001", dec!(2), "50.00 EUR"),
            LineItemInput::new("PROD-002", dec!(1), "100.00 EUR"),
        ],
    })?;
    println!("created {} total {}", invoice.id(), invoice.total());

    let invoice = service.add_line_item(AddLineItem {
        invoice_id: invoice.id().clone(),
        line: LineItemInput::new("PROD-003", dec!(1.5), "50.00 EUR"),
    })?;
    println!("total now {}", invoice.total());

    // Rejected: currency differs from the invoice.
    if let Err(e) = service.add_line_item(AddLineItem {
        invoice_id: invoice.id().clone(),
        line: LineItemInput::new("PROD-004", dec!(1), "10.00 USD"),
    }) {
        println!("rejected: {e}");
    }

    service.issue_invoice(invoice.id())?;
    let (invoice, payment) = service.record_payment(RecordPayment {
        invoice_id: invoice.id().clone(),
        amount: "275.00 EUR".into(),
    })?;
    println!("{} applied, invoice is {}", payment.id(), invoice.status());

    for invoice in service.invoices_for_customer("CUST-123")? {
        println!("{} {} {}", invoice.id(), invoice.status(), invoice.total());
    }
    Ok(())
}
