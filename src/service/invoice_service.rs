use std::path::Path;

use chrono::Utc;
use tracing::{Span, debug, info, instrument, warn};

use super::commands::{AddLineItem, CreateInvoice, LineItemInput, RecordPayment};
use super::error::ServiceError;
use super::repository::InvoiceRepository;
use crate::core::{
    CustomerId, IdGenerator, Invoice, InvoiceBuilder, InvoiceError, InvoiceId, InvoicingConfig,
    LineItem, LineItemId, Money, Payment, ProductId, SequentialIdGenerator,
};

/// Orchestrates invoice commands: parse, load, mutate, save.
///
/// A rejected command saves nothing, so the stored invoice is always the
/// last state that passed every check.
pub struct InvoiceService<R, G> {
    repository: R,
    ids: G,
    config: InvoicingConfig,
}

impl<R: InvoiceRepository> InvoiceService<R, SequentialIdGenerator> {
    /// Service with sequential ids using the configured prefixes.
    pub fn with_sequential_ids(repository: R, config: InvoicingConfig) -> Self {
        let ids = SequentialIdGenerator::new().with_prefixes(config.id_prefixes.clone());
        Self::new(repository, ids, config)
    }

    /// Load configuration from a TOML file (defaults when it is missing).
    pub fn from_config_file(repository: R, path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let config = InvoicingConfig::load_or_default(path)?;
        Ok(Self::with_sequential_ids(repository, config))
    }
}

impl<R, G> InvoiceService<R, G>
where
    R: InvoiceRepository,
    G: IdGenerator,
{
    pub fn new(repository: R, ids: G, config: InvoicingConfig) -> Self {
        Self {
            repository,
            ids,
            config,
        }
    }

    pub fn config(&self) -> &InvoicingConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a Draft invoice with the given lines and store it.
    #[instrument(skip(self, cmd), fields(customer_id = %cmd.customer_id, invoice_id))]
    pub fn create_invoice(&self, cmd: CreateInvoice) -> Result<Invoice, ServiceError> {
        let result = self.build_invoice(cmd);
        let invoice = match result {
            Ok(invoice) => invoice,
            Err(e) => {
                warn!(error = %e, "create invoice rejected");
                return Err(e.into());
            }
        };

        Span::current().record("invoice_id", invoice.id().as_str());
        let invoice = self.repository.save(invoice)?;
        info!(
            lines = invoice.line_items().len(),
            total = %invoice.total(),
            "invoice created"
        );
        Ok(invoice)
    }

    /// Add a line to a stored Draft invoice.
    #[instrument(skip(self, cmd), fields(invoice_id = %cmd.invoice_id, product_id = %cmd.line.product_id))]
    pub fn add_line_item(&self, cmd: AddLineItem) -> Result<Invoice, ServiceError> {
        let AddLineItem { invoice_id, line } = cmd;
        let invoice = self.update(&invoice_id, |invoice| {
            if invoice.line_items().len() >= self.config.max_line_items {
                return Err(InvoiceError::TooManyLineItems(self.config.max_line_items));
            }
            let item = self.parse_line(&line)?;
            invoice.add_line_item(item)
        })?;
        info!(total = %invoice.total(), "line item added");
        Ok(invoice)
    }

    #[instrument(skip_all, fields(invoice_id = %invoice_id, line_item_id = %line_item_id))]
    pub fn remove_line_item(
        &self,
        invoice_id: &InvoiceId,
        line_item_id: &LineItemId,
    ) -> Result<Invoice, ServiceError> {
        let invoice = self.update(invoice_id, |invoice| {
            invoice.remove_line_item(line_item_id).map(|_| ())
        })?;
        info!(total = %invoice.total(), "line item removed");
        Ok(invoice)
    }

    /// Record a payment given as `"<decimal> <CCY>"` text, dated now.
    #[instrument(skip(self, cmd), fields(invoice_id = %cmd.invoice_id, payment_id))]
    pub fn record_payment(&self, cmd: RecordPayment) -> Result<(Invoice, Payment), ServiceError> {
        let payment = self
            .parse_money(&cmd.amount)
            .and_then(|amount| {
                Payment::new(
                    self.ids.next_payment_id(),
                    cmd.invoice_id.clone(),
                    amount,
                    Utc::now(),
                )
            })
            .inspect_err(|e| warn!(error = %e, amount = %cmd.amount, "payment rejected"))?;

        Span::current().record("payment_id", payment.id().as_str());
        let invoice = self.apply_payment(&payment)?;
        Ok((invoice, payment))
    }

    /// Apply an already constructed payment record to its invoice.
    #[instrument(skip(self, payment), fields(invoice_id = %payment.invoice_id(), payment_id = %payment.id()))]
    pub fn apply_payment(&self, payment: &Payment) -> Result<Invoice, ServiceError> {
        let invoice = self.update(payment.invoice_id(), |invoice| {
            self.config.currency_rule.check(payment.amount().currency())?;
            payment.apply_to_invoice(invoice)
        })?;
        info!(
            amount = %payment.amount(),
            status = %invoice.status(),
            balance_due = %invoice.balance_due(),
            "payment applied"
        );
        Ok(invoice)
    }

    #[instrument(skip_all, fields(invoice_id = %invoice_id))]
    pub fn issue_invoice(&self, invoice_id: &InvoiceId) -> Result<Invoice, ServiceError> {
        let invoice = self.update(invoice_id, Invoice::issue)?;
        info!(total = %invoice.total(), "invoice issued");
        Ok(invoice)
    }

    #[instrument(skip_all, fields(invoice_id = %invoice_id))]
    pub fn cancel_invoice(&self, invoice_id: &InvoiceId) -> Result<Invoice, ServiceError> {
        let invoice = self.update(invoice_id, Invoice::cancel)?;
        info!("invoice cancelled");
        Ok(invoice)
    }

    #[instrument(skip_all, fields(invoice_id = %invoice_id))]
    pub fn get_invoice(&self, invoice_id: &InvoiceId) -> Result<Invoice, ServiceError> {
        let invoice = self.load(invoice_id)?;
        debug!(status = %invoice.status(), "invoice loaded");
        Ok(invoice)
    }

    /// All stored invoices of a customer, ordered by invoice id.
    #[instrument(skip(self))]
    pub fn invoices_for_customer(&self, customer_id: &str) -> Result<Vec<Invoice>, ServiceError> {
        let customer_id = CustomerId::new(customer_id)?;
        let invoices = self.repository.find_by_customer(&customer_id)?;
        debug!(count = invoices.len(), "customer invoices loaded");
        Ok(invoices)
    }

    /// Remove an invoice from storage. Returns whether it existed.
    #[instrument(skip_all, fields(invoice_id = %invoice_id))]
    pub fn delete_invoice(&self, invoice_id: &InvoiceId) -> Result<bool, ServiceError> {
        let removed = self.repository.delete(invoice_id)?;
        if removed {
            info!("invoice deleted");
        } else {
            debug!("nothing to delete");
        }
        Ok(removed)
    }

    fn build_invoice(&self, cmd: CreateInvoice) -> Result<Invoice, InvoiceError> {
        let customer_id = CustomerId::new(cmd.customer_id)?;
        if cmd.line_items.len() > self.config.max_line_items {
            return Err(InvoiceError::TooManyLineItems(self.config.max_line_items));
        }
        let lines = cmd
            .line_items
            .iter()
            .map(|line| self.parse_line(line))
            .collect::<Result<Vec<_>, _>>()?;

        InvoiceBuilder::for_customer(self.ids.next_invoice_id(), customer_id)
            .default_currency(self.config.default_currency.clone())
            .max_line_items(self.config.max_line_items)
            .add_lines(lines)
            .build()
    }

    fn parse_money(&self, text: &str) -> Result<Money, InvoiceError> {
        let money = Money::parse(text)?;
        self.config.currency_rule.check(money.currency())?;
        Ok(money)
    }

    fn parse_line(&self, input: &LineItemInput) -> Result<LineItem, InvoiceError> {
        let product_id = ProductId::new(input.product_id.as_str())?;
        let unit_price = self.parse_money(&input.unit_price)?;
        LineItem::new(
            self.ids.next_line_item_id(),
            product_id,
            input.quantity,
            unit_price,
        )
    }

    fn load(&self, invoice_id: &InvoiceId) -> Result<Invoice, ServiceError> {
        self.repository
            .find_by_id(invoice_id)?
            .ok_or_else(|| ServiceError::InvoiceNotFound(invoice_id.clone()))
    }

    /// Load, apply `change`, and save only if it succeeded.
    fn update<F>(&self, invoice_id: &InvoiceId, change: F) -> Result<Invoice, ServiceError>
    where
        F: FnOnce(&mut Invoice) -> Result<(), InvoiceError>,
    {
        let mut invoice = self.load(invoice_id)?;
        if let Err(e) = change(&mut invoice) {
            warn!(error = %e, status = %invoice.status(), "command rejected");
            return Err(e.into());
        }
        Ok(self.repository.save(invoice)?)
    }
}
