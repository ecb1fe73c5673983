use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::error::RepositoryError;
use crate::core::{CustomerId, Invoice, InvoiceId};

/// Storage capability for invoices.
///
/// `save` is idempotent by id (last write wins) and `find_by_id` returns
/// the most recently saved state. Implementations give no cross-call
/// isolation; see the module docs on serializing writers.
pub trait InvoiceRepository: Send + Sync {
    fn save(&self, invoice: Invoice) -> Result<Invoice, RepositoryError>;
    fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError>;
    fn find_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Invoice>, RepositoryError>;
    /// Returns whether an invoice was removed.
    fn delete(&self, id: &InvoiceId) -> Result<bool, RepositoryError>;
}

impl<R> InvoiceRepository for Arc<R>
where
    R: InvoiceRepository + ?Sized,
{
    fn save(&self, invoice: Invoice) -> Result<Invoice, RepositoryError> {
        (**self).save(invoice)
    }

    fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        (**self).find_by_id(id)
    }

    fn find_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Invoice>, RepositoryError> {
        (**self).find_by_customer(customer_id)
    }

    fn delete(&self, id: &InvoiceId) -> Result<bool, RepositoryError> {
        (**self).delete(id)
    }
}

/// In-memory invoice store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceRepository {
    inner: RwLock<HashMap<InvoiceId, Invoice>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("in-memory store lock poisoned".into())
}

impl InvoiceRepository for InMemoryInvoiceRepository {
    fn save(&self, invoice: Invoice) -> Result<Invoice, RepositoryError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(invoice.id().clone(), invoice.clone());
        Ok(invoice)
    }

    fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(id).cloned())
    }

    /// Invoices for the customer, ordered by invoice id.
    fn find_by_customer(&self, customer_id: &CustomerId) -> Result<Vec<Invoice>, RepositoryError> {
        let map = self.inner.read().map_err(poisoned)?;
        let mut invoices: Vec<Invoice> = map
            .values()
            .filter(|invoice| invoice.customer_id() == customer_id)
            .cloned()
            .collect();
        invoices.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(invoices)
    }

    fn delete(&self, id: &InvoiceId) -> Result<bool, RepositoryError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(id).is_some())
    }
}
