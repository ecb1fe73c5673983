//! Application layer: commands, the repository capability and
//! [`InvoiceService`].
//!
//! The service parses user-facing input (money as `"100.00 USD"` text),
//! assigns identifiers, delegates to the [`Invoice`](crate::core::Invoice)
//! aggregate and persists the result. It is the only layer that logs.
//!
//! # Example
//!
//! ```
//! use ledgerline::core::*;
//! use ledgerline::service::*;
//! use rust_decimal_macros::dec;
//!
//! let service = InvoiceService::new(
//!     InMemoryInvoiceRepository::new(),
//!     SequentialIdGenerator::new(),
//!     InvoicingConfig::default(),
//! );
//!
//! let invoice = service
//!     .create_invoice(CreateInvoice {
//!         customer_id: "CUST-123".into(),
//!         line_items: vec![LineItemInput::new("PROD-001", dec!(2), "50.00 USD")],
//!     })
//!     .unwrap();
//!
//! assert_eq!(invoice.total().to_string(), "100.00 USD");
//! ```
//!
//! Writers to the same invoice must be serialized by the caller: the
//! service loads, mutates and saves without locking across those steps.

mod commands;
mod error;
mod invoice_service;
mod repository;

pub use commands::{AddLineItem, CreateInvoice, LineItemInput, RecordPayment};
pub use error::{RepositoryError, ServiceError};
pub use invoice_service::InvoiceService;
pub use repository::{InMemoryInvoiceRepository, InvoiceRepository};
