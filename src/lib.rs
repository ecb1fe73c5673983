//! # ledgerline
//!
//! Invoicing core: invoices built from line items, exact decimal money and
//! payments, with the `Draft → Issued → Paid` lifecycle (plus `Cancelled`).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! An invoice holds a single currency, fixed by its first line item, and its
//! total is always the sum of its line totals.
//!
//! ## Quick Start
//!
//! ```rust
//! use ledgerline::core::*;
//! use rust_decimal_macros::dec;
//!
//! let ids = SequentialIdGenerator::new();
//! let mut invoice = Invoice::new(
//!     ids.next_invoice_id(),
//!     CustomerId::new("CUST-123").unwrap(),
//!     CurrencyCode::default(),
//! );
//! invoice
//!     .add_line_item(LineItem::from_parts(ids.next_line_item_id(), "PROD-001", dec!(2), "50.00 USD").unwrap())
//!     .unwrap();
//! invoice.issue().unwrap();
//!
//! invoice.record_payment(&"100.00 USD".parse().unwrap()).unwrap();
//! assert_eq!(invoice.status(), InvoiceStatus::Paid);
//! assert!(invoice.is_fully_paid());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Money, line items, invoice aggregate, payments, ids, config |
//! | `service` | Commands, repository capability, `InvoiceService` with `tracing` |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "service")]
pub mod service;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
