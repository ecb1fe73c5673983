//! Invoice core: money, line items, the invoice aggregate and payments.
//!
//! Everything here is synchronous and side-effect free apart from mutating
//! the invoice it is called on. Nothing in this module logs.

mod builder;
mod config;
mod currencies;
mod error;
mod ids;
mod invoice;
mod line_item;
mod money;
mod numbering;
mod payment;

pub use builder::*;
pub use config::*;
pub use currencies::*;
pub use error::*;
pub use ids::*;
pub use invoice::*;
pub use line_item::*;
pub use money::*;
pub use numbering::*;
pub use payment::*;
