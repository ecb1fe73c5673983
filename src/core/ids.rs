//! Strongly-typed identifiers.
//!
//! All ids are opaque strings. Aggregate-owned ids (invoice, line item,
//! payment) come from an [`IdGenerator`](super::IdGenerator); customer and
//! product references come from outside and only have to be non-blank.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::InvoiceError;

macro_rules! impl_string_id {
    ($t:ident) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

/// Identifier of an invoice, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

/// Identifier of a line item, unique within its invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

/// Identifier of a recorded payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

/// Reference to the billed customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

/// Reference to the invoiced product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl_string_id!(InvoiceId);
impl_string_id!(LineItemId);
impl_string_id!(PaymentId);
impl_string_id!(CustomerId);
impl_string_id!(ProductId);

impl InvoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl LineItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl PaymentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl CustomerId {
    /// Fails with [`InvoiceError::InvalidCustomerReference`] on blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, InvoiceError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(InvoiceError::InvalidCustomerReference);
        }
        Ok(Self(id))
    }
}

impl ProductId {
    /// Fails with [`InvoiceError::InvalidProductReference`] on blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, InvoiceError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(InvoiceError::InvalidProductReference);
        }
        Ok(Self(id))
    }
}

impl TryFrom<String> for CustomerId {
    type Error = InvoiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ProductId {
    type Error = InvoiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
