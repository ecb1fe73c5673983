#![no_main]

use libfuzzer_sys::fuzz_target;
use ledgerline::{LineItem, Money, Payment};

fuzz_target!(|data: &[u8]| {
    // Deserialization re-runs validation; anything it accepts must be valid.
    if let Ok(money) = serde_json::from_slice::<Money>(data) {
        assert!(money.is_zero() || money.amount().is_sign_positive());
    }
    if let Ok(item) = serde_json::from_slice::<LineItem>(data) {
        assert!(!item.quantity().is_zero() && item.quantity().is_sign_positive());
    }
    if let Ok(payment) = serde_json::from_slice::<Payment>(data) {
        assert!(!payment.amount().is_zero());
    }
});
