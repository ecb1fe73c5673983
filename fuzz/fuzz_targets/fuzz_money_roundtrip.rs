#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parse → format → parse must give back the same money.
        if let Ok(money) = ledgerline::Money::parse(s) {
            let reparsed = ledgerline::Money::parse(&money.format())
                .expect("formatted money must parse");
            assert_eq!(reparsed, money);
        }
    }
});
