#![no_main]

use covcompare::artifacts::{normalize_fault_line, parse_unique_faults};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing never panics and every signature is already normalized
        for signature in parse_unique_faults(input) {
            assert_eq!(normalize_fault_line(&signature), signature);
        }
    }
});
