#![no_main]

use covcompare::artifacts::CoverageDocument;
use covcompare::coverage::extract_branches;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Arbitrary JSON either fails to parse or yields extractable branches
        if let Ok(document) = CoverageDocument::from_json_str(input) {
            let _ = extract_branches(&document);
        }
    }
});
