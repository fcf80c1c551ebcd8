#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic, and both entry points must agree.
        assert_eq!(konto::validate_nip(s), konto::Nip::parse(s).is_ok());
    }
});
