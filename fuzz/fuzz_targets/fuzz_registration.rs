#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Malformed input is an error, never a panic.
        let _ = serde_json::from_str::<konto::RegistrationForm>(s);
    }
});
