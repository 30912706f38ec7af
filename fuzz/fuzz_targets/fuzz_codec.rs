#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 {
        return;
    }
    let Ok(s) = std::str::from_utf8(data) else { return };
    let q = querylite::decode(s);
    assert_eq!(querylite::decode(&querylite::encode(&q)), q);
});
