#![no_main]
use libfuzzer_sys::fuzz_target;
use querylite::criteria::Criteria;
use querylite::{Value, explain};

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 {
        return;
    }
    let Ok(s) = std::str::from_utf8(data) else { return };
    let Ok(json) = serde_json::from_str::<serde_json::Value>(s) else { return };
    let criteria = Value::from(json);
    let compiled = Criteria::compile(&criteria);
    let records = [
        Value::from(serde_json::json!({"a": 1, "b": 2, "name": "x"})),
        Value::from(serde_json::json!({"a": 10, "b": -5, "name": "y", "nested": {"z": 3}, "tags": ["x", "y"]})),
        Value::from(serde_json::json!({"active": true, "at": "2024-01-05"})),
        Value::Null,
    ];
    for r in &records {
        assert_eq!(compiled.evaluate(r), explain(&criteria, r).unwrap_or(false));
    }
});
