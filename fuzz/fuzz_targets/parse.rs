#![no_main]

use libfuzzer_sys::fuzz_target;

// Arbitrary bytes through the recovering parser and the validator.
// Goal: no panics, no matter how malformed the input.
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let document = jsondoc_core::parse(&text, &jsondoc_core::ParseOptions::default());
    let schema = serde_json::json!({
        "type": "object",
        "properties": { "a": { "enum": [1, "x", [true]] } },
        "items": { "anyOf": [{ "type": "string" }, { "minimum": 0 }] }
    });
    let _ = document.validate(&schema);
});
