#![no_main]

use id_object_validator::path::PathExpression;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to determine the split point between query and JSON value.
    let split = data[0] as usize % data.len().max(1);
    let (query_bytes, value_bytes) = data.split_at(split.min(data.len()));

    let query = String::from_utf8_lossy(query_bytes);

    let Ok(path) = PathExpression::parse(&query) else {
        return;
    };
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(value_bytes) {
        let values = path.resolve_values(&value);
        let paths = path.resolve_paths(&value);
        assert_eq!(values.len(), paths.len());
    }
});
