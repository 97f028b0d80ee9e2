#![no_main]

use id_object_validator::normalize_location;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = normalize_location(data);
});
