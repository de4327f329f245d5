#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: bitflow::fuzz::roundtrip::FuzzCase| {
    bitflow::fuzz::roundtrip::harness(data)
});
