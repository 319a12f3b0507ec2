#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    papercut::arbitrary::arbtests::drag_around(&mut Unstructured::new(data)).unwrap();
});
