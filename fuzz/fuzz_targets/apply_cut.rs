#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    papercut::arbitrary::arbtests::apply_any_cut(&mut Unstructured::new(data)).unwrap();
});
