#![no_main]

use colornoise::NoiseSpec;
use libfuzzer_sys::fuzz_target;

// Keeps accepted specs cheap enough to generate on every input.
const MAX_ELEMENTS: usize = 1 << 14;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(spec) = NoiseSpec::from_json(text) else {
        return;
    };
    let Ok(shape) = spec.validate() else {
        return;
    };
    if shape.len() > MAX_ELEMENTS {
        return;
    }

    let noise = spec.generate().expect("validated spec generates");
    assert_eq!(noise.shape(), shape.dims());

    let json = spec.to_json_pretty().expect("spec serializes");
    let _ = serde_json::from_str::<serde_json::Value>(&json).expect("valid JSON");
});
