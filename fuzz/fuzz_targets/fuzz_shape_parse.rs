#![no_main]

use colornoise::Shape;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(shape) = text.parse::<Shape>() {
            // Anything accepted must survive its own Display form.
            let again: Shape = shape.to_string().parse().expect("display form parses");
            assert_eq!(again, shape);
            assert!(shape.samples() >= colornoise::shape::MIN_SAMPLES);
        }
    }
});
