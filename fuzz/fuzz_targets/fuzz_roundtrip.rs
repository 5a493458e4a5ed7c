#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmpfx::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let limits = Limits::default().with_max_pixels(1 << 22);
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    for order in [RowOrder::BottomUp, RowOrder::TopDown] {
        let reencoded = decoded
            .encode(order, enough::Unstoppable)
            .expect("decoded image failed to encode");
        let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
            panic!("re-encoded data failed to decode");
        };

        assert_eq!(decoded.pixels().buf(), decoded2.pixels().buf(), "roundtrip pixel mismatch");
        assert_eq!(decoded.histograms(), decoded2.histograms());
        assert_eq!(decoded.width(), decoded2.width());
        assert_eq!(decoded.height(), decoded2.height());
    }
});
