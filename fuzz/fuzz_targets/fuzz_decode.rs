#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmpfx::*;

fuzz_target!(|data: &[u8]| {
    // Decode must never panic
    let _ = probe(data);
    let limits = Limits::default().with_max_pixels(1 << 22);
    let Ok(bitmap) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // Every view of a decoded image must render, and histograms of a
    // non-empty image always lay out
    for view in View::ALL {
        let rendered = bitmap
            .render_view(view, DEFAULT_HISTOGRAM_CANVAS)
            .expect("decoded image failed to render");
        if let Rendered::Image(img) = rendered {
            assert_eq!(img.width() as u32, bitmap.width());
            assert_eq!(img.height() as u32, bitmap.height());
        }
    }
    for c in Channel::ALL {
        assert_eq!(
            bitmap.histograms().total(c),
            u64::from(bitmap.width()) * u64::from(bitmap.height())
        );
    }
});
