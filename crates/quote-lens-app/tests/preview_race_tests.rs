//! Integration tests for the preview decode race guard.

use quote_lens_core::QuoteImage;
use quote_lens_preview::PreviewThumbnail;
use quote_lens_ui::{PageController, PageEffect, PageEvent};

fn thumbnail() -> PreviewThumbnail {
    PreviewThumbnail {
        width: 2,
        height: 2,
        rgba: vec![0; 16],
    }
}

fn decode_seq(effects: &[PageEffect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            PageEffect::DecodePreview { seq, .. } => Some(*seq),
            _ => None,
        })
        .expect("image selection should plan a decode")
}

#[test]
fn preview_race_tests_slow_decode_of_replaced_file_is_discarded() {
    let mut controller = PageController::new();

    let first = controller.handle_event(PageEvent::FileSelected(Some(QuoteImage::new(
        "first.png",
        "image/png",
        vec![1],
    ))));
    let stale_seq = decode_seq(&first);

    let second = controller.handle_event(PageEvent::FileSelected(Some(QuoteImage::new(
        "second.png",
        "image/png",
        vec![2],
    ))));
    let live_seq = decode_seq(&second);

    // The fast decode of the newer file lands first.
    let effects = controller.handle_event(PageEvent::PreviewDecoded {
        seq: live_seq,
        thumbnail: thumbnail(),
        caption: "second.png".to_string(),
    });
    assert!(matches!(effects[0], PageEffect::ShowPreview(_)));

    // The slow decode of the replaced file must not overwrite it.
    let effects = controller.handle_event(PageEvent::PreviewDecoded {
        seq: stale_seq,
        thumbnail: thumbnail(),
        caption: "first.png".to_string(),
    });
    assert!(effects.is_empty());
}

#[test]
fn preview_race_tests_selection_always_clears_previous_preview() {
    let mut controller = PageController::new();

    let effects = controller.handle_event(PageEvent::FileSelected(Some(QuoteImage::new(
        "quote.pdf",
        "application/pdf",
        vec![1],
    ))));
    assert_eq!(effects[0], PageEffect::ClearPreview);

    let effects = controller.handle_event(PageEvent::FileSelected(None));
    assert_eq!(effects, vec![PageEffect::ClearPreview]);
}

#[test]
fn preview_race_tests_non_image_preview_is_synchronous() {
    let mut controller = PageController::new();

    let effects = controller.handle_event(PageEvent::FileSelected(Some(QuoteImage::new(
        "quote.pdf",
        "application/pdf",
        vec![1],
    ))));
    assert!(effects.iter().any(|effect| matches!(
        effect,
        PageEffect::ShowPreview(quote_lens_preview::PreviewContent::Caption(caption))
            if caption == "Selected: quote.pdf"
    )));
    assert!(
        !effects
            .iter()
            .any(|effect| matches!(effect, PageEffect::DecodePreview { .. }))
    );
}
