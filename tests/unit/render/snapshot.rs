use super::*;
use crate::foundation::core::Color;

#[test]
fn present_captures_current_pixels() {
    let backend = SnapshotBackend::default();
    let mut px = PixelBuffer::zeroed(2, 2).unwrap();
    let mut ctx = backend.create(&px).unwrap();
    assert!(backend.last_frame().is_none());

    px.words_mut()[3] = Color::rgb(9, 8, 7).to_premul_argb();
    backend.present(&mut ctx, &px).unwrap();

    let frame = backend.last_frame().unwrap();
    assert_eq!((frame.width, frame.height), (2, 2));
    assert_eq!(&frame.data[12..16], &[9, 8, 7, 255]);
    assert_eq!(&frame.data[..4], &[0, 0, 0, 0]);

    assert!(backend.take_frame().is_some());
    assert!(backend.last_frame().is_none());
    backend.destroy(ctx);
}

#[test]
fn present_rejects_mismatched_geometry() {
    let backend = SnapshotBackend::default();
    let small = PixelBuffer::zeroed(2, 2).unwrap();
    let large = PixelBuffer::zeroed(5, 3).unwrap();
    let mut ctx = backend.create(&small).unwrap();

    let err = backend.present(&mut ctx, &large).unwrap_err();
    assert!(err.to_string().contains("5x3 buffer on a 2x2 context"), "{err}");
    assert!(backend.last_frame().is_none());
    backend.destroy(ctx);
}
