use super::*;
use crate::foundation::core::Color;

#[test]
fn readback_reorders_argb_words_into_rgba_bytes() {
    let mut px = PixelBuffer::zeroed(2, 1).unwrap();
    px.words_mut()[0] = Color::rgb(1, 2, 3).to_premul_argb();
    px.words_mut()[1] = Color::rgba(200, 100, 0, 128).to_premul_argb();

    let frame = FrameRGBA::from_pixels(&px);
    assert_eq!((frame.width, frame.height), (2, 1));
    assert!(frame.premultiplied);
    assert_eq!(&frame.data[..4], &[1, 2, 3, 255]);
    assert_eq!(&frame.data[4..], &[100, 50, 0, 128]);
}

#[test]
fn rgba_image_export_unpremultiplies() {
    let mut px = PixelBuffer::zeroed(1, 1).unwrap();
    px.words_mut()[0] = Color::rgba(200, 100, 0, 128).to_premul_argb();

    let img = FrameRGBA::from_pixels(&px).into_rgba_image().unwrap();
    let p = img.get_pixel(0, 0).0;
    assert_eq!(p[3], 128);
    assert!(p[0].abs_diff(200) <= 1);
    assert!(p[1].abs_diff(100) <= 1);
    assert_eq!(p[2], 0);
}
