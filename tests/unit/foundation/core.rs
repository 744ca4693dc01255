use super::*;

#[test]
fn region_inside_is_unchanged() {
    let c = Region::new(1, 2, 3, 4).clip(10, 10).unwrap();
    assert_eq!(
        c,
        ClipRect {
            x0: 1,
            y0: 2,
            x1: 4,
            y1: 6
        }
    );
    assert_eq!((c.width(), c.height()), (3, 4));
}

#[test]
fn region_overhang_clamps_to_bounds() {
    let c = Region::new(-5, -5, 30, 30).clip(8, 6).unwrap();
    assert_eq!(
        c,
        ClipRect {
            x0: 0,
            y0: 0,
            x1: 8,
            y1: 6,
        }
    );
}

#[test]
fn region_outside_or_empty_is_none() {
    assert!(Region::new(11, 0, 5, 5).clip(10, 10).is_none());
    assert!(Region::new(0, 10, 5, 5).clip(10, 10).is_none());
    assert!(Region::new(-6, 0, 5, 5).clip(10, 10).is_none());
    assert!(Region::new(2, 2, 0, 3).clip(10, 10).is_none());
    assert!(Region::new(2, 2, -4, 3).clip(10, 10).is_none());
    assert!(Region::new(0, 0, 5, 5).clip(0, 0).is_none());
}

#[test]
fn region_extent_does_not_overflow() {
    let c = Region::new(i32::MAX - 1, 0, i32::MAX, 1).clip(10, 10);
    assert!(c.is_none());
    let c = Region::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX).clip(10, 10);
    assert!(c.is_none());
}

#[test]
fn color_word_roundtrip_for_opaque() {
    let c = Color::rgb(10, 20, 30);
    assert_eq!(c.to_premul_argb(), 0xFF0A_141E);
    assert_eq!(Color::from_premul_argb(c.to_premul_argb()), c);
    assert_eq!(Color::WHITE.to_premul_argb(), 0xFFFF_FFFF);
    assert_eq!(Color::rgba(9, 9, 9, 0).to_premul_argb(), 0);
}

#[test]
fn color_deserializes_with_default_alpha() {
    let c: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 255));
    let r: Region = serde_json::from_str(r#"{"x":1,"y":2,"w":3,"h":4}"#).unwrap();
    assert_eq!(r, Region::new(1, 2, 3, 4));
}
