use super::*;

#[test]
fn premul_channel_matches_rounded_division() {
    for a in 0..=255u16 {
        for c in 0..=255u16 {
            let expected = ((a * c) as f64 / 255.0).round() as u8;
            assert_eq!(premul_channel(a as u8, c as u8), expected, "a={a} c={c}");
        }
    }
}

#[test]
fn opaque_alpha_keeps_channels() {
    for c in 0..=255u8 {
        assert_eq!(premul_channel(255, c), c);
    }
    assert_eq!(pack_premul_argb(12, 34, 56, 255), pack_opaque_argb(12, 34, 56));
    assert_eq!(pack_premul_argb(255, 255, 255, 255), OPAQUE_WHITE_ARGB);
}

#[test]
fn zero_alpha_packs_to_zero_word() {
    assert_eq!(pack_premul_argb(255, 128, 7, 0), TRANSPARENT_ARGB);
    assert_eq!(unpack_premul_argb(0x00FF_FFFF), [0, 0, 0, 0]);
}

#[test]
fn pack_layout_is_argb() {
    let v = pack_premul_argb(200, 100, 50, 128);
    assert_eq!(v >> 24, 128);
    assert_eq!((v >> 16) & 0xFF, u32::from(premul_channel(128, 200)));
    assert_eq!((v >> 8) & 0xFF, u32::from(premul_channel(128, 100)));
    assert_eq!(v & 0xFF, u32::from(premul_channel(128, 50)));
    assert_eq!(split_argb(v)[3], 128);
}

#[test]
fn unpack_inverts_pack_within_rounding() {
    for a in [1u8, 2, 17, 64, 128, 200, 254, 255] {
        for c in [0u8, 1, 63, 127, 128, 200, 255] {
            let [r, _, _, aa] = unpack_premul_argb(pack_premul_argb(c, c, c, a));
            assert_eq!(aa, a);
            let tol = 255 / (2 * u16::from(a)) + 1;
            assert!(
                (i16::from(r) - i16::from(c)).unsigned_abs() <= tol,
                "a={a} c={c} r={r}"
            );
        }
    }
}
