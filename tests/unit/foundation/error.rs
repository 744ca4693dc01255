use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SurfaceError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SurfaceError::allocation("x")
            .to_string()
            .contains("allocation error:")
    );
    assert!(
        SurfaceError::unsupported_format("x")
            .to_string()
            .contains("unsupported format:")
    );
    assert!(
        SurfaceError::registry("x")
            .to_string()
            .contains("registry error:")
    );
    assert!(
        SurfaceError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(
        SurfaceError::decode(DecodeStage::HeaderRead, "bad magic").to_string(),
        "decode error (header-read): bad magic"
    );
}

#[test]
fn unsupported_format_counts_as_decode_failure() {
    assert!(SurfaceError::unsupported_format("gif").is_decode());
    assert!(SurfaceError::decode(DecodeStage::Opened, "x").is_decode());
    assert!(!SurfaceError::allocation("x").is_decode());
    assert!(!SurfaceError::registry("x").is_decode());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SurfaceError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
