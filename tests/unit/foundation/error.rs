use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CircleFxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CircleFxError::render("x").to_string().contains("render error:"));
    assert!(CircleFxError::media("x").to_string().contains("media error:"));
    assert!(CircleFxError::encode("x").to_string().contains("encode error:"));
    assert!(
        CircleFxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CircleFxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn cancelled_is_detectable() {
    assert!(CircleFxError::Cancelled.is_cancelled());
    assert!(!CircleFxError::media("x").is_cancelled());
}
