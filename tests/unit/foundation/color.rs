use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    assert_eq!(Color::parse("#3B82F6").unwrap(), Color::rgb8(0x3B, 0x82, 0xF6));
    assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);

    let c = Color::parse("#0000ff80").unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);

    assert!(Color::parse("#12345").is_err());
    assert!(Color::parse("#zzzzzz").is_err());
}

#[test]
fn parses_css_rgba_and_keywords() {
    let c = Color::parse("rgba(255,255,255,0.1)").unwrap();
    assert_eq!(c, Color::rgba(1.0, 1.0, 1.0, 0.1));
    assert_eq!(Color::parse("white").unwrap(), Color::WHITE);
    assert_eq!(Color::parse("CYAN").unwrap(), Color::CYAN);
    assert_eq!(Color::parse("transparent").unwrap().a, 0.0);
}

#[test]
fn hex_output_drops_opaque_alpha() {
    assert_eq!(Color::rgb8(0xFF, 0x4E, 0x50).to_hex(), "#FF4E50");
    assert_eq!(Color::rgba8(0, 0, 0, 0).to_hex(), "#00000000");
}

#[test]
fn serde_uses_hex_strings() {
    let c: Color = serde_json::from_value(json!("#F9D423")).unwrap();
    assert_eq!(c, Color::rgb8(0xF9, 0xD4, 0x23));
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#F9D423"));

    let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75])).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 1.0));
}

#[test]
fn scale_alpha_multiplies() {
    let c = Color::rgb8(10, 20, 30).scale_alpha(0.3);
    assert!((c.a - 0.3).abs() < 1e-12);
    assert_eq!(c.with_alpha(1.0), Color::rgb8(10, 20, 30));
}
