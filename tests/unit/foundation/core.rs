use super::*;

#[test]
fn shape_defaults_to_circle() {
    assert_eq!(FrameShape::default(), FrameShape::Circle);
}

#[test]
fn shape_parses_and_serializes_lowercase() {
    assert_eq!("Square".parse::<FrameShape>().unwrap(), FrameShape::Square);
    assert!("hexagon".parse::<FrameShape>().is_err());
    assert_eq!(
        serde_json::to_value(FrameShape::Circle).unwrap(),
        serde_json::json!("circle")
    );
    let s: FrameShape = serde_json::from_value(serde_json::json!("square")).unwrap();
    assert_eq!(s, FrameShape::Square);
}
