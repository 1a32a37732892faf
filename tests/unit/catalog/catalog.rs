use super::*;

#[test]
fn tiers_have_expected_sizes_and_order() {
    assert_eq!(primary_presets().len(), 11);
    assert_eq!(secondary_presets().len(), 15);
    assert_eq!(primary_presets()[0].id, "classic-blue");
    assert_eq!(secondary_presets()[14].id, "hex-teal");

    let ids: Vec<&str> = all_presets().map(|p| p.id).collect();
    assert_eq!(ids.len(), 26);
    assert_eq!(ids[10], "ornate-pink");
    assert_eq!(ids[11], "gradient-sunset");
}

#[test]
fn catalog_is_valid() {
    validate_catalog().unwrap();
}

#[test]
fn lookup_by_id() {
    let p = preset_by_id("glitch-cyan").unwrap();
    assert_eq!(p.pattern, PatternKind::Glitch);
    assert_eq!(p.color.to_hex(), "#22D3EE");
    assert_eq!(p.secondary_color.map(Color::to_hex).as_deref(), Some("#F43F5E"));
    assert_eq!(p.tier(), Tier::Secondary);
    assert!(preset_by_id("nope").is_none());
}

#[test]
fn every_pattern_is_covered_by_some_preset() {
    for kind in PatternKind::ALL {
        assert!(all_presets().any(|p| p.pattern == kind), "{kind} has no preset");
    }
}

#[test]
fn tier_lookup_matches_lists() {
    assert!(presets_for_tier(Tier::Primary).iter().all(|p| p.tier() == Tier::Primary));
    assert!(presets_for_tier(Tier::Secondary).iter().all(|p| p.tier() == Tier::Secondary));
    assert_eq!("Secondary".parse::<Tier>().unwrap(), Tier::Secondary);
    assert!("premium".parse::<Tier>().is_err());
}

#[test]
fn draw_request_carries_preset_colors() {
    let p = preset_by_id("gradient-sunset").unwrap();
    let req = p.draw_request(512.0, 0.5, FrameShape::Square);
    assert_eq!(req.pattern, PatternKind::GradientRing);
    assert_eq!(req.primary, Color::hex(0xFF4E50));
    assert_eq!(req.secondary, Some(Color::hex(0xF9D423)));
    assert_eq!(req.size, 512.0);
    assert_eq!(req.progress, 0.5);
    assert_eq!(req.shape, FrameShape::Square);
}

#[test]
fn json_uses_flat_record_layout() {
    let json = catalog_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    let list = v.as_array().unwrap();
    assert_eq!(list.len(), 26);
    assert_eq!(
        list[0],
        serde_json::json!({
            "id": "classic-blue",
            "type": "minimal",
            "color": "#3B82F6",
            "name": "Classic Blue"
        })
    );
    assert_eq!(list[11]["secondaryColor"], "#F9D423");
    assert_eq!(list[11]["type"], "gradient-ring");
}
