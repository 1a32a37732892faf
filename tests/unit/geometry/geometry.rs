use super::*;
use kurbo::PathEl;
use std::f64::consts::PI;

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn derived_constants_follow_margin_fraction() {
    let g = BorderGeometry::new(100.0);
    assert!((g.margin - 3.5).abs() < 1e-12);
    assert!((g.radius - 46.5).abs() < 1e-12);
    assert!((g.rect_pos - 3.5).abs() < 1e-12);
    assert!((g.rect_size - 93.0).abs() < 1e-12);
    assert_eq!(g.center, Point::new(50.0, 50.0));
}

#[test]
fn circle_points_match_trig_at_axis_angles() {
    let c = Point::new(50.0, 50.0);
    for angle in [0.0, PI / 2.0, PI, 3.0 * PI / 2.0] {
        let p = point_on_shape(c, angle, 10.0, FrameShape::Circle);
        let expected = Point::new(50.0 + angle.cos() * 10.0, 50.0 + angle.sin() * 10.0);
        assert!(close(p, expected), "angle {angle}: {p:?}");
    }
}

#[test]
fn square_points_land_on_edge_midpoints_at_axis_angles() {
    let c = Point::new(50.0, 50.0);
    let r = 10.0;
    let right = point_on_shape(c, 0.0, r, FrameShape::Square);
    let bottom = point_on_shape(c, PI / 2.0, r, FrameShape::Square);
    let left = point_on_shape(c, PI, r, FrameShape::Square);
    let top = point_on_shape(c, 3.0 * PI / 2.0, r, FrameShape::Square);
    assert!(close(right, Point::new(60.0, 50.0)), "{right:?}");
    assert!(close(bottom, Point::new(50.0, 60.0)), "{bottom:?}");
    assert!(close(left, Point::new(40.0, 50.0)), "{left:?}");
    assert!(close(top, Point::new(50.0, 40.0)), "{top:?}");
}

#[test]
fn square_diagonal_hits_corner() {
    let p = point_on_shape(Point::ORIGIN, PI / 4.0, 5.0, FrameShape::Square);
    assert!((p.x - 5.0).abs() < 1e-9);
    assert!((p.y - 5.0).abs() < 1e-9);
}

#[test]
fn zero_distance_collapses_to_center() {
    let c = Point::new(3.0, 4.0);
    for shape in [FrameShape::Circle, FrameShape::Square] {
        assert!(close(point_on_shape(c, 1.234, 0.0, shape), c));
    }
}

#[test]
fn circle_path_has_circumference_length() {
    let path = circle_path(Point::new(0.0, 0.0), 10.0);
    let len = path_length(&path);
    assert!((len - TAU * 10.0).abs() < 1e-2, "{len}");
}

#[test]
fn arc_piece_count_ignores_radius() {
    let small = arc_path(Point::ORIGIN, 1.0, 0.0, TAU);
    let large = arc_path(Point::ORIGIN, 1000.0, 0.0, TAU);
    assert_eq!(small.elements().len(), large.elements().len());
}

#[test]
fn square_progress_lengths_track_fraction() {
    let g = BorderGeometry::new(200.0);
    let perimeter = g.perimeter(FrameShape::Square);
    for p in [0.0, 0.1, 0.25, 0.5, 0.8, 1.0] {
        let len = path_length(&square_progress_path(&g, p));
        assert!((len - perimeter * p).abs() < 1e-6, "progress {p}: {len}");
    }
}

#[test]
fn square_progress_clamps_out_of_range() {
    let g = BorderGeometry::new(200.0);
    let over = path_length(&square_progress_path(&g, 3.0));
    let under = path_length(&square_progress_path(&g, -1.0));
    assert!((over - g.perimeter(FrameShape::Square)).abs() < 1e-6);
    assert!(under.abs() < 1e-9);
}

#[test]
fn square_progress_quarter_ends_mid_right_edge() {
    let g = BorderGeometry::new(200.0);
    let path = square_progress_path(&g, 0.25);
    let Some(PathEl::LineTo(end)) = path.elements().last().copied() else {
        panic!("expected a line segment");
    };
    assert!((end.x - (g.rect_pos + g.rect_size)).abs() < 1e-9);
    assert!((end.y - (g.rect_pos + g.rect_size / 2.0)).abs() < 1e-9);
}

#[test]
fn outline_inset_shrinks_both_shapes() {
    let g = BorderGeometry::new(100.0);
    let r = g.frame_rect(2.0);
    assert!((r.width() - (g.rect_size - 4.0)).abs() < 1e-12);
    let circle = path_length(&g.outline(FrameShape::Circle, 2.0));
    let expected = TAU * (g.radius - 2.0);
    // Quarter-turn cubics overshoot a true circle by ~1.4e-4 relative.
    assert!((circle - expected).abs() < 2e-4 * expected);
}

#[test]
fn closed_polyline_ends_with_close() {
    let path = polyline([Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)], true);
    assert!(matches!(path.elements().last(), Some(PathEl::ClosePath)));
    assert!(polyline(std::iter::empty(), true).elements().is_empty());
}
