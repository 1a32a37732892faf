use super::*;
use crate::foundation::color::Color;
use crate::geometry::{circle_path, rect_path};

#[test]
fn records_transform_and_clip_depth() {
    let mut s = RecordingSurface::new(10, 10);
    let path = rect_path(Rect::new(0.0, 0.0, 1.0, 1.0));

    s.save();
    s.concat(Affine::translate((2.0, 3.0)));
    s.clip(&path);
    s.fill(&path, &Brush::Solid(Color::BLACK));
    s.restore();
    s.fill(&path, &Brush::Solid(Color::BLACK));

    assert_eq!(s.save_depth(), 0);
    let cmds = s.commands();
    assert_eq!(cmds.len(), 3);
    assert!(matches!(cmds[0], DrawCommand::Clip { .. }));
    let DrawCommand::Fill {
        transform,
        clip_depth,
        ..
    } = &cmds[1]
    else {
        panic!("expected fill");
    };
    assert_eq!(*transform, Affine::translate((2.0, 3.0)));
    assert_eq!(*clip_depth, 1);
    let DrawCommand::Fill {
        transform,
        clip_depth,
        ..
    } = &cmds[2]
    else {
        panic!("expected fill");
    };
    assert_eq!(*transform, Affine::IDENTITY);
    assert_eq!(*clip_depth, 0);
}

#[test]
fn unbalanced_restore_is_ignored() {
    let mut s = RecordingSurface::new(4, 4);
    s.concat(Affine::scale(2.0));
    s.restore();
    assert_eq!(s.transform(), Affine::scale(2.0));
}

#[test]
fn to_device_scales_stroke_width_and_path() {
    let mut s = RecordingSurface::new(100, 100);
    s.concat(Affine::scale(2.0));
    s.stroke(
        &circle_path(Point::new(5.0, 5.0), 4.0),
        &Brush::Solid(Color::WHITE),
        &StrokeStyle::dashed(1.0, 2.0, 3.0),
    );
    let device = s.commands()[0].to_device(Affine::scale(0.5));
    let DrawCommand::Stroke { path, style, transform, .. } = device else {
        panic!("expected stroke");
    };
    assert_eq!(transform, Affine::IDENTITY);
    assert!((style.width - 1.0).abs() < 1e-12);
    assert_eq!(style.dash.as_deref(), Some(&[2.0, 3.0][..]));
    let bbox = kurbo::Shape::bounding_box(&path);
    assert!((bbox.x0 - 1.0).abs() < 1e-9 && (bbox.x1 - 9.0).abs() < 1e-9);
}

#[test]
fn clear_drops_commands_and_take_empties() {
    let mut s = RecordingSurface::new(4, 4);
    let path = rect_path(Rect::new(0.0, 0.0, 1.0, 1.0));
    s.fill(&path, &Brush::Solid(Color::BLACK));
    s.clear();
    assert!(s.commands().is_empty());

    s.draw_image(&RgbaImage::new(3, 2), Rect::new(0.0, 0.0, 4.0, 4.0));
    let taken = s.take_commands();
    assert_eq!(taken.len(), 1);
    assert!(taken[0].path().is_none());
    assert!(s.commands().is_empty());
}
