use super::*;
use crate::foundation::core::Point;
use crate::geometry::{circle_path, rect_path};
use image::Rgba;

fn red() -> Color {
    Color::rgb8(255, 0, 0)
}

#[test]
fn new_surface_is_transparent() {
    let s = RasterSurface::square(8).unwrap();
    assert_eq!(s.dimensions(), (8, 8));
    assert_eq!(s.pixel(3, 3), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(8, 0), None);
}

#[test]
fn zero_sized_surface_is_rejected() {
    let err = RasterSurface::new(0, 4).err().unwrap();
    assert!(err.to_string().contains("0x4"));
}

#[test]
fn fill_covers_interior() {
    let mut s = RasterSurface::square(16).unwrap();
    s.fill(&rect_path(Rect::new(2.0, 2.0, 14.0, 14.0)), &Brush::Solid(red()));
    assert_eq!(s.pixel(8, 8), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn clip_limits_fill_and_restore_drops_it() {
    let mut s = RasterSurface::square(20).unwrap();
    let full = rect_path(Rect::new(0.0, 0.0, 20.0, 20.0));

    s.save();
    s.clip(&rect_path(Rect::new(0.0, 0.0, 10.0, 20.0)));
    s.fill(&full, &Brush::Solid(red()));
    s.restore();
    assert_eq!(s.pixel(5, 10).map(|p| p[3]), Some(255));
    assert_eq!(s.pixel(15, 10).map(|p| p[3]), Some(0));

    s.fill(&full, &Brush::Solid(red()));
    assert_eq!(s.pixel(15, 10).map(|p| p[3]), Some(255));
}

#[test]
fn nested_clips_intersect() {
    let mut s = RasterSurface::square(20).unwrap();
    s.clip(&rect_path(Rect::new(0.0, 0.0, 10.0, 20.0)));
    s.clip(&rect_path(Rect::new(0.0, 0.0, 20.0, 10.0)));
    s.fill(&rect_path(Rect::new(0.0, 0.0, 20.0, 20.0)), &Brush::Solid(red()));
    assert_eq!(s.pixel(5, 5).map(|p| p[3]), Some(255));
    assert_eq!(s.pixel(15, 5).map(|p| p[3]), Some(0));
    assert_eq!(s.pixel(5, 15).map(|p| p[3]), Some(0));
}

#[test]
fn concat_moves_subsequent_geometry() {
    let mut s = RasterSurface::square(20).unwrap();
    s.concat(Affine::translate((10.0, 10.0)));
    s.fill(&rect_path(Rect::new(0.0, 0.0, 5.0, 5.0)), &Brush::Solid(red()));
    assert_eq!(s.pixel(2, 2).map(|p| p[3]), Some(0));
    assert_eq!(s.pixel(12, 12).map(|p| p[3]), Some(255));
}

#[test]
fn non_positive_stroke_width_draws_nothing() {
    let mut s = RasterSurface::square(20).unwrap();
    let ring = circle_path(Point::new(10.0, 10.0), 6.0);
    s.stroke(&ring, &Brush::Solid(red()), &StrokeStyle::solid(0.0));
    s.stroke(&ring, &Brush::Solid(red()), &StrokeStyle::solid(-2.0));
    assert!(s.premultiplied_data().iter().all(|b| *b == 0));
}

#[test]
fn stroke_paints_ring_not_center() {
    let mut s = RasterSurface::square(40).unwrap();
    let ring = circle_path(Point::new(20.0, 20.0), 15.0);
    s.stroke(&ring, &Brush::Solid(red()), &StrokeStyle::solid(3.0));
    assert_eq!(s.pixel(35, 20).map(|p| p[3]), Some(255));
    assert_eq!(s.pixel(20, 20).map(|p| p[3]), Some(0));
}

#[test]
fn draw_image_stretches_into_destination() {
    let mut s = RasterSurface::square(8).unwrap();
    let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
    s.draw_image(&img, Rect::new(0.0, 0.0, 8.0, 8.0));
    let [r, g, b, a] = s.pixel(4, 4).unwrap();
    assert!(r < 5 && g < 5, "{r} {g}");
    assert!(b > 250 && a > 250, "{b} {a}");
}

#[test]
fn radial_brush_is_transparent_inside_inner_radius() {
    let mut s = RasterSurface::square(40).unwrap();
    let brush = Brush::radial(Point::new(20.0, 20.0), 10.0, 18.0, Color::TRANSPARENT, red());
    s.fill(&rect_path(Rect::new(0.0, 0.0, 40.0, 40.0)), &brush);
    assert_eq!(s.pixel(20, 20).map(|p| p[3]), Some(0));
    assert!(s.pixel(0, 0).map(|p| p[3]).unwrap() > 250);
}

#[test]
fn to_rgba_image_demultiplies() {
    let mut s = RasterSurface::square(4).unwrap();
    s.fill_all(Color::rgba8(200, 100, 0, 128));
    let img = s.to_rgba_image();
    let px = img.get_pixel(1, 1).0;
    assert_eq!(px[3], 128);
    assert!((i32::from(px[0]) - 200).abs() <= 2, "{px:?}");
    assert!((i32::from(px[1]) - 100).abs() <= 2, "{px:?}");

    s.clear();
    assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
}
