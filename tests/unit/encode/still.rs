use super::*;

#[test]
fn png_round_trips_alpha() {
    let img = RgbaImage::from_raw(2, 1, vec![10, 20, 30, 0, 200, 100, 50, 255]).unwrap();
    let bytes = encode_png(&img).unwrap();
    let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(back, img);
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("circlefx-still-{}", std::process::id()));
    let path = dir.join("nested").join("out.png");
    write_png(&path, &RgbaImage::new(3, 3)).unwrap();
    let back = image::open(&path).unwrap();
    assert_eq!((back.width(), back.height()), (3, 3));
    std::fs::remove_dir_all(&dir).unwrap();
}
