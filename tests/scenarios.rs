// End-to-end behaviour of the mask canvas through its public API.
// Every mask is checked after a PNG round trip, as the service would see it.

use image::{Rgba, RgbaImage};
use mask_canvas::mask::{MASK_BLACK, MASK_WHITE, encode_png};
use mask_canvas::raster::{capsule_contains, disk_contains};
use mask_canvas::{MaskCanvas, Point};

fn source_png(w: u32, h: u32) -> Vec<u8> {
    // A gradient, so a mask that copied colour instead of coverage would show.
    let img = RgbaImage::from_fn(w, h, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255]));
    encode_png(&img).unwrap()
}

fn decode_mask(canvas: &MaskCanvas) -> RgbaImage {
    let mask = canvas.export_mask().unwrap();
    image::load_from_memory(mask.as_bytes()).unwrap().to_rgba8()
}

fn assert_binary(mask: &RgbaImage) {
    for p in mask.pixels() {
        assert!(*p == MASK_WHITE || *p == MASK_BLACK, "non-binary pixel {p:?}");
    }
}

#[test]
fn single_stamp_is_exactly_a_disk_for_every_brush_size() {
    let centre = Point::new(61.3, 47.8);
    for size in [5, 6, 17, 40, 99, 150] {
        let mut canvas = MaskCanvas::with_source(&source_png(120, 90)).unwrap();
        canvas.set_brush_size(size);
        canvas.begin_stroke(centre);
        canvas.end_stroke();

        let mask = decode_mask(&canvas);
        let r = size as f32 / 2.0;
        for (x, y, p) in mask.enumerate_pixels() {
            let expect = if disk_contains(centre, r, x, y) { MASK_WHITE } else { MASK_BLACK };
            assert_eq!(*p, expect, "brush {size}, pixel ({x},{y})");
        }
    }
}

#[test]
fn horizontal_stroke_makes_a_capsule() {
    let mut canvas = MaskCanvas::with_source(&source_png(400, 300)).unwrap();
    canvas.set_brush_size(40);
    canvas.begin_stroke(Point::new(100.0, 100.0));
    canvas.extend_stroke(Point::new(200.0, 100.0));
    canvas.end_stroke();

    let mask = decode_mask(&canvas);
    assert_eq!(mask.dimensions(), (400, 300));
    assert_binary(&mask);

    let (a, b) = (Point::new(100.0, 100.0), Point::new(200.0, 100.0));
    for (x, y, p) in mask.enumerate_pixels() {
        let expect = if capsule_contains(a, b, 20.0, x, y) { MASK_WHITE } else { MASK_BLACK };
        assert_eq!(*p, expect, "pixel ({x},{y})");
    }
    // Spot checks in plain numbers.
    assert_eq!(*mask.get_pixel(150, 100), MASK_WHITE);
    assert_eq!(*mask.get_pixel(150, 118), MASK_WHITE);
    assert_eq!(*mask.get_pixel(150, 121), MASK_BLACK);
    assert_eq!(*mask.get_pixel(82, 99), MASK_WHITE);
    assert_eq!(*mask.get_pixel(78, 99), MASK_BLACK);
    assert_eq!(*mask.get_pixel(219, 99), MASK_WHITE);
    assert_eq!(*mask.get_pixel(221, 99), MASK_BLACK);
}

#[test]
fn clear_then_export_is_all_black() {
    let mut canvas = MaskCanvas::with_source(&source_png(64, 48)).unwrap();
    canvas.begin_stroke(Point::new(10.0, 10.0));
    canvas.extend_stroke(Point::new(50.0, 40.0));
    canvas.end_stroke();
    assert!(canvas.has_coverage());

    canvas.clear_mask();
    let exported = canvas.export_mask().unwrap();
    assert!(exported.is_blank());
    let mask = decode_mask(&canvas);
    assert_eq!(mask.dimensions(), (64, 48));
    assert!(mask.pixels().all(|p| *p == MASK_BLACK));
}

#[test]
fn clear_on_fresh_canvas_is_all_black() {
    let mut canvas = MaskCanvas::with_source(&source_png(33, 17)).unwrap();
    canvas.clear_mask();
    let mask = decode_mask(&canvas);
    assert_eq!(mask.dimensions(), (33, 17));
    assert!(mask.pixels().all(|p| *p == MASK_BLACK));
}

#[test]
fn unpainted_export_is_not_an_error() {
    let canvas = MaskCanvas::with_source(&source_png(10, 10)).unwrap();
    let mask = canvas.export_mask().unwrap();
    assert!(mask.is_blank());
    assert_eq!((mask.width(), mask.height()), (10, 10));
}

#[test]
fn repeated_export_is_byte_identical() {
    let mut canvas = MaskCanvas::with_source(&source_png(80, 60)).unwrap();
    canvas.begin_stroke(Point::new(20.0, 20.0));
    canvas.extend_stroke(Point::new(60.0, 30.0));
    canvas.end_stroke();
    let first = canvas.export_mask().unwrap();
    let second = canvas.export_mask().unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn display_coordinates_are_scaled_into_the_buffer() {
    let mut canvas = MaskCanvas::with_source(&source_png(400, 300)).unwrap();
    canvas.set_display_size(100, 150);
    canvas.set_brush_size(5);
    canvas.begin_stroke(Point::new(20.0, 40.0));
    canvas.end_stroke();

    // (20 * 400/100, 40 * 300/150) = (80, 80)
    let mask = decode_mask(&canvas);
    let centre = Point::new(80.0, 80.0);
    for (x, y, p) in mask.enumerate_pixels() {
        let expect = if disk_contains(centre, 2.5, x, y) { MASK_WHITE } else { MASK_BLACK };
        assert_eq!(*p, expect, "pixel ({x},{y})");
    }
    assert_eq!(*mask.get_pixel(20, 40), MASK_BLACK);
}

#[test]
fn separate_strokes_do_not_bridge() {
    let mut canvas = MaskCanvas::with_source(&source_png(300, 100)).unwrap();
    canvas.set_brush_size(10);
    canvas.begin_stroke(Point::new(20.0, 50.0));
    canvas.extend_stroke(Point::new(40.0, 50.0));
    canvas.begin_stroke(Point::new(260.0, 50.0));
    canvas.extend_stroke(Point::new(280.0, 50.0));
    canvas.end_stroke();

    let mask = decode_mask(&canvas);
    for x in 50..250 {
        assert_eq!(*mask.get_pixel(x, 49), MASK_BLACK, "bridge at x={x}");
    }
    assert_eq!(*mask.get_pixel(30, 49), MASK_WHITE);
    assert_eq!(*mask.get_pixel(270, 49), MASK_WHITE);
}

#[test]
fn brush_sizes_set_mid_session_give_two_disks() {
    let (small, big) = (Point::new(30.0, 30.0), Point::new(200.0, 120.0));
    let paint = |order_small_first: bool| {
        let mut canvas = MaskCanvas::with_source(&source_png(320, 240)).unwrap();
        let mut stamps = [(5, small), (150, big)];
        if !order_small_first {
            stamps.reverse();
        }
        for (size, p) in stamps {
            canvas.set_brush_size(size);
            canvas.begin_stroke(p);
            canvas.end_stroke();
        }
        decode_mask(&canvas)
    };

    let forward = paint(true);
    let backward = paint(false);
    assert_eq!(forward, backward);
    for (x, y, p) in forward.enumerate_pixels() {
        let inside = disk_contains(small, 2.5, x, y) || disk_contains(big, 75.0, x, y);
        assert_eq!(*p == MASK_WHITE, inside, "pixel ({x},{y})");
    }
}

#[test]
fn mid_stroke_resize_neither_panics_nor_corrupts() {
    let mut canvas = MaskCanvas::with_source(&source_png(200, 200)).unwrap();
    canvas.begin_stroke(Point::new(10.0, 10.0));
    for (i, size) in [5, 150, 0, 1000, 37].into_iter().enumerate() {
        canvas.set_brush_size(size);
        canvas.extend_stroke(Point::new(10.0 + 30.0 * i as f32, 100.0));
    }
    canvas.end_stroke();
    let mask = decode_mask(&canvas);
    assert_eq!(mask.dimensions(), (200, 200));
    assert_binary(&mask);
}

#[test]
fn strokes_off_the_image_are_clipped() {
    let mut canvas = MaskCanvas::with_source(&source_png(50, 50)).unwrap();
    canvas.set_brush_size(20);
    canvas.begin_stroke(Point::new(-30.0, 25.0));
    canvas.extend_stroke(Point::new(80.0, 25.0));
    canvas.end_stroke();
    let mask = decode_mask(&canvas);
    assert_binary(&mask);
    assert_eq!(*mask.get_pixel(0, 25), MASK_WHITE);
    assert_eq!(*mask.get_pixel(49, 25), MASK_WHITE);
    assert_eq!(*mask.get_pixel(25, 0), MASK_BLACK);
}

#[test]
fn jpeg_sources_load() {
    let img = image::RgbImage::from_pixel(24, 16, image::Rgb([200, 100, 50]));
    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut jpeg).encode_image(&img).unwrap();
    let canvas = MaskCanvas::with_source(&jpeg).unwrap();
    assert_eq!(canvas.dimensions(), Some((24, 16)));
}
