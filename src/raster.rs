// Brush rasterization into the stroke layer.
// Visual: a dab is a filled round dot; motion between two pointer samples is a
// round-capped "capsule" so fast drags draw a continuous line instead of dots.
//
// A pixel (x, y) is sampled at its center (x + 0.5, y + 0.5). It is covered
// when that center lies within `radius` of the shape. All writes are clipped
// to the layer bounds.

use crate::types::{Point, StrokeLayer};

/// Squared distance from `p` to the segment `a`-`b`.
#[inline]
fn dist2_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (qx, qy) = (a.x + t * dx - p.x, a.y + t * dy - p.y);
    qx * qx + qy * qy
}

#[inline]
fn pixel_center(x: u32, y: u32) -> Point {
    Point::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// True when pixel (x, y) falls inside the disk of `radius` around `center`.
pub fn disk_contains(center: Point, radius: f32, x: u32, y: u32) -> bool {
    capsule_contains(center, center, radius, x, y)
}

/// True when pixel (x, y) falls inside the capsule of `radius` around `a`-`b`.
pub fn capsule_contains(a: Point, b: Point, radius: f32, x: u32, y: u32) -> bool {
    dist2_to_segment(pixel_center(x, y), a, b) <= radius * radius
}

/// Inclusive pixel range whose centers may lie within [lo, hi], clipped to [0, len).
fn pixel_span(lo: f32, hi: f32, len: u32) -> Option<(u32, u32)> {
    // f32::max/min drop a NaN operand, so reject non-finite bounds first.
    if len == 0 || !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let first = (lo - 0.5).ceil().max(0.0);
    let last = (hi - 0.5).floor().min((len - 1) as f32);
    if first > last {
        return None;
    }
    Some((first as u32, last as u32))
}

/// Stamp a filled disk of `radius` centered at `center` (buffer space).
pub fn stamp_disk(layer: &mut StrokeLayer, center: Point, radius: f32) {
    stamp_capsule(layer, center, center, radius);
}

/// Stamp a round-capped line segment of width `2 * radius` from `a` to `b`.
pub fn stamp_capsule(layer: &mut StrokeLayer, a: Point, b: Point, radius: f32) {
    if radius <= 0.0 {
        return;
    }
    // Scan just the bounding box; cost is bounded by brush size and stroke
    // length, not by image size.
    let Some((x0, x1)) = pixel_span(a.x.min(b.x) - radius, a.x.max(b.x) + radius, layer.width())
    else {
        return;
    };
    let Some((y0, y1)) = pixel_span(a.y.min(b.y) - radius, a.y.max(b.y) + radius, layer.height())
    else {
        return;
    };

    let r2 = radius * radius;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if dist2_to_segment(pixel_center(x, y), a, b) <= r2 {
                layer.mark(x, y);
            }
        }
    }
}
