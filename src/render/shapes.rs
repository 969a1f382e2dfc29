//! Shape rasterizers
//!
//! Each primitive iterates only its bounding box, clamped to the canvas and
//! padded by a pixel or two so edge coverage is never clipped early. Pixels
//! the pad pushes outside the canvas fall out through the bounds guard in
//! `Canvas::composite`.

use crate::render::canvas::{Canvas, Rgba};

/// Fill a circle with a hard edge
///
/// A pixel is covered iff its integer coordinate lies within `r` of the
/// center (squared-distance test, no antialiasing).
pub fn fill_circle(canvas: &mut Canvas, cx: f64, cy: f64, r: f64, color: Rgba) {
    let w = canvas.width() as i32;
    let h = canvas.height() as i32;
    let x0 = ((cx - r - 1.0) as i32).max(0);
    let x1 = ((cx + r + 1.0) as i32).min(w - 1);
    let y0 = ((cy - r - 1.0) as i32).max(0);
    let y1 = ((cy + r + 1.0) as i32).min(h - 1);
    let rr = r * r;
    for y in y0..=y1 {
        let dy = y as f64 - cy;
        for x in x0..=x1 {
            let dx = x as f64 - cx;
            if dx * dx + dy * dy <= rr {
                canvas.composite(x, y, color);
            }
        }
    }
}

fn edge(p1: (f64, f64), p2: (f64, f64), p3: (f64, f64)) -> f64 {
    (p1.0 - p3.0) * (p2.1 - p3.1) - (p2.0 - p3.0) * (p1.1 - p3.1)
}

/// Sign-consistency point-in-triangle test; insensitive to vertex order
fn inside_triangle(pt: (f64, f64), a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> bool {
    let d1 = edge(pt, a, b);
    let d2 = edge(pt, b, c);
    let d3 = edge(pt, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Fill a triangle, sampling at pixel centers
pub fn fill_triangle(
    canvas: &mut Canvas,
    a: (f64, f64),
    b: (f64, f64),
    c: (f64, f64),
    color: Rgba,
) {
    let w = canvas.width() as i32;
    let h = canvas.height() as i32;
    let x0 = ((a.0.min(b.0).min(c.0) - 1.0) as i32).max(0);
    let x1 = ((a.0.max(b.0).max(c.0) + 1.0) as i32).min(w - 1);
    let y0 = ((a.1.min(b.1).min(c.1) - 1.0) as i32).max(0);
    let y1 = ((a.1.max(b.1).max(c.1) + 1.0) as i32).min(h - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            if inside_triangle((x as f64 + 0.5, y as f64 + 0.5), a, b, c) {
                canvas.composite(x, y, color);
            }
        }
    }
}

/// Distance from a point to a segment, with the projection clamped to the
/// segment's endpoints
fn dist_to_segment(px: f64, py: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let vx = to.0 - from.0;
    let vy = to.1 - from.1;
    let wx = px - from.0;
    let wy = py - from.1;
    let c1 = vx * wx + vy * wy;
    if c1 <= 0.0 {
        return (px - from.0).hypot(py - from.1);
    }
    let c2 = vx * vx + vy * vy;
    if c2 <= c1 {
        return (px - to.0).hypot(py - to.1);
    }
    let t = c1 / c2;
    (px - (from.0 + t * vx)).hypot(py - (from.1 + t * vy))
}

/// Stroke a segment as a capsule of the given width
///
/// A pixel is covered iff its center lies within `width / 2` of the
/// segment. A zero-length segment degenerates to a filled disc of that
/// radius around the point.
pub fn stroke_line(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
    let w = canvas.width() as i32;
    let h = canvas.height() as i32;
    let pad = ((width / 2.0) as i32 + 2) as f64;
    let x0 = ((from.0.min(to.0) - pad) as i32).max(0);
    let x1 = ((from.0.max(to.0) + pad) as i32).min(w - 1);
    let y0 = ((from.1.min(to.1) - pad) as i32).max(0);
    let y1 = ((from.1.max(to.1) + pad) as i32).min(h - 1);
    let r = width / 2.0;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if dist_to_segment(x as f64 + 0.5, y as f64 + 0.5, from, to) <= r {
                canvas.composite(x, y, color);
            }
        }
    }
}

/// Segment count for an arc span: scales with both arc length and radius.
/// A quality/cost tunable, not a correctness constraint.
fn arc_steps(span_deg: f64, r: f64) -> i32 {
    ((span_deg * r / 40.0) as i32).max(12)
}

/// Stroke a circular arc as a polyline of capsule segments
///
/// Angles are in degrees, measured the usual raster way (y grows downward,
/// 0 points right, positive sweeps clockwise on screen).
pub fn stroke_arc(
    canvas: &mut Canvas,
    cx: f64,
    cy: f64,
    r: f64,
    start_deg: f64,
    end_deg: f64,
    width: f64,
    color: Rgba,
) {
    let steps = arc_steps(end_deg - start_deg, r);
    let mut prev: Option<(f64, f64)> = None;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let rad = (start_deg + (end_deg - start_deg) * t).to_radians();
        let point = (cx + rad.cos() * r, cy + rad.sin() * r);
        if let Some(q) = prev {
            stroke_line(canvas, q, point, width, color);
        }
        prev = Some(point);
    }
}
