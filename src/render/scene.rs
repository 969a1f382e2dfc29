//! Scene composer for the face artwork
//!
//! Compositing is order-sensitive, so the artwork is modeled as an explicit
//! ordered instruction list replayed over the background rather than ad hoc
//! draw calls. Tests can snapshot the list without touching the rasterizer.
//!
//! Geometry constants are authored against the 1024-pixel master and scaled
//! by `size / MASTER_SIZE`, so reduced-size renders stay proportional.

use serde::{Deserialize, Serialize};

use crate::render::canvas::{Canvas, Rgba};
use crate::render::shapes;
use crate::{IconConfig, MASTER_SIZE};

/// Colors used by the background and the layered face shapes
///
/// Deserializable so the CLI can load an override file; missing fields fall
/// back to the reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background_top: Rgba,
    pub background_bottom: Rgba,
    pub glow: Rgba,
    pub shadow: Rgba,
    pub outline: Rgba,
    pub fur: Rgba,
    pub fur_shade: Rgba,
    pub inner_ear: Rgba,
    pub eye: Rgba,
    pub eye_highlight: Rgba,
    pub nose: Rgba,
    pub whisker: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background_top: Rgba::new(245, 158, 11, 255),
            background_bottom: Rgba::new(234, 88, 12, 255),
            glow: Rgba::new(255, 209, 128, 255),
            shadow: Rgba::new(122, 55, 5, 74),
            outline: Rgba::new(137, 60, 8, 255),
            fur: Rgba::new(255, 243, 214, 255),
            fur_shade: Rgba::new(244, 219, 174, 255),
            inner_ear: Rgba::new(255, 182, 175, 255),
            eye: Rgba::new(90, 48, 18, 255),
            eye_highlight: Rgba::new(255, 255, 255, 210),
            nose: Rgba::new(232, 112, 109, 255),
            whisker: Rgba::new(137, 60, 8, 200),
        }
    }
}

/// A single rasterizable primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Triangle {
        a: (f64, f64),
        b: (f64, f64),
        c: (f64, f64),
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        r: f64,
        start_deg: f64,
        end_deg: f64,
        width: f64,
    },
}

/// One step of the scene script: a shape and the color it composites with
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub shape: Shape,
    pub color: Rgba,
}

/// The ordered face script
///
/// Layering is a contract: shadow, ear outlines, ear fills, inner ears,
/// head outline, head fill, face patch, eyes, eye highlights, nose, mouth
/// line, mouth arcs, whiskers. Reordering changes the output.
pub fn face_ops(config: &IconConfig) -> Vec<DrawOp> {
    let k = config.size as f64 / MASTER_SIZE as f64;
    let p = &config.palette;

    let circle = |cx: f64, cy: f64, r: f64, color: Rgba| DrawOp {
        shape: Shape::Circle {
            cx: cx * k,
            cy: cy * k,
            r: r * k,
        },
        color,
    };
    let triangle = |a: (f64, f64), b: (f64, f64), c: (f64, f64), color: Rgba| DrawOp {
        shape: Shape::Triangle {
            a: (a.0 * k, a.1 * k),
            b: (b.0 * k, b.1 * k),
            c: (c.0 * k, c.1 * k),
        },
        color,
    };
    let line = |from: (f64, f64), to: (f64, f64), width: f64, color: Rgba| DrawOp {
        shape: Shape::Line {
            from: (from.0 * k, from.1 * k),
            to: (to.0 * k, to.1 * k),
            width: width * k,
        },
        color,
    };
    let arc = |cx: f64, cy: f64, r: f64, start: f64, end: f64, width: f64, color: Rgba| DrawOp {
        shape: Shape::Arc {
            cx: cx * k,
            cy: cy * k,
            r: r * k,
            start_deg: start,
            end_deg: end,
            width: width * k,
        },
        color,
    };

    vec![
        // Drop shadow behind the head.
        circle(512.0, 578.0, 306.0, p.shadow),
        // Ears: outline, fill, inner.
        triangle((300.0, 390.0), (416.0, 166.0), (532.0, 390.0), p.outline),
        triangle((724.0, 390.0), (608.0, 166.0), (492.0, 390.0), p.outline),
        triangle((324.0, 390.0), (418.0, 214.0), (512.0, 390.0), p.fur),
        triangle((700.0, 390.0), (606.0, 214.0), (512.0, 390.0), p.fur),
        triangle((364.0, 390.0), (422.0, 260.0), (480.0, 390.0), p.inner_ear),
        triangle((660.0, 390.0), (602.0, 260.0), (544.0, 390.0), p.inner_ear),
        // Head and center face patch.
        circle(512.0, 578.0, 286.0, p.outline),
        circle(512.0, 578.0, 266.0, p.fur),
        circle(512.0, 598.0, 180.0, p.fur_shade),
        // Eyes with highlight dots.
        circle(420.0, 548.0, 34.0, p.eye),
        circle(604.0, 548.0, 34.0, p.eye),
        circle(430.0, 538.0, 10.0, p.eye_highlight),
        circle(614.0, 538.0, 10.0, p.eye_highlight),
        // Nose and mouth.
        triangle((512.0, 594.0), (468.0, 628.0), (556.0, 628.0), p.nose),
        line((512.0, 628.0), (512.0, 655.0), 12.0, p.outline),
        arc(486.0, 657.0, 34.0, 15.0, 165.0, 10.0, p.outline),
        arc(538.0, 657.0, 34.0, 15.0, 165.0, 10.0, p.outline),
        // Whiskers, three per side.
        line((312.0, 610.0), (452.0, 630.0), 12.0, p.whisker),
        line((296.0, 650.0), (448.0, 650.0), 12.0, p.whisker),
        line((312.0, 690.0), (452.0, 668.0), 12.0, p.whisker),
        line((572.0, 630.0), (712.0, 610.0), 12.0, p.whisker),
        line((576.0, 650.0), (728.0, 650.0), 12.0, p.whisker),
        line((572.0, 668.0), (712.0, 690.0), 12.0, p.whisker),
    ]
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let t = t.clamp(0.0, 1.0);
    (a as f64 + (b as f64 - a as f64) * t) as u8
}

/// Paint the vertical gradient attenuated by the off-center radial glow
///
/// Every pixel is written opaque; the face layers composite on top of this.
pub fn paint_background(canvas: &mut Canvas, config: &IconConfig) {
    let p = &config.palette;
    let s = config.size as f64;
    for y in 0..config.size {
        let t = y as f64 / (s - 1.0);
        let base = (
            lerp_channel(p.background_top.r, p.background_bottom.r, t),
            lerp_channel(p.background_top.g, p.background_bottom.g, t),
            lerp_channel(p.background_top.b, p.background_bottom.b, t),
        );
        for x in 0..config.size {
            let dx = (x as f64 - s * 0.5) / (s * 0.55);
            let dy = (y as f64 - s * 0.35) / (s * 0.45);
            let d = (dx * dx + dy * dy).sqrt().min(1.0);
            let gl = 1.0 - d;
            let mix = |base_c: u8, glow_c: u8| {
                (base_c as f64 * (1.0 - 0.22 * gl) + glow_c as f64 * 0.22 * gl) as u8
            };
            canvas.set(
                x as i32,
                y as i32,
                Rgba::new(
                    mix(base.0, p.glow.r),
                    mix(base.1, p.glow.g),
                    mix(base.2, p.glow.b),
                    255,
                ),
            );
        }
    }
}

/// Replay one instruction onto the canvas
pub fn rasterize(canvas: &mut Canvas, op: &DrawOp) {
    match op.shape {
        Shape::Circle { cx, cy, r } => shapes::fill_circle(canvas, cx, cy, r, op.color),
        Shape::Triangle { a, b, c } => shapes::fill_triangle(canvas, a, b, c, op.color),
        Shape::Line { from, to, width } => shapes::stroke_line(canvas, from, to, width, op.color),
        Shape::Arc {
            cx,
            cy,
            r,
            start_deg,
            end_deg,
            width,
        } => shapes::stroke_arc(canvas, cx, cy, r, start_deg, end_deg, width, op.color),
    }
}

/// Render the full icon: background first, then the face script in order
pub fn render(config: &IconConfig) -> Canvas {
    let mut canvas = Canvas::new(config.size, config.size);
    paint_background(&mut canvas, config);
    for op in face_ops(config) {
        rasterize(&mut canvas, &op);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_has_the_reference_layer_order() {
        let ops = face_ops(&IconConfig::default());
        assert_eq!(ops.len(), 24);

        let palette = Palette::default();
        // shadow first, whiskers last
        assert!(matches!(ops[0].shape, Shape::Circle { .. }));
        assert_eq!(ops[0].color, palette.shadow);
        for op in &ops[18..] {
            assert!(matches!(op.shape, Shape::Line { .. }));
            assert_eq!(op.color, palette.whisker);
        }
        // head fill comes after the head outline, eyes after the face patch
        assert_eq!(ops[7].color, palette.outline);
        assert_eq!(ops[8].color, palette.fur);
        assert_eq!(ops[9].color, palette.fur_shade);
        assert_eq!(ops[10].color, palette.eye);
        // mouth arcs sit between the mouth line and the whiskers
        assert!(matches!(ops[16].shape, Shape::Arc { .. }));
        assert!(matches!(ops[17].shape, Shape::Arc { .. }));
    }

    #[test]
    fn script_scales_with_the_configured_size() {
        let full = face_ops(&IconConfig::default());
        let half = face_ops(&IconConfig {
            size: 512,
            ..Default::default()
        });
        match (&full[0].shape, &half[0].shape) {
            (Shape::Circle { cx: a, r: ra, .. }, Shape::Circle { cx: b, r: rb, .. }) => {
                assert_eq!(*a, 2.0 * *b);
                assert_eq!(*ra, 2.0 * *rb);
            }
            _ => panic!("first op is not a circle"),
        }
    }

    #[test]
    fn background_is_opaque_and_vertically_graded() {
        let config = IconConfig {
            size: 64,
            ..Default::default()
        };
        let mut canvas = Canvas::new(64, 64);
        paint_background(&mut canvas, &config);
        assert!(canvas.pixels().chunks(4).all(|px| px[3] == 255));
        // top rows lean toward background_top, bottom rows toward bottom
        let top = canvas.get(5, 0).unwrap();
        let bottom = canvas.get(5, 63).unwrap();
        assert!(top.g > bottom.g);
    }

    #[test]
    fn render_produces_an_opaque_face_over_the_background() {
        let config = IconConfig {
            size: 64,
            ..Default::default()
        };
        let rendered = render(&config);
        assert_eq!(rendered.width(), 64);
        assert!(rendered.pixels().chunks(4).all(|px| px[3] == 255));

        let mut background_only = Canvas::new(64, 64);
        paint_background(&mut background_only, &config);
        assert_ne!(rendered.pixels(), background_only.pixels());
    }
}
