//! CPU reference of the per-pixel coloring program.
//!
//! Mirrors `render/shaders/julia.wgsl` step for step so the coloring can be
//! checked without a GPU. Pixel coordinates have a bottom-left origin.

use crate::coords::{Rgb, Vec2};
use crate::render::FractalInputs;

/// Iteration cap of the escape-time loop.
pub const MAX_ITERATIONS: u32 = 100;

/// Height of the visible region of the complex plane.
pub const PLANE_HEIGHT: f32 = 2.5;

/// Julia parameter before drift and pointer influence.
pub const BASE_PARAMETER: Vec2 = Vec2 { x: -0.8, y: 0.156 };

/// Color of points that never escape.
pub const INTERIOR_COLOR: Rgb = Rgb::new(0.01, 0.01, 0.02);

/// Outcome of the escape-time loop for one point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Escape {
    /// Completed steps that stayed inside the radius-2 disc.
    pub iterations: u32,
    /// Value of `z` when the loop stopped.
    pub z: Vec2,
}

impl Escape {
    pub fn escaped(&self) -> bool {
        self.iterations < MAX_ITERATIONS
    }

    /// Continuous iteration count, `iter - log2(log2(|z|^2)) + 4`.
    pub fn smooth(&self) -> f32 {
        self.iterations as f32 - self.z.dot(self.z).log2().log2() + 4.0
    }
}

/// Maps a pixel to the complex plane, centered, with the short axis spanning [`PLANE_HEIGHT`].
pub fn plane_point(frag: Vec2, resolution: Vec2) -> Vec2 {
    (frag - resolution * 0.5) / resolution.y * PLANE_HEIGHT
}

/// Julia parameter for the given inputs: base value, time drift and pointer pull.
pub fn julia_parameter(inputs: &FractalInputs) -> Vec2 {
    let t = inputs.time * inputs.speed;
    let drift = Vec2::new((0.3 * t).sin() * 0.1, (0.2 * t).cos() * 0.1);
    let pull = (inputs.pointer() / inputs.resolution() - Vec2::new(0.5, 0.5)) * inputs.strength;
    BASE_PARAMETER + drift + pull
}

/// Iterates `z <- z^2 + c` from `z = uv` until `|z|^2 > 4` or the cap.
pub fn escape_time(uv: Vec2, c: Vec2) -> Escape {
    let mut z = uv;
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        z = z.complex_square() + c;
        if z.dot(z) > 4.0 {
            break;
        }
        iterations += 1;
    }
    Escape { iterations, z }
}

/// Gradient position of an escaped point, pulsing slowly with `time`.
pub fn glow(escape: &Escape, time: f32) -> f32 {
    let t = escape.smooth() / MAX_ITERATIONS as f32;
    t.max(0.0).powf(0.5) * (0.8 + 0.2 * (0.5 * time).sin())
}

/// Color of the pixel at `frag`.
pub fn shade(frag: Vec2, inputs: &FractalInputs) -> Rgb {
    let uv = plane_point(frag, inputs.resolution());
    let escape = escape_time(uv, julia_parameter(inputs));

    if !escape.escaped() {
        return INTERIOR_COLOR;
    }

    inputs
        .color_start()
        .mix(inputs.color_end(), glow(&escape, inputs.time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;

    fn inputs(pointer: Vec2, time: f32, config: &RenderConfig) -> FractalInputs {
        FractalInputs::new(Vec2::new(800.0, 600.0), pointer, time, config)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn origin_never_escapes_for_base_parameter() {
        let escape = escape_time(Vec2::zero(), BASE_PARAMETER);
        assert_eq!(escape.iterations, MAX_ITERATIONS);
        assert!(!escape.escaped());
    }

    #[test]
    fn escape_counts_are_deterministic() {
        assert_eq!(escape_time(Vec2::new(0.5, 0.5), BASE_PARAMETER).iterations, 3);
        assert_eq!(escape_time(Vec2::new(0.0, 1.0), BASE_PARAMETER).iterations, 1);
        assert_eq!(escape_time(Vec2::new(1.5, 1.0), BASE_PARAMETER).iterations, 0);
    }

    #[test]
    fn plane_point_centers_and_scales_by_height() {
        let res = Vec2::new(800.0, 600.0);
        assert_eq!(plane_point(Vec2::new(400.0, 300.0), res), Vec2::zero());
        assert_eq!(plane_point(Vec2::new(400.0, 600.0), res), Vec2::new(0.0, 1.25));
    }

    #[test]
    fn centered_pointer_adds_no_pull() {
        let config = RenderConfig::default();
        let c = julia_parameter(&inputs(Vec2::new(400.0, 300.0), 0.0, &config));

        assert!(approx(c.x, -0.8), "c = {c:?}");
        assert!(approx(c.y, 0.256), "c = {c:?}");
    }

    #[test]
    fn pointer_pull_scales_with_strength() {
        let config = RenderConfig {
            interaction_strength: 1.0,
            ..RenderConfig::default()
        };
        let c = julia_parameter(&inputs(Vec2::new(880.0, 146.4), 0.0, &config));

        assert!(approx(c.x, -0.2), "c = {c:?}");
        assert!(approx(c.y, 0.0), "c = {c:?}");
    }

    #[test]
    fn center_pixel_at_start_escapes_after_ten() {
        let config = RenderConfig::default();
        let inputs = inputs(Vec2::new(400.0, 300.0), 0.0, &config);
        let escape = escape_time(Vec2::zero(), julia_parameter(&inputs));

        assert_eq!(escape.iterations, 10);
    }

    #[test]
    fn corner_pixel_glow_snapshot() {
        let config = RenderConfig::default();
        let inputs = inputs(Vec2::new(400.0, 300.0), 0.0, &config);
        let uv = plane_point(Vec2::zero(), inputs.resolution());
        let escape = escape_time(uv, julia_parameter(&inputs));

        assert_eq!(escape.iterations, 0);
        assert!(approx(glow(&escape, 0.0), 0.1101), "glow = {}", glow(&escape, 0.0));
    }

    #[test]
    fn interior_pixels_use_interior_color() {
        let config = RenderConfig {
            interaction_strength: 1.0,
            ..RenderConfig::default()
        };
        let inputs = inputs(Vec2::new(880.0, 146.4), 0.0, &config);

        assert_eq!(shade(Vec2::new(400.0, 300.0), &inputs), INTERIOR_COLOR);
    }

    #[test]
    fn equal_gradient_ends_give_that_color() {
        let color = Rgb::new(0.3, 0.6, 0.9);
        let config = RenderConfig {
            color_start: color,
            color_end: color,
            ..RenderConfig::default()
        };
        let shaded = shade(Vec2::zero(), &inputs(Vec2::new(400.0, 300.0), 0.0, &config));

        assert!(approx(shaded.r, color.r) && approx(shaded.g, color.g) && approx(shaded.b, color.b));
    }

    #[test]
    fn escaped_pixels_stay_between_gradient_ends() {
        let config = RenderConfig::default();
        let inputs = inputs(Vec2::new(400.0, 300.0), 1.7, &config);

        for (x, y) in [(0.0, 0.0), (799.0, 599.0), (100.0, 450.0), (650.0, 20.0)] {
            let c = shade(Vec2::new(x, y), &inputs);
            assert!(c.to_array().iter().all(|v| v.is_finite()));
            assert!(c.g >= config.color_start.g - 1e-4 && c.g <= config.color_end.g + 1e-4);
        }
    }
}
