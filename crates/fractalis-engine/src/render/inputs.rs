use bytemuck::{Pod, Zeroable};

use crate::config::RenderConfig;
use crate::coords::{Rgb, Vec2};

/// The seven per-frame inputs of the fractal program, laid out as its uniform block.
///
/// WGSL offsets: `resolution` 0, `pointer` 8, `color_start` 16, `time` 28,
/// `color_end` 32, `speed` 44, `strength` 48; the block is padded to 64 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FractalInputs {
    pub resolution: [f32; 2],
    pub pointer: [f32; 2],
    pub color_start: [f32; 3],
    pub time: f32,
    pub color_end: [f32; 3],
    pub speed: f32,
    pub strength: f32,
    pub _pad: [f32; 3],
}

impl FractalInputs {
    /// Size of the uniform block in bytes.
    pub const SIZE: u64 = std::mem::size_of::<FractalInputs>() as u64;

    pub fn new(resolution: Vec2, pointer: Vec2, time: f32, config: &RenderConfig) -> Self {
        Self {
            resolution: resolution.to_array(),
            pointer: pointer.to_array(),
            color_start: config.color_start.to_array(),
            time,
            color_end: config.color_end.to_array(),
            speed: config.animation_speed,
            strength: config.interaction_strength,
            _pad: [0.0; 3],
        }
    }

    #[inline]
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.resolution[0], self.resolution[1])
    }

    #[inline]
    pub fn pointer(&self) -> Vec2 {
        Vec2::new(self.pointer[0], self.pointer[1])
    }

    #[inline]
    pub fn color_start(&self) -> Rgb {
        Rgb::from(self.color_start)
    }

    #[inline]
    pub fn color_end(&self) -> Rgb {
        Rgb::from(self.color_end)
    }
}

#[cfg(test)]
mod tests {
    use std::mem::offset_of;

    use super::*;

    #[test]
    fn layout_matches_wgsl_uniform_block() {
        assert_eq!(FractalInputs::SIZE, 64);
        assert_eq!(offset_of!(FractalInputs, resolution), 0);
        assert_eq!(offset_of!(FractalInputs, pointer), 8);
        assert_eq!(offset_of!(FractalInputs, color_start), 16);
        assert_eq!(offset_of!(FractalInputs, time), 28);
        assert_eq!(offset_of!(FractalInputs, color_end), 32);
        assert_eq!(offset_of!(FractalInputs, speed), 44);
        assert_eq!(offset_of!(FractalInputs, strength), 48);
    }

    #[test]
    fn new_copies_config_verbatim() {
        let config = RenderConfig {
            color_start: Rgb::new(0.3, 0.2, 0.1),
            color_end: Rgb::new(0.7, 0.8, 0.9),
            interaction_enabled: true,
            interaction_strength: 2.5,
            animation_speed: -0.5,
        };

        let inputs = FractalInputs::new(Vec2::new(640.0, 480.0), Vec2::new(1.0, 2.0), 3.5, &config);

        assert_eq!(inputs.resolution(), Vec2::new(640.0, 480.0));
        assert_eq!(inputs.pointer(), Vec2::new(1.0, 2.0));
        assert_eq!(inputs.time, 3.5);
        assert_eq!(inputs.color_start(), config.color_start);
        assert_eq!(inputs.color_end(), config.color_end);
        assert_eq!(inputs.speed, -0.5);
        assert_eq!(inputs.strength, 2.5);
    }
}
