use crate::coords::Rgb;

/// Fully resolved render configuration.
///
/// Values are not range-checked. A negative speed runs the animation backwards,
/// a zero strength disables the pointer's influence without disabling tracking.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderConfig {
    /// Gradient color for points that escape immediately.
    pub color_start: Rgb,

    /// Gradient color approached by slowly escaping points.
    pub color_end: Rgb,

    /// Whether pointer-move notifications are consumed at all.
    pub interaction_enabled: bool,

    /// Scale applied to the pointer offset before it perturbs the Julia parameter.
    pub interaction_strength: f32,

    /// Multiplier on elapsed time for the parameter's automatic drift.
    pub animation_speed: f32,
}

impl RenderConfig {
    pub const DEFAULT_COLOR_START: Rgb = Rgb::new(0.05, 0.08, 0.12);
    pub const DEFAULT_COLOR_END: Rgb = Rgb::new(0.20, 0.50, 0.55);
    pub const DEFAULT_INTERACTION_STRENGTH: f32 = 1.5;
    pub const DEFAULT_ANIMATION_SPEED: f32 = 1.0;
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color_start: Self::DEFAULT_COLOR_START,
            color_end: Self::DEFAULT_COLOR_END,
            interaction_enabled: true,
            interaction_strength: Self::DEFAULT_INTERACTION_STRENGTH,
            animation_speed: Self::DEFAULT_ANIMATION_SPEED,
        }
    }
}
