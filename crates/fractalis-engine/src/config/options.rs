use serde::Deserialize;

use super::RenderConfig;

/// Sparse render options, as found in a settings file.
///
/// Groups mirror the dotted option names: `colors.start`, `colors.end`,
/// `interaction.enabled`, `interaction.strength`, `animation.speed`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub colors: ColorOptions,
    pub interaction: InteractionOptions,
    pub animation: AnimationOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorOptions {
    pub start: Option<[f32; 3]>,
    pub end: Option<[f32; 3]>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionOptions {
    pub enabled: Option<bool>,
    pub strength: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationOptions {
    pub speed: Option<f32>,
}

impl RenderOptions {
    /// Applies defaults to every missing field.
    pub fn resolve(&self) -> RenderConfig {
        let defaults = RenderConfig::default();

        RenderConfig {
            color_start: self.colors.start.map_or(defaults.color_start, Into::into),
            color_end: self.colors.end.map_or(defaults.color_end, Into::into),
            interaction_enabled: self
                .interaction
                .enabled
                .unwrap_or(defaults.interaction_enabled),
            interaction_strength: self
                .interaction
                .strength
                .unwrap_or(defaults.interaction_strength),
            animation_speed: self.animation.speed.unwrap_or(defaults.animation_speed),
        }
    }
}
