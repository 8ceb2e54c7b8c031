//! Render configuration.
//!
//! `RenderOptions` is the sparse form read from settings files; every field is
//! optional. `RenderOptions::resolve` fills in the defaults once and produces the
//! immutable `RenderConfig` the render pipeline and surface manager consume.

mod options;
mod render;

pub use options::{AnimationOptions, ColorOptions, InteractionOptions, RenderOptions};
pub use render::RenderConfig;
