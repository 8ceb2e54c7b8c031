//! Small value types shared by the surface, the render pipeline and the CPU
//! reference of the fractal.
//!
//! Surface space:
//! - physical pixels
//! - origin bottom-left
//! - +X right, +Y up

mod color;
mod vec2;

pub use color::Rgb;
pub use vec2::Vec2;
