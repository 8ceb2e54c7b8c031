//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, registers the window as a
//! drawable and forwards resize, pointer and redraw events to the attached surface.

mod host;
mod runtime;

pub use runtime::{Runtime, RuntimeConfig, WindowMode};
pub use winit::dpi::LogicalSize;
