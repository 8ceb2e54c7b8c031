//! Fractalis engine crate.
//!
//! This crate owns the platform + GPU runtime pieces and the two components that
//! paint the fractal: the surface manager and the render pipeline.

pub mod config;
pub mod core;
pub mod device;
pub mod error;
pub mod fractal;
pub mod render;
pub mod surface;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;

pub use error::{SetupError, ShaderStage};

#[cfg(test)]
pub(crate) mod testing;
