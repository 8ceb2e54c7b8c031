//! Render pipeline for the fractal.
//!
//! The pipeline owns one compiled program and one static full-surface quad.
//! Every frame it rewrites the program inputs, issues a single six-vertex draw
//! and asks a [`FrameScheduler`] for the next frame.
//!
//! Convention:
//! - Geometry is in normalized device coordinates.
//! - Pixel coordinates handed to the program have a bottom-left origin.

mod backend;
mod geometry;
mod inputs;
mod pipeline;
pub mod program;
mod wgpu_backend;

pub use backend::{FrameScheduler, RenderBackend};
pub use geometry::{QuadVertex, FULL_SURFACE, FULL_SURFACE_VERTEX_COUNT};
pub use inputs::FractalInputs;
pub use pipeline::FractalPipeline;
pub use program::{CheckedProgram, ProgramSource};
pub use wgpu_backend::{WgpuBackend, WgpuGeometry, WgpuProgram};
