use std::ops::Range;

use crate::device::SurfaceErrorAction;
use crate::error::SetupError;
use crate::surface::Drawable;

use super::geometry::QuadVertex;
use super::inputs::FractalInputs;
use super::program::ProgramSource;

/// GPU operations the fractal pipeline needs.
///
/// `Context<'c>` is the drawable that also carries the GPU drawing context; it
/// is generic over the window borrow so a backend can outlive any one window.
pub trait RenderBackend {
    type Context<'c>: Drawable;
    type Program;
    type Geometry;

    /// Checks, compiles and links the program and creates its input storage.
    fn compile_program(
        &mut self,
        ctx: &Self::Context<'_>,
        source: &ProgramSource<'_>,
    ) -> Result<Self::Program, SetupError>;

    /// Uploads a static vertex list.
    fn create_geometry(&mut self, ctx: &Self::Context<'_>, vertices: &[QuadVertex]) -> Self::Geometry;

    /// Replaces the program inputs used by the next draw.
    fn write_inputs(&mut self, ctx: &Self::Context<'_>, program: &Self::Program, inputs: &FractalInputs);

    /// Draws `vertices` of `geometry` with `program` into the next surface image.
    fn draw(
        &mut self,
        ctx: &mut Self::Context<'_>,
        program: &Self::Program,
        geometry: &Self::Geometry,
        vertices: Range<u32>,
    ) -> Result<(), SurfaceErrorAction>;
}

/// Asks the host for one more frame callback.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}
