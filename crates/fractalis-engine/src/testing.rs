//! Test doubles for the surface and render seams.

use std::ops::Range;

use winit::dpi::PhysicalSize;

use crate::device::SurfaceErrorAction;
use crate::error::SetupError;
use crate::render::{program, FractalInputs, FrameScheduler, ProgramSource, QuadVertex, RenderBackend};
use crate::surface::{AttachedSurface, Drawable, SurfaceHost};

/// Drawable whose viewport is set directly by the test.
#[derive(Debug)]
pub(crate) struct FakeDrawable {
    pub viewport: PhysicalSize<u32>,
    pub pixels: PhysicalSize<u32>,
    pub resizes: u32,
}

impl FakeDrawable {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: PhysicalSize::new(width, height),
            pixels: PhysicalSize::new(300, 150),
            resizes: 0,
        }
    }
}

impl Drawable for FakeDrawable {
    fn viewport_size(&self) -> PhysicalSize<u32> {
        self.viewport
    }

    fn pixel_size(&self) -> PhysicalSize<u32> {
        self.pixels
    }

    fn set_pixel_size(&mut self, size: PhysicalSize<u32>) {
        self.pixels = size;
        self.resizes += 1;
    }
}

/// Host with a single registered drawable.
pub(crate) struct FakeHost {
    pub id: &'static str,
    pub viewport: (u32, u32),
    pub context_available: bool,
}

impl FakeHost {
    pub(crate) fn new(id: &'static str, width: u32, height: u32) -> Self {
        Self {
            id,
            viewport: (width, height),
            context_available: true,
        }
    }
}

impl SurfaceHost for FakeHost {
    type Drawable = FakeDrawable;

    fn acquire(&mut self, id: &str) -> Result<FakeDrawable, SetupError> {
        if id != self.id {
            return Err(SetupError::surface_unavailable(id, "no such drawable"));
        }
        if !self.context_available {
            return Err(SetupError::surface_unavailable(id, "no GPU context"));
        }
        Ok(FakeDrawable::new(self.viewport.0, self.viewport.1))
    }
}

pub(crate) fn attached(width: u32, height: u32, tracks_pointer: bool) -> AttachedSurface<FakeDrawable> {
    let mut host = FakeHost::new("backdrop", width, height);
    AttachedSurface::attach(&mut host, "backdrop", tracks_pointer).unwrap()
}

/// Backend that checks programs like the real one and records everything else.
#[derive(Debug)]
pub(crate) struct RecordingBackend {
    pub compiled: u32,
    pub uploads: Vec<Vec<QuadVertex>>,
    pub writes: Vec<FractalInputs>,
    pub draws: Vec<Range<u32>>,
    pub draw_result: Result<(), SurfaceErrorAction>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            compiled: 0,
            uploads: Vec::new(),
            writes: Vec::new(),
            draws: Vec::new(),
            draw_result: Ok(()),
        }
    }
}

impl RenderBackend for RecordingBackend {
    type Context<'c> = FakeDrawable;
    type Program = ();
    type Geometry = usize;

    fn compile_program(&mut self, _ctx: &FakeDrawable, source: &ProgramSource<'_>) -> Result<(), SetupError> {
        program::check(source)?;
        self.compiled += 1;
        Ok(())
    }

    fn create_geometry(&mut self, _ctx: &FakeDrawable, vertices: &[QuadVertex]) -> usize {
        self.uploads.push(vertices.to_vec());
        self.uploads.len() - 1
    }

    fn write_inputs(&mut self, _ctx: &FakeDrawable, _program: &(), inputs: &FractalInputs) {
        self.writes.push(*inputs);
    }

    fn draw(
        &mut self,
        _ctx: &mut FakeDrawable,
        _program: &(),
        _geometry: &usize,
        vertices: Range<u32>,
    ) -> Result<(), SurfaceErrorAction> {
        if self.draw_result.is_ok() {
            self.draws.push(vertices);
        }
        self.draw_result
    }
}

#[derive(Debug, Default)]
pub(crate) struct CountingScheduler {
    pub requests: u32,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}
