use winit::window::Window;

use crate::device::{Gpu, GpuInit};
use crate::error::SetupError;
use crate::render::FrameScheduler;
use crate::surface::SurfaceHost;

/// Hands out the runtime's window, registered under `name`, as a drawable.
pub(crate) struct WindowHost<'w> {
    window: &'w Window,
    name: String,
    init: GpuInit,
}

impl<'w> WindowHost<'w> {
    pub(crate) fn new(window: &'w Window, name: impl Into<String>, init: GpuInit) -> Self {
        Self {
            window,
            name: name.into(),
            init,
        }
    }
}

impl<'w> SurfaceHost for WindowHost<'w> {
    type Drawable = Gpu<'w>;

    fn acquire(&mut self, id: &str) -> Result<Gpu<'w>, SetupError> {
        if id != self.name {
            return Err(SetupError::surface_unavailable(
                id,
                format!("no drawable registered under this id (window is `{}`)", self.name),
            ));
        }

        pollster::block_on(Gpu::new(self.window, self.init.clone()))
            .map_err(|e| SetupError::surface_unavailable(id, format!("{e:#}")))
    }
}

/// Re-arms the frame loop by asking winit for another `RedrawRequested`.
pub(crate) struct RedrawScheduler<'a> {
    pub(crate) window: &'a Window,
}

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }
}
