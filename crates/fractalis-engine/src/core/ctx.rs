use winit::window::Window;

use crate::device::Gpu;
use crate::render::FrameScheduler;
use crate::surface::AttachedSurface;
use crate::time::FrameTime;

/// Context passed to `core::App::on_attach`.
pub struct AttachCtx<'a, 'w> {
    pub window: &'a Window,
    pub surface: &'a AttachedSurface<Gpu<'w>>,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub surface: &'a mut AttachedSurface<Gpu<'w>>,
    pub time: FrameTime,
    pub scheduler: &'a mut dyn FrameScheduler,
}
