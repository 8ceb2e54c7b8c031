use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::error::SetupError;

use super::ctx::{AttachCtx, FrameCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Which drawable the app wants, and whether it consumes pointer moves.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SurfaceRequest {
    pub id: String,
    pub track_pointer: bool,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Drawable to attach to once the window exists.
    fn surface_request(&self) -> SurfaceRequest;

    /// Called once after the surface is attached, before the first frame.
    ///
    /// An error here is fatal: the runtime exits without drawing.
    fn on_attach(&mut self, ctx: &AttachCtx<'_, '_>) -> Result<(), SetupError>;

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called for every redraw of the attached surface.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
