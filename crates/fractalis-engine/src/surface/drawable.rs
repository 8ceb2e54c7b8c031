use winit::dpi::PhysicalSize;

use crate::device::Gpu;
use crate::error::SetupError;

/// A pixel surface with an attached GPU drawing region.
pub trait Drawable {
    /// Current viewport size in physical pixels.
    fn viewport_size(&self) -> PhysicalSize<u32>;

    /// Size of the drawing region, in physical pixels.
    fn pixel_size(&self) -> PhysicalSize<u32>;

    /// Resizes the drawing region.
    fn set_pixel_size(&mut self, size: PhysicalSize<u32>);
}

/// Environment that owns drawables and hands them out by identifier.
pub trait SurfaceHost {
    type Drawable: Drawable;

    /// Looks up the drawable registered as `id` and obtains its GPU context.
    ///
    /// Fails with [`SetupError::SurfaceUnavailable`] when nothing is registered
    /// under `id` or no compatible context can be created.
    fn acquire(&mut self, id: &str) -> Result<Self::Drawable, SetupError>;
}

impl Drawable for Gpu<'_> {
    fn viewport_size(&self) -> PhysicalSize<u32> {
        self.window().inner_size()
    }

    fn pixel_size(&self) -> PhysicalSize<u32> {
        self.size()
    }

    fn set_pixel_size(&mut self, size: PhysicalSize<u32>) {
        self.resize(size);
    }
}
