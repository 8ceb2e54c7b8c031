use winit::dpi::PhysicalSize;

use crate::coords::Vec2;
use crate::error::SetupError;

use super::{Drawable, SurfaceHost};

/// A drawable that has been attached and is kept in sync with its viewport.
///
/// Owns the drawable plus the two pieces of per-surface state the frame step
/// reads: the current pixel size and the last pointer position.
pub struct AttachedSurface<D> {
    id: String,
    drawable: D,
    size: PhysicalSize<u32>,
    pointer: Vec2,
    tracks_pointer: bool,
}

impl<D: Drawable> AttachedSurface<D> {
    /// Attaches to the drawable registered as `id`.
    ///
    /// On success the surface is already sized to the viewport and the pointer
    /// sits at the surface center. With `tracks_pointer == false` the pointer
    /// never moves from there.
    pub fn attach<H>(host: &mut H, id: &str, tracks_pointer: bool) -> Result<Self, SetupError>
    where
        H: SurfaceHost<Drawable = D>,
    {
        let drawable = host.acquire(id)?;

        let mut surface = Self {
            id: id.to_string(),
            drawable,
            size: PhysicalSize::new(0, 0),
            pointer: Vec2::zero(),
            tracks_pointer,
        };

        surface.sync_size();
        surface.pointer = surface.resolution() * 0.5;

        log::info!(
            "attached surface `{}` at {}x{} (pointer tracking {})",
            surface.id,
            surface.size.width,
            surface.size.height,
            if tracks_pointer { "on" } else { "off" }
        );

        Ok(surface)
    }

    /// Matches the drawing region to the current viewport size.
    pub fn sync_size(&mut self) {
        let viewport = self.drawable.viewport_size();
        if viewport == self.size && self.drawable.pixel_size() == viewport {
            return;
        }

        self.drawable.set_pixel_size(viewport);
        self.size = viewport;

        log::debug!(
            "surface `{}` resized to {}x{}",
            self.id,
            viewport.width,
            viewport.height
        );
    }

    /// Records a pointer position given in raw window pixels (top-left origin).
    ///
    /// The vertical axis is flipped so the stored position grows upward.
    pub fn on_pointer_move(&mut self, raw_x: f32, raw_y: f32) {
        if !self.tracks_pointer {
            return;
        }
        self.pointer = Vec2::new(raw_x, self.size.height as f32 - raw_y);
    }
}

impl<D> AttachedSurface<D> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Current size as floating-point pixels.
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.size.width as f32, self.size.height as f32)
    }

    /// Last pointer position, surface-local with a bottom-left origin.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn tracks_pointer(&self) -> bool {
        self.tracks_pointer
    }

    /// True while the surface has no pixels (e.g. minimized window).
    pub fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    pub fn drawable(&self) -> &D {
        &self.drawable
    }

    pub fn drawable_mut(&mut self) -> &mut D {
        &mut self.drawable
    }
}
