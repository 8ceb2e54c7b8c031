//! Surface manager.
//!
//! Attaches to a drawable by identifier, keeps its pixel size in step with the
//! viewport and tracks the pointer in surface-local coordinates (origin
//! bottom-left, +Y up), which is the convention the fractal program expects.
//!
//! The host environment is reached through two small traits so the manager can
//! be driven without a window or a GPU:
//! - [`SurfaceHost`] resolves an identifier to a drawable with a GPU context
//! - [`Drawable`] reports the viewport size and resizes the drawing region

mod attached;
mod drawable;

pub use attached::AttachedSurface;
pub use drawable::{Drawable, SurfaceHost};
