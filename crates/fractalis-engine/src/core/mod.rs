//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application: which surface to attach to, a one-time attach hook and a
//! per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl, SurfaceRequest};
pub use ctx::{AttachCtx, FrameCtx};
