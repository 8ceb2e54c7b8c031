use std::time::Instant;

use crate::config::RenderConfig;
use crate::core::AppControl;
use crate::device::SurfaceErrorAction;
use crate::error::SetupError;
use crate::surface::AttachedSurface;

use super::backend::{FrameScheduler, RenderBackend};
use super::geometry::{FULL_SURFACE, FULL_SURFACE_VERTEX_COUNT};
use super::inputs::FractalInputs;
use super::program::ProgramSource;

/// The compiled fractal program, its full-surface geometry and the per-frame step.
///
/// Program and geometry are created once in [`FractalPipeline::new`]. Each
/// [`frame`](FractalPipeline::frame) only rewrites the inputs, draws, and re-arms.
pub struct FractalPipeline<B: RenderBackend> {
    backend: B,
    program: B::Program,
    geometry: B::Geometry,
    config: RenderConfig,
    start: Instant,
    frames: u64,
}

impl<B: RenderBackend> FractalPipeline<B> {
    /// Compiles `source` and uploads the full-surface quad.
    ///
    /// Elapsed time for every later frame is measured from the moment this
    /// returns, so compile and upload time is not part of the animation.
    pub fn new(
        mut backend: B,
        ctx: &B::Context<'_>,
        source: &ProgramSource<'_>,
        config: RenderConfig,
    ) -> Result<Self, SetupError> {
        let program = backend.compile_program(ctx, source)?;
        let geometry = backend.create_geometry(ctx, &FULL_SURFACE);

        log::info!("fractal program compiled and linked");

        Ok(Self {
            backend,
            program,
            geometry,
            config,
            start: Instant::now(),
            frames: 0,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of frames that reached the draw call.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds between construction and `now`.
    pub fn elapsed(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.start).as_secs_f32()
    }

    /// Program inputs for a frame at `now` on `surface`.
    pub fn inputs<D>(&self, now: Instant, surface: &AttachedSurface<D>) -> FractalInputs {
        FractalInputs::new(
            surface.resolution(),
            surface.pointer(),
            self.elapsed(now),
            &self.config,
        )
    }

    /// Updates the inputs, draws the six vertices and requests the next frame.
    ///
    /// An empty surface draws nothing and does not re-arm; the host requests a
    /// redraw again once it has a size. A fatal surface error ends the loop.
    pub fn frame<'w>(
        &mut self,
        now: Instant,
        surface: &mut AttachedSurface<B::Context<'w>>,
        scheduler: &mut dyn FrameScheduler,
    ) -> AppControl {
        if surface.is_empty() {
            log::trace!("surface `{}` is empty; frame skipped", surface.id());
            return AppControl::Continue;
        }

        let inputs = self.inputs(now, surface);
        self.backend
            .write_inputs(surface.drawable(), &self.program, &inputs);

        match self.backend.draw(
            surface.drawable_mut(),
            &self.program,
            &self.geometry,
            0..FULL_SURFACE_VERTEX_COUNT,
        ) {
            Ok(()) => self.frames += 1,
            Err(SurfaceErrorAction::Fatal) => {
                log::error!("surface `{}` failed fatally; stopping", surface.id());
                return AppControl::Exit;
            }
            Err(action) => log::debug!("frame not presented: {action:?}"),
        }

        scheduler.request_frame();
        AppControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use winit::dpi::PhysicalSize;

    use super::*;
    use crate::coords::{Rgb, Vec2};
    use crate::error::ShaderStage;
    use crate::testing::{attached, CountingScheduler, RecordingBackend};

    /// Builds a pipeline and returns it with an instant taken right after construction.
    fn pipeline(config: RenderConfig) -> (FractalPipeline<RecordingBackend>, Instant) {
        let surface = attached(800, 600, true);
        let pipeline = FractalPipeline::new(
            RecordingBackend::default(),
            surface.drawable(),
            &ProgramSource::FRACTAL,
            config,
        )
        .unwrap();
        (pipeline, Instant::now())
    }

    #[test]
    fn construction_compiles_once_and_uploads_six_vertices() {
        let (pipeline, _) = pipeline(RenderConfig::default());

        assert_eq!(pipeline.backend().compiled, 1);
        assert_eq!(pipeline.backend().uploads, vec![FULL_SURFACE.to_vec()]);
    }

    #[test]
    fn colors_reach_inputs_unmodified() {
        let config = RenderConfig {
            color_start: Rgb::new(0.9, 0.1, 0.4),
            color_end: Rgb::new(0.0, 1.0, 0.25),
            ..RenderConfig::default()
        };
        let (mut pipeline, start) = pipeline(config);
        let mut surface = attached(800, 600, true);
        let mut scheduler = CountingScheduler::default();

        pipeline.frame(start, &mut surface, &mut scheduler);

        let written = pipeline.backend().writes[0];
        assert_eq!(written.color_start(), config.color_start);
        assert_eq!(written.color_end(), config.color_end);
        assert_eq!(written.speed, config.animation_speed);
        assert_eq!(written.strength, config.interaction_strength);
    }

    #[test]
    fn each_frame_draws_once_and_rearms_once() {
        let (mut pipeline, start) = pipeline(RenderConfig::default());
        let mut surface = attached(800, 600, true);
        let mut scheduler = CountingScheduler::default();

        for i in 0..3 {
            let control = pipeline.frame(start + Duration::from_millis(16 * i), &mut surface, &mut scheduler);
            assert_eq!(control, AppControl::Continue);
        }

        assert_eq!(scheduler.requests, 3);
        assert_eq!(pipeline.backend().draws, vec![0..6, 0..6, 0..6]);
        assert_eq!(pipeline.frames(), 3);
    }

    #[test]
    fn elapsed_is_measured_from_construction() {
        let (mut pipeline, built) = pipeline(RenderConfig::default());
        let mut surface = attached(800, 600, true);
        let mut scheduler = CountingScheduler::default();

        pipeline.frame(built + Duration::from_millis(2500), &mut surface, &mut scheduler);

        // The pipeline's own start lies between the compile and `built`.
        let time = pipeline.backend().writes[0].time;
        assert!((2.5..2.6).contains(&time), "time = {time}");
    }

    #[test]
    fn first_frame_after_construction_starts_near_zero() {
        let surface_before = attached(800, 600, true);
        let before = Instant::now();
        let mut pipeline = FractalPipeline::new(
            RecordingBackend::default(),
            surface_before.drawable(),
            &ProgramSource::FRACTAL,
            RenderConfig::default(),
        )
        .unwrap();
        let mut surface = attached(800, 600, true);
        let mut scheduler = CountingScheduler::default();

        // A frame stamped before construction finished clamps to zero.
        pipeline.frame(before, &mut surface, &mut scheduler);
        pipeline.frame(Instant::now(), &mut surface, &mut scheduler);

        let writes = &pipeline.backend().writes;
        assert_eq!(writes[0].time, 0.0);
        assert!(writes[1].time < 0.1, "time = {}", writes[1].time);
    }

    #[test]
    fn inputs_follow_surface_size_and_pointer() {
        let (mut pipeline, start) = pipeline(RenderConfig::default());
        let mut surface = attached(800, 600, true);
        let mut scheduler = CountingScheduler::default();

        surface.drawable_mut().viewport = PhysicalSize::new(1024, 768);
        surface.sync_size();
        surface.on_pointer_move(100.0, 68.0);
        pipeline.frame(start, &mut surface, &mut scheduler);

        let written = pipeline.backend().writes[0];
        assert_eq!(written.resolution(), Vec2::new(1024.0, 768.0));
        assert_eq!(written.pointer(), Vec2::new(100.0, 700.0));
    }

    #[test]
    fn compile_failure_stops_before_geometry() {
        let surface = attached(800, 600, true);
        let source = ProgramSource {
            vertex: ProgramSource::FRACTAL.vertex,
            fragment: "fn fs_main( {",
        };

        let result = FractalPipeline::new(
            RecordingBackend::default(),
            surface.drawable(),
            &source,
            RenderConfig::default(),
        );

        assert!(matches!(
            result,
            Err(SetupError::Compile {
                stage: ShaderStage::Fragment,
                ..
            })
        ));
    }

    #[test]
    fn empty_surface_skips_draw_and_does_not_rearm() {
        let (mut pipeline, start) = pipeline(RenderConfig::default());
        let mut surface = attached(800, 600, true);
        let mut scheduler = CountingScheduler::default();

        surface.drawable_mut().viewport = PhysicalSize::new(0, 0);
        surface.sync_size();

        assert_eq!(pipeline.frame(start, &mut surface, &mut scheduler), AppControl::Continue);
        assert!(pipeline.backend().draws.is_empty());
        assert_eq!(scheduler.requests, 0);
    }

    #[test]
    fn transient_surface_error_still_rearms() {
        let (mut pipeline, start) = pipeline(RenderConfig::default());
        pipeline.backend.draw_result = Err(SurfaceErrorAction::SkipFrame);
        let mut surface = attached(800, 600, true);
        let mut scheduler = CountingScheduler::default();

        assert_eq!(pipeline.frame(start, &mut surface, &mut scheduler), AppControl::Continue);
        assert_eq!(scheduler.requests, 1);
        assert_eq!(pipeline.frames(), 0);
    }

    #[test]
    fn fatal_surface_error_exits_without_rearming() {
        let (mut pipeline, start) = pipeline(RenderConfig::default());
        pipeline.backend.draw_result = Err(SurfaceErrorAction::Fatal);
        let mut surface = attached(800, 600, true);
        let mut scheduler = CountingScheduler::default();

        assert_eq!(pipeline.frame(start, &mut surface, &mut scheduler), AppControl::Exit);
        assert_eq!(scheduler.requests, 0);
    }
}
