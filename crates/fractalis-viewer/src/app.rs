use fractalis_engine::config::RenderConfig;
use fractalis_engine::core::{App, AppControl, AttachCtx, FrameCtx, SurfaceRequest};
use fractalis_engine::render::{FractalPipeline, ProgramSource, WgpuBackend};
use fractalis_engine::time::FrameStats;
use fractalis_engine::SetupError;

/// Paints the animated Julia set onto the target surface.
pub struct FractalApp {
    target: String,
    config: RenderConfig,
    pipeline: Option<FractalPipeline<WgpuBackend>>,
    stats: FrameStats,
}

impl FractalApp {
    pub fn new(target: impl Into<String>, config: RenderConfig) -> Self {
        Self {
            target: target.into(),
            config,
            pipeline: None,
            stats: FrameStats::default(),
        }
    }
}

impl App for FractalApp {
    fn surface_request(&self) -> SurfaceRequest {
        SurfaceRequest {
            id: self.target.clone(),
            track_pointer: self.config.interaction_enabled,
        }
    }

    fn on_attach(&mut self, ctx: &AttachCtx<'_, '_>) -> Result<(), SetupError> {
        let pipeline = FractalPipeline::new(
            WgpuBackend::default(),
            ctx.surface.drawable(),
            &ProgramSource::FRACTAL,
            self.config,
        )?;

        self.pipeline = Some(pipeline);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(pipeline) = self.pipeline.as_mut() else {
            return AppControl::Continue;
        };

        self.stats.record(&ctx.time);
        pipeline.frame(ctx.time.now, &mut *ctx.surface, &mut *ctx.scheduler)
    }
}
