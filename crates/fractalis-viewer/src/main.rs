mod app;
mod settings;

use anyhow::Result;

use fractalis_engine::device::GpuInit;
use fractalis_engine::logging::{init_logging, LoggingConfig};
use fractalis_engine::window::Runtime;

use app::FractalApp;
use settings::Settings;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let settings = Settings::load()?;
    let config = settings.render_options().resolve();
    log::debug!("render config: {config:?}");

    let app = FractalApp::new(settings.window.target.clone(), config);
    Runtime::run(settings.runtime_config(), GpuInit::default(), app)
}
