mod plasma;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use pulse_engine::config::{DownscaleFactor, HostConfig};
use pulse_engine::device::GpuInit;
use pulse_engine::host::{Bootstrap, Host};
use pulse_engine::logging::{init_logging, LoggingConfig};
use pulse_engine::surface::PixelSurface;
use pulse_engine::window::{Runtime, RuntimeConfig};

use plasma::Plasma;

/// Render at one third of the window's linear resolution unless
/// `PULSE_DOWNSCALE` says otherwise.
const DEFAULT_DOWNSCALE: u32 = 3;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let defaults = HostConfig::with_downscale(DownscaleFactor::new(DEFAULT_DOWNSCALE)?);
    let config = HostConfig::from_env(defaults).context("invalid host configuration")?;
    log::info!("pulse studio starting (downscale {})", config.downscale.get());

    let module = pollster::block_on(Bootstrap::load(async { Ok(Plasma::new()) }))?;
    let host = Host::new(module, PixelSurface::default(), &config);

    Runtime::run(
        RuntimeConfig {
            title: "pulse studio".to_string(),
            initial_size: LogicalSize::new(960.0, 540.0),
        },
        GpuInit::default(),
        host,
    )
}
