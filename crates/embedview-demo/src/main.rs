use anyhow::Result;

use embedview::coords::LogicalSize;
use embedview::device::{GpuInit, WgpuEngine};
use embedview::logging::{init_logging, LoggingConfig};
use embedview::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "embedview demo".to_string(),
        initial_size: LogicalSize::new(960.0, 540.0),
    };

    let gpu = GpuInit {
        clear_color: wgpu::Color {
            r: 0.05,
            g: 0.08,
            b: 0.12,
            a: 1.0,
        },
        ..GpuInit::default()
    };

    log::info!("hosting wgpu engine in \"{}\"", config.title);
    Runtime::run(config, move || WgpuEngine::new(gpu.clone()))
}
