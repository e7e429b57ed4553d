mod app;
mod platform;
mod window;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};
use wirebox_common::config;
use wirebox_render::DebugTextRenderer;

use crate::app::{App, LoopState};
use crate::window::GpuApp;

#[derive(Parser)]
#[command(name = "wirebox", about = "Rigid-body sandbox with a wireframe debug view")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Run the simulation without a window, printing a text summary
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,
}

/// Fixed-dt loop against the text renderer. Stops early if the app closes.
fn run_headless(mut app: App, frames: u64) -> Result<()> {
    let mut renderer = DebugTextRenderer::new();
    for _ in 0..frames {
        if app.frame(config::FIXED_TIMESTEP, &mut renderer) == LoopState::Closing {
            break;
        }
    }

    let ball = app.layout().ball;
    if let Some(pose) = app.scene().pose(ball) {
        tracing::info!(
            frames = app.frames(),
            x = pose.position.x,
            y = pose.position.y,
            "headless run finished"
        );
    }
    print!("{}", renderer.last_frame());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!("wirebox starting");

    let app = App::new()?;
    if cli.headless {
        return run_headless(app, cli.frames);
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut gpu_app = GpuApp::new(app);
    event_loop.run_app(&mut gpu_app)?;

    if let Some(err) = gpu_app.take_init_error() {
        return Err(err.into());
    }
    Ok(())
}
