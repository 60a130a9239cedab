mod app;
mod config;
mod gpu;
mod input;
mod simulation;

use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::App;
use crate::config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Conway's Game of Life");
    let config = Config::load();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
