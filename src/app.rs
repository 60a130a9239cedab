use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{Config, IDLE_FPS};
use crate::gpu::{CellBuffers, GpuContext, GpuError, RenderParams, RenderPipeline};
use crate::input::{command_for_key, log_controls, pixel_to_cell};
use crate::simulation::{Command, Grid, RunState, SimulationController};

const WINDOW_TITLE: &str = "Conway's Game of Life";

/// Everything needed to draw the grid, created once the window exists
struct Renderer {
    gpu: GpuContext,
    buffers: CellBuffers,
    pipeline: RenderPipeline,
    bind_group: wgpu::BindGroup,
    grid_size: u32,
    cell_size: (u32, u32),
}

impl Renderer {
    fn new(window: Arc<Window>, config: &Config, grid: &Grid) -> Result<Self, GpuError> {
        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let grid_size = grid.size() as u32;
        let cell_size = config.cell_size();
        let params = RenderParams::new(grid_size, cell_size, window.scale_factor());
        let buffers = CellBuffers::new(&gpu.device, &gpu.queue, grid, &params);

        log::info!("Creating render pipeline...");
        let pipeline = RenderPipeline::new(&gpu.device, gpu.format());
        let bind_group = pipeline.create_bind_group(
            &gpu.device,
            &buffers.cells_buffer,
            &buffers.render_params_buffer,
        );

        Ok(Self {
            gpu,
            buffers,
            pipeline,
            bind_group,
            grid_size,
            cell_size,
        })
    }

    fn rescale(&self, scale_factor: f64) {
        let params = RenderParams::new(self.grid_size, self.cell_size, scale_factor);
        self.buffers.update_render_params(&self.gpu.queue, &params);
    }

    fn render(&mut self, grid: &Grid) {
        self.buffers.update_cells(&self.gpu.queue, grid);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure surface
                self.gpu.surface.configure(&self.gpu.device, &self.gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        self.pipeline.draw(&mut encoder, &view, &self.bind_group);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

/// Application state
pub struct App {
    config: Config,
    controller: SimulationController,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    cursor: Option<PhysicalPosition<f64>>,
    clock: FrameClock,
    title: String,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            controller: SimulationController::new(config.grid_size),
            config,
            window: None,
            renderer: None,
            cursor: None,
            clock: FrameClock::new(Instant::now()),
            title: String::new(),
        }
    }

    /// Frames per second for the current state
    fn frame_rate(&self) -> u32 {
        match self.controller.state() {
            RunState::Idle => IDLE_FPS,
            RunState::Running => self.config.simulation_speed,
        }
    }

    fn handle_command(&mut self, command: Command) {
        if self.controller.handle(command) {
            log::debug!(
                "{:?}: generation {}, history depth {}",
                command,
                self.controller.generation(),
                self.controller.history().len()
            );
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        if let Some(command) = command_for_key(key_code) {
            self.handle_command(command);
        }
    }

    fn handle_click(&mut self) {
        let (Some(window), Some(position)) = (&self.window, self.cursor) else {
            return;
        };

        let logical = position.to_logical::<f64>(window.scale_factor());
        let (cell_width, cell_height) = self.config.cell_size();
        if let Some((x, y)) = pixel_to_cell(logical.x, logical.y, cell_width, cell_height) {
            self.handle_command(Command::Toggle { x, y });
        }
    }

    fn update_title(&mut self) {
        let status = match self.controller.state() {
            RunState::Idle => "",
            RunState::Running => " [Running]",
        };
        let title = format!(
            "{} - Generation: {}{}",
            WINDOW_TITLE,
            self.controller.generation(),
            status
        );

        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing {}...", WINDOW_TITLE);

        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match Renderer::new(window.clone(), &self.config, self.controller.grid()) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to initialize rendering: {}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Initialization complete!");
        log_controls();

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.update_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_click();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    log::debug!("Window resized to {}x{}", new_size.width, new_size.height);
                    renderer.gpu.resize(new_size);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(renderer) = &self.renderer {
                    renderer.rescale(scale_factor);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.render(self.controller.grid());
                }
                self.update_title();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if self.clock.is_due(now) {
            // One generation per frame while auto-running; no-op when idle
            self.controller.tick();
            self.clock.schedule(now, self.frame_rate());

            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_frame()));
    }
}

/// Caps the loop at a fixed number of frames per second
struct FrameClock {
    next_frame: Instant,
}

impl FrameClock {
    fn new(now: Instant) -> Self {
        Self { next_frame: now }
    }

    fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Schedule the next frame one period after `now`
    fn schedule(&mut self, now: Instant, fps: u32) {
        self.next_frame = now + frame_period(fps);
    }

    fn next_frame(&self) -> Instant {
        self.next_frame
    }
}

fn frame_period(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}
