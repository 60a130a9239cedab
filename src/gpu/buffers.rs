use wgpu::{Buffer, BufferUsages, Device, Queue};
use crate::config::{ALIVE_COLOR, DEAD_COLOR, GRID_LINE_COLOR};
use crate::simulation::Grid;

/// Storage buffer holding the cells plus the render parameters uniform
pub struct CellBuffers {
    /// One `GpuCell` per grid position, row-major
    pub cells_buffer: Buffer,
    /// Uniform buffer for render parameters
    pub render_params_buffer: Buffer,
    /// Grid side length
    pub grid_size: u32,
}

/// Render parameters passed to the render shader (64 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    // Grid info (16 bytes)
    pub grid_size: u32,
    pub _padding: u32,
    pub cell_width: f32,  // physical pixels
    pub cell_height: f32, // physical pixels

    // Colours (48 bytes)
    pub alive_color: [f32; 4],
    pub dead_color: [f32; 4],
    pub line_color: [f32; 4],
}

impl RenderParams {
    /// Parameters for `grid_size` cells of the given logical size, scaled to
    /// physical pixels
    pub fn new(grid_size: u32, cell_size: (u32, u32), scale_factor: f64) -> Self {
        Self {
            grid_size,
            _padding: 0,
            cell_width: (cell_size.0 as f64 * scale_factor) as f32,
            cell_height: (cell_size.1 as f64 * scale_factor) as f32,
            alive_color: ALIVE_COLOR,
            dead_color: DEAD_COLOR,
            line_color: GRID_LINE_COLOR,
        }
    }
}

impl CellBuffers {
    /// Create the buffers and upload the initial grid
    pub fn new(device: &Device, queue: &Queue, grid: &Grid, params: &RenderParams) -> Self {
        let cells = grid.to_gpu_cells();
        let buffer_size = std::mem::size_of_val(cells.as_slice()) as u64;

        let cells_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cells-buffer"),
            size: buffer_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let render_params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        queue.write_buffer(&cells_buffer, 0, bytemuck::cast_slice(&cells));
        queue.write_buffer(&render_params_buffer, 0, bytemuck::bytes_of(params));

        Self {
            cells_buffer,
            render_params_buffer,
            grid_size: grid.size() as u32,
        }
    }

    /// Upload the current cell values
    pub fn update_cells(&self, queue: &Queue, grid: &Grid) {
        debug_assert_eq!(grid.size() as u32, self.grid_size, "grid size changed");
        let cells = grid.to_gpu_cells();
        queue.write_buffer(&self.cells_buffer, 0, bytemuck::cast_slice(&cells));
    }

    /// Update render parameters, e.g. after a scale factor change
    pub fn update_render_params(&self, queue: &Queue, params: &RenderParams) {
        queue.write_buffer(&self.render_params_buffer, 0, bytemuck::bytes_of(params));
    }
}
