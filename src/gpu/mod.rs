mod context;
mod buffers;
mod render;

pub use context::{GpuContext, GpuError};
pub use buffers::{CellBuffers, RenderParams};
pub use render::RenderPipeline;
