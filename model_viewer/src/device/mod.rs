//! Graphics device module - the GPU abstraction consumed by the viewer

pub mod graphics_device;
pub mod buffer;
pub mod texture;
pub mod state;
pub mod command_list;

pub use graphics_device::*;
pub use buffer::*;
pub use texture::*;
pub use state::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
