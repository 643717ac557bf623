/// GraphicsDevice trait - resource factory and command submission

use std::sync::Arc;
use crate::error::Result;
use super::{Buffer, BufferDesc, Texture, TextureDesc, CommandList};

/// Device statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// Number of draw calls submitted in the last frame
    pub draw_calls: u32,
    /// Number of primitives submitted in the last frame
    pub primitives: u64,
    /// GPU memory used by live buffers and textures (bytes)
    pub gpu_memory_used: u64,
}

/// GPU device abstraction.
///
/// Resource creation takes `&self` so background loader threads can build
/// buffers and textures through a shared `Arc<dyn GraphicsDevice>` while the
/// render thread records a frame. Resources are destroyed when their last
/// `Arc` is dropped.
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer
    fn create_buffer(&self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a texture, uploading any initial data in `desc`
    fn create_texture(&self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a command list for recording one frame
    fn create_command_list(&self) -> Result<Box<dyn CommandList>>;

    /// Submit a recorded command list
    fn submit(&self, commands: &dyn CommandList) -> Result<()>;

    /// Wait for all GPU operations to complete
    fn wait_idle(&self) -> Result<()>;

    /// Statistics about the device
    fn stats(&self) -> DeviceStats;
}
