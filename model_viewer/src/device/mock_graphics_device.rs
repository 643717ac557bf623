/// Mock graphics device for unit tests (no GPU required)
///
/// Records every command into a shared transcript and tracks live GPU
/// resources so tests can assert on draw order, state changes and
/// buffer lifetimes.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::shader::ShaderKind;
use crate::viewer_bail;
use super::{
    GraphicsDevice, DeviceStats, CommandList,
    Buffer, BufferDesc, BufferUsage, IndexType,
    Texture, TextureDesc, TextureInfo,
    PrimitiveTopology, RasterizerState, DepthStencilState, SamplerState,
    Viewport, TextLabel,
};

// ============================================================================
// Recorded commands
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    Begin,
    End,
    Clear([f32; 4]),
    SetViewport(Viewport),
    SetRasterizer(RasterizerState),
    SetDepthStencil(DepthStencilState),
    SetSampler(SamplerState),
    BindShader(ShaderKind),
    PushConstants { offset: u32, size: usize },
    BindTexture { slot: u32, label: String },
    BindVertexBuffers { vertex_size: u64, instance_size: u64 },
    BindIndexBuffer { size: u64, index_type: IndexType },
    DrawIndexedInstanced { topology: PrimitiveTopology, index_count: u32, instance_count: u32 },
    DrawText(TextLabel),
}

#[derive(Debug, Default)]
struct MockState {
    commands: Mutex<Vec<MockCommand>>,
    created_buffers: Mutex<Vec<String>>,
    created_textures: Mutex<Vec<String>>,
    live_buffers: AtomicUsize,
    live_textures: AtomicUsize,
    submitted: AtomicUsize,
    fail_draws: AtomicBool,
}

impl MockState {
    fn record(&self, command: MockCommand) {
        self.commands.lock().unwrap().push(command);
    }
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    pub data: Mutex<Vec<u8>>,
    state: Arc<MockState>,
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let end = offset + data.len() as u64;
        if end > self.size {
            viewer_bail!("viewer::mock", "buffer update out of range ({} > {})", end, self.size);
        }
        let mut contents = self.data.lock().unwrap();
        contents[offset as usize..end as usize].copy_from_slice(data);
        Ok(())
    }
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        self.state.live_buffers.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    state: Arc<MockState>,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        self.state.live_textures.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

pub struct MockCommandList {
    state: Arc<MockState>,
    recording: bool,
}

impl MockCommandList {
    fn record(&self, command: MockCommand) -> Result<()> {
        if !self.recording {
            viewer_bail!("viewer::mock", "command recorded outside begin/end: {:?}", command);
        }
        self.state.record(command);
        Ok(())
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.recording = true;
        self.record(MockCommand::Begin)
    }

    fn end(&mut self) -> Result<()> {
        self.record(MockCommand::End)?;
        self.recording = false;
        Ok(())
    }

    fn clear(&mut self, color: [f32; 4]) -> Result<()> {
        self.record(MockCommand::Clear(color))
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.record(MockCommand::SetViewport(viewport))
    }

    fn set_rasterizer_state(&mut self, state: RasterizerState) -> Result<()> {
        self.record(MockCommand::SetRasterizer(state))
    }

    fn set_depth_stencil_state(&mut self, state: DepthStencilState) -> Result<()> {
        self.record(MockCommand::SetDepthStencil(state))
    }

    fn set_sampler_state(&mut self, state: SamplerState) -> Result<()> {
        self.record(MockCommand::SetSampler(state))
    }

    fn bind_shader(&mut self, kind: ShaderKind) -> Result<()> {
        self.record(MockCommand::BindShader(kind))
    }

    fn push_constants(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        self.record(MockCommand::PushConstants { offset, size: data.len() })
    }

    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.record(MockCommand::BindTexture { slot, label: texture.info().label.clone() })
    }

    fn bind_vertex_buffers(
        &mut self,
        vertices: &Arc<dyn Buffer>,
        instances: &Arc<dyn Buffer>,
    ) -> Result<()> {
        self.record(MockCommand::BindVertexBuffers {
            vertex_size: vertices.size(),
            instance_size: instances.size(),
        })
    }

    fn bind_index_buffer(&mut self, buffer: &Arc<dyn Buffer>, index_type: IndexType) -> Result<()> {
        self.record(MockCommand::BindIndexBuffer { size: buffer.size(), index_type })
    }

    fn draw_indexed_instanced(
        &mut self,
        topology: PrimitiveTopology,
        index_count: u32,
        instance_count: u32,
    ) -> Result<()> {
        if self.state.fail_draws.load(Ordering::SeqCst) {
            viewer_bail!("viewer::mock", "injected draw failure");
        }
        self.record(MockCommand::DrawIndexedInstanced { topology, index_count, instance_count })
    }

    fn draw_text(&mut self, label: &TextLabel) -> Result<()> {
        self.record(MockCommand::DrawText(label.clone()))
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock device that tracks created resources and recorded commands without a GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    state: Arc<MockState>,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mock device already wrapped for sharing
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Every command recorded so far
    pub fn commands(&self) -> Vec<MockCommand> {
        self.state.commands.lock().unwrap().clone()
    }

    /// Drain the transcript
    pub fn take_commands(&self) -> Vec<MockCommand> {
        std::mem::take(&mut *self.state.commands.lock().unwrap())
    }

    /// Draw calls recorded so far
    pub fn draws(&self) -> Vec<MockCommand> {
        self.commands()
            .into_iter()
            .filter(|c| matches!(c, MockCommand::DrawIndexedInstanced { .. }))
            .collect()
    }

    /// Text labels recorded so far
    pub fn labels(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                MockCommand::DrawText(label) => Some(label.text),
                _ => None,
            })
            .collect()
    }

    /// Descriptions of created buffers
    pub fn created_buffers(&self) -> Vec<String> {
        self.state.created_buffers.lock().unwrap().clone()
    }

    /// Labels of created textures
    pub fn created_textures(&self) -> Vec<String> {
        self.state.created_textures.lock().unwrap().clone()
    }

    /// Buffers created and not yet dropped
    pub fn live_buffers(&self) -> usize {
        self.state.live_buffers.load(Ordering::SeqCst)
    }

    /// Textures created and not yet dropped
    pub fn live_textures(&self) -> usize {
        self.state.live_textures.load(Ordering::SeqCst)
    }

    /// Number of submitted command lists
    pub fn submitted(&self) -> usize {
        self.state.submitted.load(Ordering::SeqCst)
    }

    /// Make every subsequent draw call fail
    pub fn set_fail_draws(&self, fail: bool) {
        self.state.fail_draws.store(fail, Ordering::SeqCst);
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        self.state.created_buffers.lock().unwrap()
            .push(format!("{:?}_{}", desc.usage, desc.size));
        self.state.live_buffers.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockBuffer {
            size: desc.size,
            usage: desc.usage,
            data: Mutex::new(vec![0u8; desc.size as usize]),
            state: Arc::clone(&self.state),
        }))
    }

    fn create_texture(&self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        self.state.created_textures.lock().unwrap().push(desc.label.clone());
        self.state.live_textures.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockTexture {
            info: TextureInfo {
                label: desc.label,
                width: desc.width,
                height: desc.height,
                format: desc.format,
                usage: desc.usage,
                mip_levels: desc.mip_levels,
            },
            state: Arc::clone(&self.state),
        }))
    }

    fn create_command_list(&self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList {
            state: Arc::clone(&self.state),
            recording: false,
        }))
    }

    fn submit(&self, _commands: &dyn CommandList) -> Result<()> {
        self.state.submitted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }

    fn stats(&self) -> DeviceStats {
        let mut stats = DeviceStats::default();
        for command in self.state.commands.lock().unwrap().iter() {
            if let MockCommand::DrawIndexedInstanced { topology, index_count, instance_count } = command {
                stats.draw_calls += 1;
                stats.primitives += topology.primitive_count(*index_count) as u64 * *instance_count as u64;
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
