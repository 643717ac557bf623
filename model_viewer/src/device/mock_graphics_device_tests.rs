/// Unit tests for MockGraphicsDevice and associated mock types.

use std::sync::Arc;
use crate::device::mock_graphics_device::*;
use crate::device::{
    GraphicsDevice, Buffer, BufferDesc, BufferUsage, IndexType,
    TextureDesc, TextureFormat, TextureUsage, PrimitiveTopology, Viewport,
};
use crate::shader::ShaderKind;

fn buffer(device: &MockGraphicsDevice, size: u64, usage: BufferUsage) -> Arc<dyn Buffer> {
    device.create_buffer(BufferDesc { size, usage }).unwrap()
}

// ============================================================================
// Resources
// ============================================================================

#[test]
fn test_buffer_creation_and_update() {
    let device = MockGraphicsDevice::new();
    let buf = buffer(&device, 16, BufferUsage::Vertex);

    assert_eq!(buf.size(), 16);
    assert_eq!(buf.usage(), BufferUsage::Vertex);
    assert!(buf.update(8, &[1, 2, 3, 4]).is_ok());
    assert_eq!(device.created_buffers(), vec!["Vertex_16".to_string()]);
}

#[test]
fn test_buffer_update_out_of_range_fails() {
    let device = MockGraphicsDevice::new();
    let buf = buffer(&device, 4, BufferUsage::Index);

    assert!(buf.update(2, &[0; 4]).is_err());
}

#[test]
fn test_buffers_are_released_on_drop() {
    let device = MockGraphicsDevice::new();
    let a = buffer(&device, 4, BufferUsage::Vertex);
    let b = buffer(&device, 4, BufferUsage::Index);
    assert_eq!(device.live_buffers(), 2);

    drop(a);
    assert_eq!(device.live_buffers(), 1);
    drop(b);
    assert_eq!(device.live_buffers(), 0);
}

#[test]
fn test_texture_creation_keeps_info() {
    let device = MockGraphicsDevice::new();
    let texture = device.create_texture(TextureDesc {
        label: "c1000_a".to_string(),
        width: 64,
        height: 32,
        format: TextureFormat::BC3_UNORM,
        usage: TextureUsage::Sampled,
        mip_levels: 3,
        data: None,
    }).unwrap();

    let info = texture.info();
    assert_eq!(info.label, "c1000_a");
    assert_eq!((info.width, info.height, info.mip_levels), (64, 32, 3));
    assert_eq!(device.live_textures(), 1);
    drop(texture);
    assert_eq!(device.live_textures(), 0);
}

// ============================================================================
// Command recording
// ============================================================================

#[test]
fn test_command_list_records_in_order() {
    let device = MockGraphicsDevice::new();
    let vertices = buffer(&device, 64, BufferUsage::Vertex);
    let instances = buffer(&device, 64, BufferUsage::Instance);
    let indices = buffer(&device, 12, BufferUsage::Index);

    let mut cmd = device.create_command_list().unwrap();
    cmd.begin().unwrap();
    cmd.set_viewport(Viewport::new(800.0, 600.0)).unwrap();
    cmd.bind_shader(ShaderKind::Model).unwrap();
    cmd.bind_vertex_buffers(&vertices, &instances).unwrap();
    cmd.bind_index_buffer(&indices, IndexType::U16).unwrap();
    cmd.draw_indexed_instanced(PrimitiveTopology::TriangleList, 6, 1).unwrap();
    cmd.end().unwrap();
    device.submit(cmd.as_ref()).unwrap();

    assert_eq!(device.commands(), vec![
        MockCommand::Begin,
        MockCommand::SetViewport(Viewport::new(800.0, 600.0)),
        MockCommand::BindShader(ShaderKind::Model),
        MockCommand::BindVertexBuffers { vertex_size: 64, instance_size: 64 },
        MockCommand::BindIndexBuffer { size: 12, index_type: IndexType::U16 },
        MockCommand::DrawIndexedInstanced {
            topology: PrimitiveTopology::TriangleList,
            index_count: 6,
            instance_count: 1,
        },
        MockCommand::End,
    ]);
    assert_eq!(device.submitted(), 1);
}

#[test]
fn test_recording_outside_begin_fails() {
    let device = MockGraphicsDevice::new();
    let mut cmd = device.create_command_list().unwrap();

    assert!(cmd.clear([0.0; 4]).is_err());
    assert!(device.commands().is_empty());
}

#[test]
fn test_injected_draw_failure() {
    let device = MockGraphicsDevice::new();
    device.set_fail_draws(true);
    let mut cmd = device.create_command_list().unwrap();
    cmd.begin().unwrap();

    assert!(cmd.draw_indexed_instanced(PrimitiveTopology::TriangleStrip, 4, 1).is_err());
    assert!(device.draws().is_empty());

    device.set_fail_draws(false);
    assert!(cmd.draw_indexed_instanced(PrimitiveTopology::TriangleStrip, 4, 1).is_ok());
    assert_eq!(device.draws().len(), 1);
}

#[test]
fn test_stats_count_draws_and_primitives() {
    let device = MockGraphicsDevice::new();
    let mut cmd = device.create_command_list().unwrap();
    cmd.begin().unwrap();
    cmd.draw_indexed_instanced(PrimitiveTopology::TriangleList, 9, 2).unwrap();
    cmd.draw_indexed_instanced(PrimitiveTopology::TriangleStrip, 5, 1).unwrap();

    let stats = device.stats();
    assert_eq!(stats.draw_calls, 2);
    assert_eq!(stats.primitives, 3 * 2 + 3);
}

#[test]
fn test_take_commands_drains_transcript() {
    let device = MockGraphicsDevice::new();
    let mut cmd = device.create_command_list().unwrap();
    cmd.begin().unwrap();

    assert_eq!(device.take_commands(), vec![MockCommand::Begin]);
    assert!(device.commands().is_empty());
}
