use crate::device::mock_graphics_device::MockCommand;
use crate::device::GraphicsDevice;
use glam::Vec4;
use crate::shader::{DebugPrimShader, Shader};
use crate::test_support::mock_context;
use super::*;

#[test]
fn test_lighting_toggle() {
    let mut shader = ModelShader::new();
    assert_eq!(shader.lighting(), LightingParams::LIT);
    assert_eq!(shader.uniforms().lighting, Vec4::new(0.15, 1.0, 2.0, 1.0));

    shader.set_lighting_enabled(false);
    assert_eq!(shader.lighting(), LightingParams::FULLBRIGHT);
    assert_eq!(shader.uniforms().lighting.x, 1.0);
    assert_eq!(shader.uniforms().lighting.y, 0.0);
    assert!(shader.uniforms().lighting.z.is_infinite());
}

#[test]
fn test_capabilities() {
    assert!(ModelShader::new().capabilities().contains(ShaderCaps::TEXTURES));
    assert!(!DebugPrimShader::new().capabilities().contains(ShaderCaps::TEXTURES));
    assert!(DebugPrimShader::new().capabilities().contains(ShaderCaps::VERTEX_COLOR));
}

#[test]
fn test_apply_pass_binds_program_constants_and_textures() {
    let (device, context) = mock_context();
    let mut shader = ModelShader::new();
    shader.set_texture(TextureSlot::Diffuse, context.defaults().diffuse.clone());
    shader.set_texture(TextureSlot::Normal, context.defaults().normal.clone());

    let mut cmd = device.create_command_list().unwrap();
    cmd.begin().unwrap();
    device.take_commands();
    shader.apply_pass(cmd.as_mut()).unwrap();

    assert_eq!(device.take_commands(), vec![
        MockCommand::BindShader(ShaderKind::Model),
        MockCommand::PushConstants { offset: 0, size: std::mem::size_of::<ModelUniforms>() },
        MockCommand::BindTexture { slot: 0, label: "default_diffuse".to_string() },
        MockCommand::BindTexture { slot: 2, label: "default_normal".to_string() },
    ]);
}

#[test]
fn test_debug_prim_vertex_color_flag() {
    let mut shader = DebugPrimShader::new();
    assert!(shader.vertex_color_enabled());
    shader.set_vertex_color_enabled(false);
    assert!(!shader.vertex_color_enabled());
    shader.set_vertex_color_enabled(true);
    assert!(shader.vertex_color_enabled());
}

#[test]
fn test_debug_prim_ignores_textures() {
    let (device, context) = mock_context();
    let mut shader = DebugPrimShader::new();
    shader.set_texture(TextureSlot::Diffuse, context.defaults().diffuse.clone());

    let mut cmd = device.create_command_list().unwrap();
    cmd.begin().unwrap();
    device.take_commands();
    shader.apply_pass(cmd.as_mut()).unwrap();

    let commands = device.take_commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0], MockCommand::BindShader(ShaderKind::DebugPrimitive));
}
