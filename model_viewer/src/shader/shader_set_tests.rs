use glam::Mat4;
use crate::test_support::mock_context;
use crate::shader::{LightingParams, Shader, ShaderKind, TextureSlot};
use super::*;

#[test]
fn test_get_mut_selects_by_kind() {
    let mut shaders = ShaderSet::new();
    assert_eq!(shaders.get_mut(ShaderKind::Model).kind(), ShaderKind::Model);
    assert_eq!(shaders.get_mut(ShaderKind::DebugPrimitive).kind(), ShaderKind::DebugPrimitive);
}

#[test]
fn test_begin_pass_pushes_view_into_both_shaders() {
    let (_device, context) = mock_context();
    let mut shaders = ShaderSet::new();
    shaders.begin_pass(context.world(), context.defaults(), true);

    assert_eq!(shaders.model.uniforms().view, *context.world().view_matrix());
    assert_eq!(shaders.debug_prim.uniforms().projection, *context.world().projection_matrix());
    assert_ne!(shaders.model.uniforms().view, Mat4::IDENTITY);
}

#[test]
fn test_begin_pass_resets_every_slot_to_defaults() {
    let (_device, context) = mock_context();
    let mut shaders = ShaderSet::new();
    shaders.model.set_texture(TextureSlot::Diffuse, context.defaults().normal.clone());
    shaders.begin_pass(context.world(), context.defaults(), false);

    let labels: Vec<String> = TextureSlot::ALL
        .iter()
        .map(|slot| shaders.model.texture(*slot).unwrap().info().label.clone())
        .collect();
    assert_eq!(labels, vec![
        "default_diffuse", "default_specular", "default_normal",
        "default_diffuse", "default_diffuse",
    ]);
    assert_eq!(shaders.model.lighting(), LightingParams::FULLBRIGHT);
}

#[test]
fn test_begin_pass_resets_world_matrices_and_vertex_color() {
    let (_device, context) = mock_context();
    let mut shaders = ShaderSet::new();
    let placed = Mat4::from_translation(glam::Vec3::new(4.0, 0.0, -2.0));
    shaders.model.set_world_matrix(placed);
    shaders.debug_prim.set_world_matrix(placed);
    shaders.debug_prim.set_vertex_color_enabled(false);

    shaders.begin_pass(context.world(), context.defaults(), true);

    assert_eq!(shaders.model.uniforms().world, Mat4::IDENTITY);
    assert_eq!(shaders.debug_prim.uniforms().world, Mat4::IDENTITY);
    assert!(shaders.debug_prim.vertex_color_enabled());
}
