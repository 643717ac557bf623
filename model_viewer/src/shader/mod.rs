/// Shader variants and the per-pass shader set

mod shader;
mod model_shader;
mod debug_prim_shader;
mod shader_set;

pub use shader::{Shader, ShaderKind, ShaderCaps, TextureSlot};
pub use model_shader::{ModelShader, ModelUniforms, LightingParams};
pub use debug_prim_shader::{DebugPrimShader, DebugPrimUniforms};
pub use shader_set::ShaderSet;
