//! Render context - device, shaders, default textures and camera state

mod default_textures;
mod render_context;

pub use default_textures::DefaultTextures;
pub use render_context::{RenderContext, LoadContext, DrawContext};
