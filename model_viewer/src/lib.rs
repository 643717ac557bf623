/*!
# Model Viewer

Interactive renderer for previously parsed 3D game assets.

The viewer draws model instances through a GPU abstraction, in a fixed
sequence of passes per frame, while background threads keep loading new
content into the scene.

## Architecture

- **FrameScheduler**: runs the Opaque, AlphaEdge, DbgPrim, GUI and
  GUILoadingTasks passes and contains per-pass failures
- **SceneRegistry**: thread-safe set of live instances, culled and sorted
  back to front each frame
- **SubmeshRenderer**: GPU buffers, LOD face sets and texture slots of one
  mesh part
- **TexturePool**: DXT texture decoding with a process-wide cache by name
- **RenderContext**: explicit owner of device, shaders, default textures,
  camera and configuration

Backends implement `GraphicsDevice` and `CommandList`.
*/

// Internal modules
mod error;
mod config;
pub mod log;
mod device;
mod camera;
mod shader;
mod asset;
mod texture;
mod model;
mod scene;
mod context;
mod frame;

#[cfg(test)]
mod test_support;

// Main viewer namespace module
pub mod viewer {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::{ViewerConfig, LodMode, LodSettings, LOD_MAX};

    // Render context and its per-thread views
    pub use crate::context::{RenderContext, LoadContext, DrawContext, DefaultTextures};

    // Scene and frame driving
    pub use crate::scene::{SceneRegistry, InstanceKey, SceneStats};
    pub use crate::frame::{
        FrameScheduler, FrameReport, FrameCounter, DrawStep,
        DebugPrimitive, DebugPrimitives, OverlayLayer,
    };

    // Backend entry points
    pub use crate::device::{GraphicsDevice, CommandList, Viewport};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger};
    }

    // Render sub-module: GPU abstraction and shaders
    pub mod render {
        pub use crate::device::*;
        pub use crate::shader::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Asset input sub-module
    pub mod asset {
        pub use crate::asset::*;
    }

    // Texture decoding sub-module
    pub mod texture {
        pub use crate::texture::*;
    }

    // Model sub-module
    pub mod model {
        pub use crate::model::*;
    }
}

// Re-export math library at crate root
pub use glam;
