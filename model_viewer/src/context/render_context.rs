/// RenderContext - explicit owner of all rendering state
///
/// Constructed once with `initialize` and torn down with `shutdown`.
/// Loader threads receive a `LoadContext` (device + texture pool) and the
/// render thread borrows a `DrawContext` per pass.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// use model_viewer::viewer::{RenderContext, ViewerConfig, Viewport, GraphicsDevice};
///
/// # fn run(device: Arc<dyn GraphicsDevice>) -> model_viewer::viewer::Result<()> {
/// let context = RenderContext::initialize(device, ViewerConfig::default(), Viewport::new(1280.0, 720.0))?;
/// let loader = context.load_context();
/// // ... build models with `loader` on background threads ...
/// context.shutdown()?;
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;
use crate::camera::WorldView;
use crate::config::ViewerConfig;
use crate::device::{CommandList, GraphicsDevice, RasterizerState, SamplerState, Viewport};
use crate::error::{Error, Result};
use crate::frame::DrawStep;
use crate::shader::ShaderSet;
use crate::texture::TexturePool;
use crate::{viewer_error, viewer_info};
use super::DefaultTextures;

const SOURCE: &str = "viewer::RenderContext";

/// What a background loader needs to build models
#[derive(Clone)]
pub struct LoadContext {
    pub device: Arc<dyn GraphicsDevice>,
    pub textures: Arc<TexturePool>,
}

/// Per-pass view of the render context handed to draw code
pub struct DrawContext<'a> {
    pub cmd: &'a mut dyn CommandList,
    pub world: &'a WorldView,
    pub config: &'a ViewerConfig,
    pub defaults: &'a DefaultTextures,
    pub shaders: &'a mut ShaderSet,
    /// Pass being recorded
    pub step: DrawStep,
    /// Polygon mode for the next draws
    pub wireframe: bool,
}

impl DrawContext<'_> {
    /// Rasterizer state applied before a face set draw
    pub fn rasterizer(&self, backface_culling: bool) -> RasterizerState {
        RasterizerState::from_toggles(backface_culling, self.wireframe)
    }
}

pub struct RenderContext {
    device: Arc<dyn GraphicsDevice>,
    textures: Arc<TexturePool>,
    defaults: DefaultTextures,
    shaders: ShaderSet,
    world: WorldView,
    config: ViewerConfig,
    viewport: Viewport,
}

impl RenderContext {
    fn log_and_return_error(error: Error) -> Error {
        viewer_error!(SOURCE, "{}", error);
        error
    }

    /// Validate the configuration, create the default textures and shaders
    ///
    /// # Errors
    ///
    /// * `Error::InvalidResource` - the configuration is rejected
    /// * `Error::InitializationFailed` - default textures could not be created
    pub fn initialize(
        device: Arc<dyn GraphicsDevice>,
        config: ViewerConfig,
        viewport: Viewport,
    ) -> Result<Self> {
        config.validate().map_err(Self::log_and_return_error)?;

        let defaults = DefaultTextures::create(device.as_ref())
            .map_err(|e| Self::log_and_return_error(Error::InitializationFailed(
                format!("default textures: {}", e)
            )))?;

        let textures = Arc::new(TexturePool::new(Arc::clone(&device)));

        viewer_info!(SOURCE, "Initialized ({}x{})", viewport.width, viewport.height);

        Ok(Self {
            device,
            textures,
            defaults,
            shaders: ShaderSet::new(),
            world: WorldView::new(viewport.aspect_ratio()),
            config,
            viewport,
        })
    }

    /// Replace the fallback textures
    pub fn with_default_textures(mut self, defaults: DefaultTextures) -> Self {
        self.defaults = defaults;
        self
    }

    /// Flush the texture cache and wait for the device to go idle
    pub fn shutdown(self) -> Result<()> {
        self.textures.flush();
        self.device.wait_idle()?;
        viewer_info!(SOURCE, "Shut down");
        Ok(())
    }

    /// Handle for background loaders
    pub fn load_context(&self) -> LoadContext {
        LoadContext {
            device: Arc::clone(&self.device),
            textures: Arc::clone(&self.textures),
        }
    }

    // ===== ACCESSORS =====

    pub fn device(&self) -> &Arc<dyn GraphicsDevice> {
        &self.device
    }

    pub fn textures(&self) -> &Arc<TexturePool> {
        &self.textures
    }

    pub fn defaults(&self) -> &DefaultTextures {
        &self.defaults
    }

    pub fn world(&self) -> &WorldView {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldView {
        &mut self.world
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ViewerConfig {
        &mut self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn shaders_mut(&mut self) -> &mut ShaderSet {
        &mut self.shaders
    }

    /// Apply per-pass state and borrow the context for drawing `step`.
    ///
    /// Sets the pass depth-stencil policy, the linear-wrap sampler and the
    /// base rasterizer state, then resets shader globals and default maps.
    pub fn begin_step<'a>(
        &'a mut self,
        cmd: &'a mut dyn CommandList,
        step: DrawStep,
    ) -> Result<DrawContext<'a>> {
        cmd.set_depth_stencil_state(step.depth_stencil())?;
        cmd.set_sampler_state(SamplerState::LINEAR_WRAP)?;
        cmd.set_rasterizer_state(RasterizerState::from_toggles(
            self.config.backface_culling,
            self.config.wireframe,
        ))?;
        self.shaders.begin_pass(&self.world, &self.defaults, self.config.enable_lighting);

        Ok(DrawContext {
            cmd,
            world: &self.world,
            config: &self.config,
            defaults: &self.defaults,
            shaders: &mut self.shaders,
            step,
            wireframe: self.config.wireframe,
        })
    }
}

#[cfg(test)]
#[path = "render_context_tests.rs"]
mod tests;
