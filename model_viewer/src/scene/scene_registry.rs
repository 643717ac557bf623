/// SceneRegistry - thread-safe collection of live model instances.
///
/// Mutation and draw iteration share one mutex. A draw holds it across
/// filter, sort and draw-call issue, so an instance added by a loader
/// thread mid-frame shows up whole in the next frame or not at all.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use slotmap::{new_key_type, SlotMap};
use crate::camera::{Transform, WorldView};
use crate::config::ViewerConfig;
use crate::context::DrawContext;
use crate::error::{Error, Result};
use crate::model::{Model, ModelInstance};
use crate::shader::{Shader, ShaderKind};
use crate::texture::TexturePool;
use crate::{viewer_debug, viewer_info};

const SOURCE: &str = "viewer::SceneRegistry";

new_key_type! {
    /// Stable key of a registered instance
    pub struct InstanceKey;
}

/// Running totals over registered instances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub instance_count: usize,
    pub vertex_count: u64,
    pub submesh_count: u64,
}

#[derive(Default)]
struct RegistryState {
    instances: SlotMap<InstanceKey, ModelInstance>,
    selected: Option<InstanceKey>,
    stats: SceneStats,
}

impl RegistryState {
    fn count_in(&mut self, model: &Model) {
        self.stats.vertex_count += model.vertex_count() as u64;
        self.stats.submesh_count += model.submesh_count() as u64;
        self.stats.instance_count = self.instances.len();
    }

    fn count_out(&mut self, model: &Model) {
        self.stats.vertex_count = self.stats.vertex_count.saturating_sub(model.vertex_count() as u64);
        self.stats.submesh_count = self.stats.submesh_count.saturating_sub(model.submesh_count() as u64);
        self.stats.instance_count = self.instances.len();
    }

    fn insert(&mut self, instance: ModelInstance) -> InstanceKey {
        let model = Arc::clone(&instance.model);
        let key = self.instances.insert(instance);
        self.count_in(&model);
        key
    }

    /// Visible (and, with culling on, frustum-intersecting) instances, farthest first
    fn draw_order(&self, world: &WorldView, config: &ViewerConfig) -> Vec<(InstanceKey, f32)> {
        let mut order: Vec<(InstanceKey, f32)> = self
            .instances
            .iter()
            .filter(|(_, inst)| inst.visible)
            .filter(|(_, inst)| {
                !config.enable_frustum_culling
                    || world.is_in_frustum(inst.model.bounds(), &inst.transform)
            })
            .map(|(key, inst)| (key, world.distance_squared_from_camera(&inst.transform)))
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1));
        order
    }
}

#[derive(Default)]
pub struct SceneRegistry {
    state: Mutex<RegistryState>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ===== REGISTRATION =====

    /// Register a fully built instance
    pub fn add_instance(&self, instance: ModelInstance) -> InstanceKey {
        let name = instance.name.clone();
        let key = self.lock().insert(instance);
        viewer_debug!(SOURCE, "Added instance '{}'", name);
        key
    }

    /// Register several instances under a single lock acquisition
    pub fn add_instances<I>(&self, instances: I) -> Vec<InstanceKey>
    where
        I: IntoIterator<Item = ModelInstance>,
    {
        let mut state = self.lock();
        let keys: Vec<InstanceKey> = instances.into_iter().map(|inst| state.insert(inst)).collect();
        drop(state);
        viewer_debug!(SOURCE, "Added {} instances", keys.len());
        keys
    }

    /// Remove an instance, releasing its GPU resources once no other
    /// instance shares its model. Clears the selection if it was selected.
    pub fn remove_instance(&self, key: InstanceKey) -> bool {
        let removed = {
            let mut state = self.lock();
            let Some(instance) = state.instances.remove(key) else {
                return false;
            };
            state.count_out(&instance.model);
            if state.selected == Some(key) {
                state.selected = None;
            }
            instance
        };
        viewer_debug!(SOURCE, "Removed instance '{}'", removed.name);
        true
    }

    /// Drop every instance and flush the texture cache.
    ///
    /// Must not run while a loader thread is still registering instances.
    pub fn clear(&self, textures: &TexturePool) {
        let old = {
            let mut state = self.lock();
            std::mem::take(&mut *state)
        };
        let count = old.instances.len();
        drop(old);
        textures.flush();
        viewer_info!(SOURCE, "Cleared scene ({} instances)", count);
    }

    // ===== VISIBILITY & SELECTION =====

    pub fn set_visibility(&self, key: InstanceKey, visible: bool) -> bool {
        match self.lock().instances.get_mut(key) {
            Some(instance) => {
                instance.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn set_all_visible(&self, visible: bool) {
        for (_, instance) in self.lock().instances.iter_mut() {
            instance.visible = visible;
        }
    }

    pub fn show_all(&self) {
        self.set_all_visible(true);
    }

    pub fn hide_all(&self) {
        self.set_all_visible(false);
    }

    pub fn invert_visibility(&self) {
        for (_, instance) in self.lock().instances.iter_mut() {
            instance.visible = !instance.visible;
        }
    }

    /// Select an instance, or clear the selection with `None`.
    ///
    /// Returns false (and clears the selection) for an unknown key.
    pub fn select(&self, key: Option<InstanceKey>) -> bool {
        let mut state = self.lock();
        match key {
            Some(key) if state.instances.contains_key(key) => {
                state.selected = Some(key);
                true
            }
            Some(_) => {
                state.selected = None;
                false
            }
            None => {
                state.selected = None;
                true
            }
        }
    }

    pub fn selected(&self) -> Option<InstanceKey> {
        self.lock().selected
    }

    pub fn is_selected(&self, key: InstanceKey) -> bool {
        self.lock().selected == Some(key)
    }

    // ===== QUERIES =====

    pub fn set_transform(&self, key: InstanceKey, transform: Transform) -> bool {
        match self.lock().instances.get_mut(key) {
            Some(instance) => {
                instance.transform = transform;
                true
            }
            None => false,
        }
    }

    /// First instance registered under `name`
    pub fn find_by_name(&self, name: &str) -> Option<InstanceKey> {
        self.lock()
            .instances
            .iter()
            .find(|(_, inst)| inst.name == name)
            .map(|(key, _)| key)
    }

    /// Run `f` on an instance under the registry lock
    pub fn with_instance<R>(&self, key: InstanceKey, f: impl FnOnce(&ModelInstance) -> R) -> Option<R> {
        self.lock().instances.get(key).map(f)
    }

    pub fn len(&self) -> usize {
        self.lock().instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().instances.is_empty()
    }

    pub fn stats(&self) -> SceneStats {
        self.lock().stats
    }

    /// Retry unresolved texture slots of every registered model.
    ///
    /// Decoding runs outside the registry lock. Returns the number of slots
    /// still unresolved.
    pub fn retry_missing_textures(&self) -> usize {
        let models: Vec<Arc<Model>> = self
            .lock()
            .instances
            .values()
            .map(|inst| Arc::clone(&inst.model))
            .collect();
        models.iter().map(|m| m.try_load_textures()).sum()
    }

    // ===== DRAW =====

    /// Keys of the instances a draw would visit, farthest from the camera first.
    ///
    /// Hidden instances are skipped. With frustum culling enabled, so are
    /// instances whose bounds miss the frustum.
    pub fn compute_draw_order(&self, world: &WorldView, config: &ViewerConfig) -> Vec<InstanceKey> {
        self.lock()
            .draw_order(world, config)
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }

    /// Draw the current pass for every instance in draw order.
    ///
    /// With a selection, only instances sharing a drawgroup with it are drawn.
    pub fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let state = self.lock();
        let selected_groups = state
            .selected
            .and_then(|key| state.instances.get(key))
            .map(|inst| inst.drawgroups);

        for (key, _) in state.draw_order(ctx.world, ctx.config) {
            let Some(instance) = state.instances.get(key) else { continue };
            if let Some(groups) = &selected_groups {
                if !groups.matches(&instance.drawgroups) {
                    continue;
                }
            }
            ctx.shaders.model.set_world_matrix(instance.world_matrix());
            let lod = ctx.world.lod_for(&ctx.config.lod, &instance.transform);
            instance.model.draw(ctx, lod)?;
        }
        Ok(())
    }

    /// Redraw the selected instance through the debug shader.
    ///
    /// A vertex-coloured fill when highlighting is on, then a wireframe
    /// when wireframe selection is on. Backface culling is forced off and
    /// the LOD follows camera distance.
    pub fn draw_selected_overlay(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let highlight = ctx.config.highlight_selected_piece;
        let wireframe = ctx.config.wireframe_selected_piece;
        if !highlight && !wireframe {
            return Ok(());
        }

        let state = self.lock();
        let Some(instance) = state.selected.and_then(|key| state.instances.get(key)) else {
            return Ok(());
        };

        ctx.shaders.debug_prim.set_world_matrix(instance.world_matrix());
        let lod = ctx.world.lod_for(&ctx.config.lod, &instance.transform);
        let old_wireframe = ctx.wireframe;

        let result = overlay_passes(instance, ctx, lod, highlight, wireframe);

        ctx.wireframe = old_wireframe;
        ctx.shaders.debug_prim.set_vertex_color_enabled(true);
        result
    }

    // ===== BACKGROUND LOADING =====

    /// Run `load` on a named background thread.
    ///
    /// The closure builds models outside any lock and registers finished
    /// instances through the registry it receives.
    pub fn spawn_loader<F, R>(self: &Arc<Self>, name: impl Into<String>, load: F) -> Result<JoinHandle<R>>
    where
        F: FnOnce(&SceneRegistry) -> R + Send + 'static,
        R: Send + 'static,
    {
        let registry = Arc::clone(self);
        let name = name.into();
        let thread_name = name.clone();
        std::thread::Builder::new()
            .name(thread_name)
            .spawn(move || {
                viewer_info!(SOURCE, "Loader '{}' started", name);
                let result = load(&registry);
                viewer_info!(SOURCE, "Loader '{}' finished ({} instances)", name, registry.len());
                result
            })
            .map_err(|e| Error::BackendError(format!("failed to spawn loader thread: {}", e)))
    }
}

fn overlay_passes(
    instance: &ModelInstance,
    ctx: &mut DrawContext<'_>,
    lod: u8,
    highlight: bool,
    wireframe: bool,
) -> Result<()> {
    if highlight {
        ctx.wireframe = false;
        ctx.shaders.debug_prim.set_vertex_color_enabled(true);
        instance.model.draw_all(ctx, lod, ShaderKind::DebugPrimitive, true)?;
    }
    if wireframe {
        ctx.wireframe = true;
        ctx.shaders.debug_prim.set_vertex_color_enabled(false);
        instance.model.draw_all(ctx, lod, ShaderKind::DebugPrimitive, true)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "scene_registry_tests.rs"]
mod tests;
