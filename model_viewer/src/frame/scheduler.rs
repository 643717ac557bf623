/// FrameScheduler - drives the fixed pass sequence of a frame.
///
/// Every frame runs Opaque, AlphaEdge, DbgPrim, GUI and GUILoadingTasks in
/// that order, whatever the scene holds. Each pass runs inside its own
/// failure boundary: outside strict mode a failing (or panicking) pass is
/// logged, labelled on screen and the frame moves on to the next pass.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use glam::Vec2;
use crate::context::RenderContext;
use crate::device::{CommandList, TextAnchor, TextLabel, Viewport};
use crate::error::{Error, Result};
use crate::scene::SceneRegistry;
use crate::{viewer_error, viewer_trace};
use super::{DebugPrimitives, DrawStep, FrameCounter, OverlayLayer};

const SOURCE: &str = "viewer::FrameScheduler";

/// Background colour of every frame
pub const CLEAR_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

const FAILURE_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const FPS_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const FPS_MARGIN: f32 = 8.0;
const FPS_LINE_HEIGHT: f32 = 24.0;

/// What happened during one frame
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Passes executed, in order
    pub steps: Vec<DrawStep>,
    /// Contained pass failures, as `Error::RenderPass`
    pub failures: Vec<Error>,
}

impl FrameReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_steps(&self) -> Vec<DrawStep> {
        self.failures
            .iter()
            .filter_map(|e| match e {
                Error::RenderPass { step, .. } => Some(*step),
                _ => None,
            })
            .collect()
    }
}

#[derive(Default)]
pub struct FrameScheduler {
    debug_primitives: DebugPrimitives,
    menu: Option<Box<dyn OverlayLayer>>,
    loading_tasks: Option<Box<dyn OverlayLayer>>,
    frame_counter: FrameCounter,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay drawn in the GUI pass
    pub fn set_menu(&mut self, menu: Option<Box<dyn OverlayLayer>>) {
        self.menu = menu;
    }

    /// Overlay drawn in the GUILoadingTasks pass
    pub fn set_loading_tasks(&mut self, loading_tasks: Option<Box<dyn OverlayLayer>>) {
        self.loading_tasks = loading_tasks;
    }

    pub fn debug_primitives(&self) -> &DebugPrimitives {
        &self.debug_primitives
    }

    pub fn debug_primitives_mut(&mut self) -> &mut DebugPrimitives {
        &mut self.debug_primitives
    }

    pub fn frame_counter(&self) -> &FrameCounter {
        &self.frame_counter
    }

    /// Record and submit one frame.
    ///
    /// # Arguments
    ///
    /// * `context` - Render context supplying device, shaders and configuration
    /// * `scene` - Instances drawn by the geometry passes
    /// * `elapsed_seconds` - Duration of the previous frame
    ///
    /// # Errors
    ///
    /// Command list creation, frame setup and submission errors always
    /// propagate. Pass errors propagate only with `strict_errors` set.
    pub fn run_frame(
        &mut self,
        context: &mut RenderContext,
        scene: &SceneRegistry,
        elapsed_seconds: f32,
    ) -> Result<FrameReport> {
        self.frame_counter.record(elapsed_seconds);

        let device = Arc::clone(context.device());
        let viewport = *context.viewport();
        let strict = context.config().strict_errors;

        let mut cmd = device.create_command_list()?;
        cmd.begin()?;
        cmd.set_viewport(viewport)?;
        cmd.clear(CLEAR_COLOR)?;

        let mut report = FrameReport::default();
        for step in DrawStep::ALL {
            report.steps.push(step);

            let result = if strict {
                self.run_step(context, scene, cmd.as_mut(), step, &viewport, elapsed_seconds)
            } else {
                panic::catch_unwind(AssertUnwindSafe(|| {
                    self.run_step(context, scene, cmd.as_mut(), step, &viewport, elapsed_seconds)
                }))
                .unwrap_or_else(|payload| Err(Error::BackendError(panic_message(payload.as_ref()))))
            };

            if let Err(error) = result {
                let error = as_render_pass(step, error);
                viewer_error!(SOURCE, "{}", error);
                if strict {
                    return Err(error);
                }
                cmd.draw_text(&failure_label(step, &viewport))?;
                report.failures.push(error);
            }
        }

        if context.config().show_fps {
            cmd.draw_text(&self.fps_label(&viewport))?;
        }

        cmd.end()?;
        device.submit(cmd.as_ref())?;
        viewer_trace!(SOURCE, "Frame submitted ({} failed passes)", report.failures.len());
        Ok(report)
    }

    fn run_step(
        &mut self,
        context: &mut RenderContext,
        scene: &SceneRegistry,
        cmd: &mut dyn CommandList,
        step: DrawStep,
        viewport: &Viewport,
        elapsed_seconds: f32,
    ) -> Result<()> {
        let mut ctx = context.begin_step(cmd, step)?;
        match step {
            DrawStep::Opaque | DrawStep::AlphaEdge => scene.draw(&mut ctx),
            DrawStep::DbgPrim => {
                self.debug_primitives.draw(&mut ctx)?;
                scene.draw_selected_overlay(&mut ctx)
            }
            DrawStep::GUI => match self.menu.as_mut() {
                Some(menu) => menu.draw(&mut *ctx.cmd, viewport, elapsed_seconds),
                None => Ok(()),
            },
            DrawStep::GUILoadingTasks => match self.loading_tasks.as_mut() {
                Some(tasks) => tasks.draw(&mut *ctx.cmd, viewport, elapsed_seconds),
                None => Ok(()),
            },
        }
    }

    fn fps_label(&self, viewport: &Viewport) -> TextLabel {
        TextLabel {
            text: format!("FPS: {}", self.frame_counter.average_fps().round()),
            position: Vec2::new(
                viewport.x + FPS_MARGIN,
                viewport.y + viewport.height - FPS_LINE_HEIGHT,
            ),
            color: FPS_COLOR,
            scale: 1.0,
            anchor: TextAnchor::TopLeft,
        }
    }
}

/// Label drawn in place of a failed pass
pub fn failure_label(step: DrawStep, viewport: &Viewport) -> TextLabel {
    TextLabel {
        text: format!("Draw Call Failed ({})", step),
        position: viewport.center(),
        color: FAILURE_COLOR,
        scale: 1.0,
        anchor: TextAnchor::Center,
    }
}

fn as_render_pass(step: DrawStep, error: Error) -> Error {
    match error {
        Error::RenderPass { .. } => error,
        other => Error::RenderPass { step, message: other.to_string() },
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panic: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panic: {}", message)
    } else {
        "panic".to_string()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
