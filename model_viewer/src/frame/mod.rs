//! Frame module - per-frame pass sequencing and its collaborators.

mod draw_step;
mod frame_counter;
mod debug_primitives;
mod overlay;
mod scheduler;

pub use draw_step::DrawStep;
pub use frame_counter::FrameCounter;
pub use debug_primitives::{DebugPrimitive, DebugPrimitives};
pub use overlay::OverlayLayer;
pub use scheduler::{FrameScheduler, FrameReport};
