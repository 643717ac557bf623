/// OverlayLayer - screen-space collaborators of the GUI passes.
///
/// The menu draws in the GUI pass and the loading indicator in the
/// GUILoadingTasks pass. Both receive the frame's command list after
/// the pass state has been applied.

use crate::device::{CommandList, Viewport};
use crate::error::Result;

pub trait OverlayLayer: Send {
    fn draw(&mut self, cmd: &mut dyn CommandList, viewport: &Viewport, elapsed_seconds: f32) -> Result<()>;
}
