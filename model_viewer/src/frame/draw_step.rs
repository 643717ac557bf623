/// DrawStep - the fixed per-frame pass sequence

use std::fmt;
use crate::device::DepthStencilState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawStep {
    Opaque,
    AlphaEdge,
    DbgPrim,
    GUI,
    GUILoadingTasks,
}

impl DrawStep {
    /// Every pass, in execution order
    pub const ALL: [DrawStep; 5] = [
        DrawStep::Opaque,
        DrawStep::AlphaEdge,
        DrawStep::DbgPrim,
        DrawStep::GUI,
        DrawStep::GUILoadingTasks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DrawStep::Opaque => "Opaque",
            DrawStep::AlphaEdge => "AlphaEdge",
            DrawStep::DbgPrim => "DbgPrim",
            DrawStep::GUI => "GUI",
            DrawStep::GUILoadingTasks => "GUILoadingTasks",
        }
    }

    /// Only the opaque pass writes depth
    pub fn depth_stencil(&self) -> DepthStencilState {
        match self {
            DrawStep::Opaque => DepthStencilState::NORMAL,
            _ => DepthStencilState::DONT_WRITE_DEPTH,
        }
    }
}

impl fmt::Display for DrawStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
