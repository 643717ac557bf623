/// Debug primitives drawn in the DbgPrim pass.
///
/// Geometry generators (grids, boxes, axes) live with the application;
/// the viewer only needs their draw contract.

use crate::context::DrawContext;
use crate::error::Result;

pub trait DebugPrimitive: Send + Sync {
    /// Record draw commands with the debug shader
    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()>;

    fn name(&self) -> &str {
        "debug primitive"
    }
}

#[derive(Default)]
pub struct DebugPrimitives {
    primitives: Vec<Box<dyn DebugPrimitive>>,
}

impl DebugPrimitives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, primitive: Box<dyn DebugPrimitive>) {
        self.primitives.push(primitive);
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.primitives.iter().map(|p| p.name()).collect()
    }

    /// Draw every primitive in insertion order, stopping at the first failure
    pub fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        for primitive in &self.primitives {
            primitive.draw(ctx)?;
        }
        Ok(())
    }
}
