/// Fixed-function device state: topology, rasterizer, depth-stencil, sampler
///
/// These are plain values applied to a command list immediately before the
/// draws that depend on them. Nothing is assumed to persist between passes.

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Triangle list
    TriangleList,
    /// Triangle strip
    TriangleStrip,
    /// Line list
    LineList,
}

impl PrimitiveTopology {
    /// Number of primitives drawn from `index_count` indices
    pub fn primitive_count(&self, index_count: u32) -> u32 {
        match self {
            PrimitiveTopology::TriangleList => index_count / 3,
            PrimitiveTopology::TriangleStrip => index_count.saturating_sub(2),
            PrimitiveTopology::LineList => index_count / 2,
        }
    }
}

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// No culling
    None,
    /// Cull back faces
    Back,
}

/// Polygon rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    /// Fill polygons
    Fill,
    /// Draw edges only (wireframe)
    Line,
}

/// Rasterizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizerState {
    pub cull_mode: CullMode,
    pub polygon_mode: PolygonMode,
    pub multisample_antialias: bool,
}

impl RasterizerState {
    /// The four hot-swapped combinations of backface culling and wireframe
    pub fn from_toggles(backface_culling: bool, wireframe: bool) -> Self {
        Self {
            cull_mode: if backface_culling { CullMode::Back } else { CullMode::None },
            polygon_mode: if wireframe { PolygonMode::Line } else { PolygonMode::Fill },
            multisample_antialias: true,
        }
    }
}

impl Default for RasterizerState {
    fn default() -> Self {
        Self::from_toggles(false, false)
    }
}

/// Depth-stencil state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilState {
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
}

impl DepthStencilState {
    /// Depth test and write (opaque geometry)
    pub const NORMAL: Self = Self { depth_test_enable: true, depth_write_enable: true };

    /// Depth test only; the pass leaves the depth buffer untouched
    pub const DONT_WRITE_DEPTH: Self = Self { depth_test_enable: true, depth_write_enable: false };
}

/// Texture filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Linear,
}

/// Texture addressing outside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Repeat,
}

/// Sampler state bound to slot 0 for every pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerState {
    pub filter: Filter,
    pub address_mode: AddressMode,
}

impl SamplerState {
    /// Linear filtering with wrapping
    pub const LINEAR_WRAP: Self = Self { filter: Filter::Linear, address_mode: AddressMode::Repeat };
}
