/// Texture trait, texture descriptor, and texture info

/// Texture pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    /// Uncompressed RGBA, 8 bits per channel
    R8G8B8A8_UNORM,
    /// Block compressed, 4 bits per texel (DXT1)
    BC1_RGBA_UNORM,
    /// Block compressed, 8 bits per texel, explicit alpha (DXT3)
    BC2_UNORM,
    /// Block compressed, 8 bits per texel, interpolated alpha (DXT5)
    BC3_UNORM,
}

/// Texture usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUsage {
    /// Texture can be sampled in shaders
    Sampled,
}

/// Data to upload to a texture at creation time
#[derive(Debug, Clone)]
pub enum TextureData {
    /// Single image (mip level 0 only)
    Single(Vec<u8>),
    /// One byte vector per mip level, level 0 first
    Mips(Vec<Vec<u8>>),
}

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Debug label (texture name for decoded textures)
    pub label: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
    /// Number of mip levels
    pub mip_levels: u32,
    /// Optional initial data to upload at creation time
    pub data: Option<TextureData>,
}

/// Read-only properties of a created texture.
#[derive(Debug, Clone)]
pub struct TextureInfo {
    /// Debug label
    pub label: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
    /// Number of mip levels
    pub mip_levels: u32,
}

/// Texture resource trait
///
/// Implemented by backend-specific texture types.
/// The texture is destroyed when dropped.
pub trait Texture: Send + Sync {
    /// Get the read-only properties of this texture
    fn info(&self) -> &TextureInfo;
}
