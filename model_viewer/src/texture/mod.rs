//! Texture module - compressed texture decoding and the shared texture cache.
//!
//! `decode_dds` is a pure function over a byte blob. `TexturePool` owns
//! every decoded GPU texture and hands out shared references by name.

mod dds;
mod source;
mod texture_pool;

pub use dds::{
    DecodedTexture, decode_dds, mip_byte_len, next_multiple_of_4,
    DDS_HEADER_LEN,
};
pub use source::{TextureSource, MemoryTextureSource};
pub use texture_pool::{TexturePool, TextureCacheEntry, normalize_texture_name};
