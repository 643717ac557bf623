/// DDS blob decoding (DXT1/DXT3/DXT5 mip chains)
///
/// Header layout, all integers little-endian:
///
/// ```text
/// skip 4    magic
/// i32       header size
/// i32       flags
/// i32       height
/// i32       width
/// skip 8
/// i32       mipmap count
/// skip 52
/// [u8; 4]   compression tag
/// skip 40
/// mip 0..N  compressed blocks
/// ```

use std::io::{Cursor, Read, Seek, SeekFrom};
use crate::device::{TextureData, TextureDesc, TextureFormat, TextureUsage};
use crate::error::{Error, Result};

/// Bytes preceding the first mip level
pub const DDS_HEADER_LEN: usize = 128;

/// A decoded mip chain, ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// One byte vector per mip level, level 0 first
    pub mips: Vec<Vec<u8>>,
}

impl DecodedTexture {
    pub fn mip_count(&self) -> u32 {
        self.mips.len() as u32
    }

    /// Sum of all mip level sizes
    pub fn byte_len(&self) -> usize {
        self.mips.iter().map(Vec::len).sum()
    }

    /// Texture descriptor carrying the mip chain as initial data
    pub fn to_desc(&self) -> TextureDesc {
        TextureDesc {
            label: self.name.clone(),
            width: self.width,
            height: self.height,
            format: self.format,
            usage: TextureUsage::Sampled,
            mip_levels: self.mip_count(),
            data: Some(TextureData::Mips(self.mips.clone())),
        }
    }
}

/// Round up to the next multiple of 4; zero rounds up to 4
pub fn next_multiple_of_4(x: u32) -> u32 {
    if x == 0 {
        4
    } else {
        x.div_ceil(4) * 4
    }
}

/// Bytes stored for mip `level` of a `width` x `height` texture.
///
/// BC1 packs 4 bits per texel, BC2/BC3 pack 8.
pub fn mip_byte_len(width: u32, height: u32, level: u32, format: TextureFormat) -> usize {
    let w = next_multiple_of_4(width.checked_shr(level).unwrap_or(0)) as usize;
    let h = next_multiple_of_4(height.checked_shr(level).unwrap_or(0)) as usize;
    let texels = w * h;
    match format {
        TextureFormat::BC1_RGBA_UNORM => texels / 2,
        _ => texels,
    }
}

fn format_from_tag(tag: &[u8; 4]) -> Result<TextureFormat> {
    match tag {
        b"DXT1" => Ok(TextureFormat::BC1_RGBA_UNORM),
        b"DXT3" => Ok(TextureFormat::BC2_UNORM),
        b"DXT5" => Ok(TextureFormat::BC3_UNORM),
        _ => Err(Error::UnsupportedFormat(String::from_utf8_lossy(tag).into_owned())),
    }
}

fn malformed(name: &str, what: &str) -> Error {
    Error::MalformedAsset(format!("{}: {}", name, what))
}

fn skip(cursor: &mut Cursor<&[u8]>, name: &str, count: i64) -> Result<()> {
    let position = cursor
        .seek(SeekFrom::Current(count))
        .map_err(|_| malformed(name, "seek failed"))?;
    if position > cursor.get_ref().len() as u64 {
        return Err(malformed(name, "truncated header"));
    }
    Ok(())
}

fn read_i32(cursor: &mut Cursor<&[u8]>, name: &str) -> Result<i32> {
    let mut bytes = [0u8; 4];
    cursor
        .read_exact(&mut bytes)
        .map_err(|_| malformed(name, "truncated header"))?;
    Ok(i32::from_le_bytes(bytes))
}

fn read_dimension(cursor: &mut Cursor<&[u8]>, name: &str, field: &str) -> Result<u32> {
    let value = read_i32(cursor, name)?;
    u32::try_from(value).map_err(|_| malformed(name, &format!("negative {} ({})", field, value)))
}

/// Decode a DDS blob into its mip chain.
///
/// Pure: the same bytes always produce an equal result. A mipmap count of
/// zero is read as one level. Bytes past the last mip level are ignored.
///
/// # Errors
///
/// * `Error::UnsupportedFormat` - the tag is not DXT1, DXT3 or DXT5
/// * `Error::MalformedAsset` - the blob is truncated or a header field is negative
pub fn decode_dds(name: &str, bytes: &[u8]) -> Result<DecodedTexture> {
    let mut cursor = Cursor::new(bytes);

    skip(&mut cursor, name, 4)?;
    let _header_size = read_i32(&mut cursor, name)?;
    let _flags = read_i32(&mut cursor, name)?;
    let height = read_dimension(&mut cursor, name, "height")?;
    let width = read_dimension(&mut cursor, name, "width")?;

    skip(&mut cursor, name, 8)?;
    let mip_count = read_dimension(&mut cursor, name, "mipmap count")?.max(1);

    skip(&mut cursor, name, 52)?;
    let mut tag = [0u8; 4];
    cursor
        .read_exact(&mut tag)
        .map_err(|_| malformed(name, "truncated header"))?;
    let format = format_from_tag(&tag)?;

    skip(&mut cursor, name, 40)?;

    let mut mips = Vec::with_capacity(mip_count.min(32) as usize);
    let mut offset = cursor.position() as usize;
    for level in 0..mip_count {
        let len = mip_byte_len(width, height, level, format);
        let Some(mip) = bytes.get(offset..offset + len) else {
            return Err(malformed(name, &format!("truncated mip level {}", level)));
        };
        mips.push(mip.to_vec());
        offset += len;
    }

    Ok(DecodedTexture {
        name: name.to_string(),
        width,
        height,
        format,
        mips,
    })
}

#[cfg(test)]
#[path = "dds_tests.rs"]
mod tests;
