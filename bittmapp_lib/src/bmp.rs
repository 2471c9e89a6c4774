//! Monochrome Windows bitmap codec.
//!
//! Only the plain layout is handled: a 14 byte file header, a 40 byte info header, a color
//! table, then bottom-up rows padded to 4 bytes with 1 bit per pixel and no compression.
//! In the file the leftmost pixel of a byte is its most significant bit and palette index 0
//! is black. In a `Raster` the leftmost pixel is the least significant bit and a set bit is a
//! drawn (black) pixel, so both the bit order and the polarity flip on the way through.

use crate::byteview::ByteView;
use crate::raster::Raster;
use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};
use thiserror::Error;

pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;
/// Smallest input that can hold both headers.
pub const MIN_FILE_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

const MAGIC: &[u8; 2] = b"BM";
// index 0 = black, index 1 = white, as (b, g, r, reserved)
const PALETTE: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0x00];
const PIXEL_DATA_OFFSET: usize = MIN_FILE_SIZE + PALETTE.len();
// 120 dpi
const PIXELS_PER_METRE: i32 = 4724;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("data not valid (not long enough, must be at least 54 bytes, got {0})")]
    TooShort(usize),
    #[error("data not valid (no BM header)")]
    BadMagic,
    #[error("data not valid (declared length {declared} but got {actual} bytes)")]
    LengthMismatch { declared: u32, actual: usize },
    #[error("cannot read bitmaps of inverted or zero height ({0})")]
    UnsupportedOrientation(i32),
    #[error("only one plane supported (got {0})")]
    UnsupportedPlanes(u16),
    #[error("only monochrome data supported (got {0} bits per pixel)")]
    UnsupportedColorDepth(u16),
    #[error("only uncompressed data supported (got compression {0})")]
    UnsupportedCompression(u32),
    #[error("pixel data cut short (need {needed} bytes, {available} available)")]
    TruncatedPixelData { needed: usize, available: usize },
}

/// Header fields of a bitmap file. Only lives for the duration of a decode or encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub file_length: u32,
    pub pixel_data_offset: u32,
    pub header_length: u32,
    pub width: u32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub number_colors: u32,
    pub important_colors: u32,
}
impl BmpHeader {
    /// Bytes per stored row.
    pub fn row_size(&self) -> usize {
        row_size(self.width)
    }
}

/// Bytes per 1-bpp row of `width` pixels, padded to a 4 byte boundary.
pub fn row_size(width: u32) -> usize {
    (width as usize).div_ceil(32) * 4
}

/// Cheap check for whether `bytes` is worth a full decode: long enough, "BM" signature and a
/// declared length that matches.
pub fn looks_like_bmp(bytes: &[u8]) -> bool {
    let view = ByteView::new(bytes);
    bytes.len() >= MIN_FILE_SIZE
        && bytes.starts_with(MAGIC)
        && view.read_u32::<LittleEndian>(2).map(|declared| declared as usize) == Some(bytes.len())
}

fn field<T>(value: Option<T>, len: usize) -> Result<T, DecodeError> {
    value.ok_or(DecodeError::TooShort(len))
}

fn parse_header(bytes: &[u8]) -> Result<BmpHeader, DecodeError> {
    let len = bytes.len();
    if len < MIN_FILE_SIZE {
        return Err(DecodeError::TooShort(len));
    }
    if !bytes.starts_with(MAGIC) {
        return Err(DecodeError::BadMagic);
    }
    let view = ByteView::new(bytes);
    let u16_at = |offset| field(view.read_u16::<LittleEndian>(offset), len);
    let u32_at = |offset| field(view.read_u32::<LittleEndian>(offset), len);

    let file_length = u32_at(2)?;
    if file_length as usize != len {
        return Err(DecodeError::LengthMismatch {
            declared: file_length,
            actual: len,
        });
    }
    let height = field(view.read_i32::<LittleEndian>(22), len)?;
    if height <= 0 {
        return Err(DecodeError::UnsupportedOrientation(height));
    }
    let planes = u16_at(26)?;
    if planes != 1 {
        return Err(DecodeError::UnsupportedPlanes(planes));
    }
    let bits_per_pixel = u16_at(28)?;
    if bits_per_pixel != 1 {
        return Err(DecodeError::UnsupportedColorDepth(bits_per_pixel));
    }
    let compression = u32_at(30)?;
    if compression != 0 {
        return Err(DecodeError::UnsupportedCompression(compression));
    }

    Ok(BmpHeader {
        file_length,
        pixel_data_offset: u32_at(10)?,
        header_length: u32_at(14)?,
        width: u32_at(18)?,
        height,
        planes,
        bits_per_pixel,
        compression,
        image_size: u32_at(34)?,
        number_colors: u32_at(46)?,
        important_colors: u32_at(50)?,
    })
}

/// Validate and return the header of a monochrome bitmap without touching the pixel data.
pub fn decode_header(bytes: &[u8]) -> Result<BmpHeader, DecodeError> {
    let header = parse_header(bytes).inspect_err(|err| warn!("rejected bitmap: {err}"))?;
    debug!("parsed bitmap header: {header:?}");
    Ok(header)
}

/// Decode a monochrome bitmap into a raster.
///
/// File pixel bits of 0 (palette index 0) become drawn pixels. Rows come out top-down.
pub fn decode(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let header = decode_header(bytes)?;
    let width = header.width;
    let height = header.height as u32;
    let stride = header.row_size();

    let available = bytes.len().saturating_sub(header.pixel_data_offset as usize);
    let needed = stride.checked_mul(height as usize).unwrap_or(usize::MAX);
    if needed > available {
        let err = DecodeError::TruncatedPixelData { needed, available };
        warn!("rejected bitmap: {err}");
        return Err(err);
    }
    let pixel_data = bytes.get(header.pixel_data_offset as usize..).unwrap_or_default();

    let mut raster = Raster::new(width, height);
    for (y, row) in pixel_data.chunks_exact(stride.max(1)).take(height as usize).enumerate() {
        let out_y = height - 1 - y as u32;
        for x in 0..width {
            let src_bit = (row[(x / 8) as usize] >> (7 - x % 8)) & 1;
            if src_bit == 0 {
                raster.set_pixel(x, out_y);
            }
        }
    }
    Ok(raster)
}

/// Encode a raster as a monochrome bitmap with a black/white color table.
///
/// Panics if the file would not fit the format (height above `i32::MAX` or a total size
/// above `u32::MAX`).
pub fn encode(raster: &Raster) -> Vec<u8> {
    let width = raster.width();
    let height = raster.height();
    let stride = row_size(width);
    let image_size = stride * height as usize;
    let file_length = PIXEL_DATA_OFFSET + image_size;
    assert!(
        height <= i32::MAX as u32 && file_length <= u32::MAX as usize,
        "{width}x{height} raster is too large for a bitmap file"
    );

    let mut out = vec![0u8; file_length];
    out[0..2].copy_from_slice(MAGIC);
    LittleEndian::write_u32(&mut out[2..6], file_length as u32);
    // 6..10 reserved
    LittleEndian::write_u32(&mut out[10..14], PIXEL_DATA_OFFSET as u32);

    LittleEndian::write_u32(&mut out[14..18], INFO_HEADER_SIZE as u32);
    LittleEndian::write_u32(&mut out[18..22], width);
    LittleEndian::write_i32(&mut out[22..26], height as i32);
    LittleEndian::write_u16(&mut out[26..28], 1); // planes
    LittleEndian::write_u16(&mut out[28..30], 1); // bits per pixel
    LittleEndian::write_u32(&mut out[30..34], 0); // compression
    LittleEndian::write_u32(&mut out[34..38], image_size as u32);
    LittleEndian::write_i32(&mut out[38..42], PIXELS_PER_METRE);
    LittleEndian::write_i32(&mut out[42..46], PIXELS_PER_METRE);
    LittleEndian::write_u32(&mut out[46..50], (PALETTE.len() / 4) as u32);
    LittleEndian::write_u32(&mut out[50..54], 0); // important colors
    out[MIN_FILE_SIZE..PIXEL_DATA_OFFSET].copy_from_slice(&PALETTE);

    if stride > 0 {
        for (file_y, row) in out[PIXEL_DATA_OFFSET..].chunks_exact_mut(stride).enumerate() {
            let y = height - 1 - file_y as u32;
            for x in 0..width {
                if !raster.pixel(x, y) {
                    row[(x / 8) as usize] |= 0x80 >> (x % 8);
                }
            }
        }
    }

    debug!("encoded {width}x{height} raster into {file_length} bytes");
    out
}
