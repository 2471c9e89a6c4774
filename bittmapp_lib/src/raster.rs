pub use bit_vec::BitVec;

use crate::config::{InvalidConfig, RasterConfig};
use crate::selection::SelectionMask;

/// Packed 1-bpp storage. Pixel `i = y * width + x` lives in byte `i / 8` at bit `i % 8`
/// counted from the least significant bit, which is exactly how `BitVec<u8>` lays out
/// its blocks.
pub type PackedBits = BitVec<u8>;

/// Number of bytes needed to hold `width * height` packed pixels.
pub fn packed_len(width: u32, height: u32) -> usize {
    (width as usize * height as usize).div_ceil(8)
}

fn blank(len: usize) -> PackedBits {
    BitVec::from_elem_general(len, false)
}

/// A width × height plane of bits. Shared by `Raster` and `SelectionMask`, which use the
/// same coordinate math.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BitPlane {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) bits: PackedBits,
}
impl BitPlane {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        BitPlane {
            width,
            height,
            bits: blank(width as usize * height as usize),
        }
    }

    pub(crate) fn from_bytes(bytes: &[u8], width: u32, height: u32) -> Self {
        assert_eq!(
            bytes.len(),
            packed_len(width, height),
            "{width}x{height} needs {} packed bytes",
            packed_len(width, height)
        );
        let bits = (0..width as usize * height as usize)
            .map(|i| bytes[i / 8] >> (i % 8) & 1 == 1)
            .collect();
        BitPlane { width, height, bits }
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, on: bool) {
        let i = self.index(x, y);
        self.bits.set(i, on);
    }

    pub(crate) fn get(&self, x: u32, y: u32) -> bool {
        self.bits[self.index(x, y)]
    }

    pub(crate) fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Bounds-safe read: anything outside the plane is unset.
    pub(crate) fn get_clipped(&self, x: i32, y: i32) -> bool {
        self.contains(x, y) && self.get(x as u32, y as u32)
    }

    pub(crate) fn clear(&mut self) {
        self.bits = blank(self.bits.len());
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        *self = BitPlane::new(width, height);
    }
}

/// The drawing surface: one bit per pixel, set means drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    plane: BitPlane,
}
impl Raster {
    /// A cleared raster. `width` is expected to be a multiple of 8; use
    /// [`Raster::from_config`] to have that checked.
    pub fn new(width: u32, height: u32) -> Self {
        Raster {
            plane: BitPlane::new(width, height),
        }
    }

    pub fn from_config(config: &RasterConfig) -> Result<Self, InvalidConfig> {
        let (width, height) = config.validate()?;
        Ok(Self::new(width, height))
    }

    /// Build a raster from packed bytes. Panics unless `bytes.len() == ceil(width * height / 8)`.
    pub fn from_bytes(bytes: &[u8], width: u32, height: u32) -> Self {
        Raster {
            plane: BitPlane::from_bytes(bytes, width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.plane.width
    }

    pub fn height(&self) -> u32 {
        self.plane.height
    }

    /// Linear bit offset of a pixel.
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        self.plane.index(x, y)
    }

    /// Draw a pixel. Coordinates are not checked against the raster extent; callers clamp.
    pub fn set_pixel(&mut self, x: u32, y: u32) {
        self.plane.set(x, y, true);
    }

    /// Erase a pixel. Coordinates are not checked against the raster extent; callers clamp.
    pub fn clear_pixel(&mut self, x: u32, y: u32) {
        self.plane.set(x, y, false);
    }

    /// Whether a pixel is drawn. Anything outside the raster reads as not drawn.
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.plane.get_clipped(x, y)
    }

    /// Unchecked read used by the codec. Panics past the end of the buffer.
    pub(crate) fn pixel(&self, x: u32, y: u32) -> bool {
        self.plane.get(x, y)
    }

    /// Change dimensions. The buffer is reallocated cleared; prior content is dropped.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.plane.resize(width, height);
    }

    /// Replace the backing buffer wholesale. Panics unless
    /// `bytes.len() == ceil(width * height / 8)`.
    pub fn load(&mut self, bytes: &[u8], width: u32, height: u32) {
        self.plane = BitPlane::from_bytes(bytes, width, height);
    }

    /// The packed pixel bytes, `ceil(width * height / 8)` long.
    pub fn as_bytes(&self) -> &[u8] {
        self.plane.bits.storage()
    }

    /// Inverts all pixels in the raster.
    pub fn invert(&mut self) {
        self.plane.bits.negate();
    }

    /// Draw (`on = true`) or erase every selected pixel. The mask must have the raster's shape.
    pub fn fill_selection(&mut self, mask: &SelectionMask, on: bool) {
        assert!(
            mask.width() == self.width() && mask.height() == self.height(),
            "selection {}x{} does not match raster {}x{}",
            mask.width(),
            mask.height(),
            self.width(),
            self.height()
        );
        for (i, selected) in mask.plane().bits.iter().enumerate() {
            if selected {
                self.plane.bits.set(i, on);
            }
        }
    }

    /// Number of drawn pixels.
    pub fn count_set(&self) -> usize {
        self.plane.bits.iter().filter(|b| *b).count()
    }
}
