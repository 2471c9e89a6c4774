use byteorder::ByteOrder;

/// Typed reads at arbitrary offsets into a byte slice.
///
/// The byte order is chosen per read (`LittleEndian` / `BigEndian` from `byteorder`).
/// Reads that would run past the end of the slice return `None`.
#[derive(Clone, Copy, Debug)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}
impl<'a> ByteView<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteView { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `len` bytes starting at `offset`, if they are all in range.
    pub fn slice(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        self.bytes.get(offset..offset.checked_add(len)?)
    }

    pub fn read_u8(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    pub fn read_u16<E: ByteOrder>(&self, offset: usize) -> Option<u16> {
        self.slice(offset, 2).map(E::read_u16)
    }

    pub fn read_u32<E: ByteOrder>(&self, offset: usize) -> Option<u32> {
        self.slice(offset, 4).map(E::read_u32)
    }

    pub fn read_i32<E: ByteOrder>(&self, offset: usize) -> Option<i32> {
        self.slice(offset, 4).map(E::read_i32)
    }
}
