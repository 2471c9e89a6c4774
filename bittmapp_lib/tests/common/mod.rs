#![allow(dead_code)]

/// 32x32 monochrome bitmap: 62 byte header + palette, 128 bytes of pixels, 176 drawn pixels.
pub const SAMPLE_32X32: [u8; 190] = [
    0x42, 0x4d, 0xbe, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3e, 0x00, 0x00, 0x00, 0x28, 0x00,
    0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x80, 0x00, 0x00, 0x00, 0x74, 0x12, 0x00, 0x00, 0x74, 0x12, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0x00, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00,
    0x00, 0x0f, 0xff, 0xff, 0xff, 0xf7, 0xf6, 0x8e, 0x73, 0xb7, 0xf6, 0xb5, 0xad, 0xb7, 0xf0, 0x8d,
    0xad, 0xb7, 0xf6, 0xb5, 0xad, 0xb7, 0xf9, 0x8e, 0x6d, 0x17, 0xff, 0xff, 0xff, 0xf7, 0xf6, 0x8d,
    0x7f, 0xf7, 0xf6, 0xbd, 0x7f, 0xf7, 0xf4, 0x8a, 0xbf, 0xf7, 0xf2, 0xba, 0xbf, 0xf7, 0xf6, 0x8a,
    0xbf, 0xf7, 0xff, 0xff, 0xff, 0xf7, 0xf7, 0x8b, 0x47, 0xf7, 0xf7, 0xbb, 0x7b, 0xf7, 0xf1, 0xb8,
    0x43, 0xf7, 0xf6, 0xbb, 0x5b, 0xf7, 0xf1, 0xbc, 0xdb, 0xf7, 0xff, 0xff, 0xff, 0xf7,
];

/// Top raster row of the sample, packed LSB first: only x=28 is drawn.
pub const SAMPLE_TOP_ROW: [u8; 4] = [0x00, 0x00, 0x00, 0x10];

/// A header-only bitmap with the given fields patched in, sized to `len` bytes.
pub fn header_with(len: usize, width: u32, height: i32, planes: u16, bpp: u16, compression: u32) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    bytes[0..2].copy_from_slice(b"BM");
    bytes[2..6].copy_from_slice(&(len as u32).to_le_bytes());
    bytes[10..14].copy_from_slice(&54u32.to_le_bytes());
    bytes[14..18].copy_from_slice(&40u32.to_le_bytes());
    bytes[18..22].copy_from_slice(&width.to_le_bytes());
    bytes[22..26].copy_from_slice(&height.to_le_bytes());
    bytes[26..28].copy_from_slice(&planes.to_le_bytes());
    bytes[28..30].copy_from_slice(&bpp.to_le_bytes());
    bytes[30..34].copy_from_slice(&compression.to_le_bytes());
    bytes
}
