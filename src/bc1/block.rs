//! The wire form of a single compressed 4x4 tile, and its decoder.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

use super::palette::decode_565;
use crate::error::Result;
use crate::pixmap::{Pixel, Pixmap};

/// Edge length, in pixels, of a DXT1 block.
pub const SIZE: usize = 4;

/// Byte length of one encoded block on the wire.
pub const BYTE_SIZE: usize = 8;

/// The wire form of one compressed tile: two R5G6B5 endpoint colors plus a
/// 2-bit-per-pixel palette index bitmap.
///
/// `color0 > color1` is the opaque 4-color interpretation (indices 2 and 3
/// are thirds interpolations of 0 and 1); `color0 <= color1` is the 1-bit
/// alpha interpretation (index 2 is the midpoint, index 3 is transparent).
/// This encoder never intentionally emits the alpha form for a block with
/// varying colors; the constant-color fast path can emit `color0 > 0,
/// color1 = 0` with an all-zero bitmap, which happens to decode correctly
/// under either interpretation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DxtBlock {
	/// First endpoint color, R5G6B5.
	pub color0: u16,
	/// Second endpoint color, R5G6B5.
	pub color1: u16,
	/// 4x4 palette indices, 2 bits per pixel, row-major, pixel (0, 0) in
	/// the least-significant bit pair.
	pub bitmap: u32,
}

impl DxtBlock {
	/// Decodes this block and writes its 16 pixels into `pixmap`, with the
	/// block's top-left corner at `(x0, y0)` (both multiples of 4).
	///
	/// Blocks are stored bottom-origin on the wire while the pixmap is
	/// top-origin, so this walks `dy` from 3 down to 0 while consuming
	/// palette indices in row-major (dy ascending in storage) order.
	pub fn decode(&self, pixmap: &mut Pixmap, x0: usize, y0: usize) {
		let palette = self.palette();

		let mut bits = self.bitmap;
		for dy in (0..SIZE).rev() {
			for dx in 0..SIZE {
				let index = (bits & 0b11) as usize;
				bits >>= 2;
				pixmap.set(x0 + dx, y0 + dy, palette[index]);
			}
		}
	}

	/// The four decoded 8-bit RGB palette colors for this block, per the
	/// format's opaque interpolation (indices 2 and 3 are thirds
	/// interpolations of 0 and 1, using truncating integer division).
	pub fn palette(&self) -> [Pixel; 4] {
		let color0 = decode_565(self.color0);
		let color1 = decode_565(self.color1);
		let color2 = Pixel::interpolate(color0, 2, color1, 1);
		let color3 = Pixel::interpolate(color0, 1, color1, 2);
		[color0, color1, color2, color3]
	}

	/// Reads this block's 8-byte wire form (two little-endian u16
	/// endpoints, one little-endian u32 bitmap).
	pub fn read(reader: &mut dyn Read) -> Result<DxtBlock> {
		let color0 = reader.read_u16::<LittleEndian>()?;
		let color1 = reader.read_u16::<LittleEndian>()?;
		let bitmap = reader.read_u32::<LittleEndian>()?;
		Ok(DxtBlock { color0, color1, bitmap })
	}

	/// Writes this block's 8-byte wire form.
	pub fn write(&self, writer: &mut dyn Write) -> Result<()> {
		writer.write_u16::<LittleEndian>(self.color0)?;
		writer.write_u16::<LittleEndian>(self.color1)?;
		writer.write_u32::<LittleEndian>(self.bitmap)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decode_writes_exactly_sixteen_pixels_at_offset() {
		let mut pixmap = Pixmap::new();
		pixmap.resize(8, 8);
		// Fill with a sentinel so we can tell untouched pixels apart.
		let sentinel = Pixel::new(1, 2, 3);
        for y in 0..8 {
            for x in 0..8 {
                pixmap.set(x, y, sentinel);
            }
        }

		let block = DxtBlock {
			color0: 0x001f, // pure red
			color1: 0,
			bitmap: 0,
		};
		block.decode(&mut pixmap, 4, 4);

		for y in 4..8 {
			for x in 4..8 {
				assert_eq!(pixmap.get(x, y), Pixel::new(255, 0, 0));
			}
		}
		// Everything outside the target tile must be untouched.
		assert_eq!(pixmap.get(0, 0), sentinel);
		assert_eq!(pixmap.get(7, 3), sentinel);
		assert_eq!(pixmap.get(0, 7), sentinel);
	}

	#[test]
	fn read_write_roundtrip() {
		let block = DxtBlock {
			color0: 0xabcd,
			color1: 0x1234,
			bitmap: 0xdeadbeef,
		};
		let mut bytes = Vec::new();
		block.write(&mut bytes).unwrap();
		assert_eq!(bytes.len(), BYTE_SIZE);

		let mut cursor = &bytes[..];
		let decoded = DxtBlock::read(&mut cursor).unwrap();
		assert_eq!(decoded, block);
	}

	#[test]
	fn palette_interpolation_uses_thirds() {
		let block = DxtBlock {
			color0: 0x001f, // red, 255,0,0
			color1: 0xf800, // blue, 0,0,255
			bitmap: 0,
		};
		let palette = block.palette();
		assert_eq!(palette[0], Pixel::new(255, 0, 0));
		assert_eq!(palette[1], Pixel::new(0, 0, 255));
		assert_eq!(palette[2], Pixel::new(170, 0, 85));
		assert_eq!(palette[3], Pixel::new(85, 0, 170));
	}
}
