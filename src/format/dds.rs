//! A DDS (Direct Draw Surface) reader/writer for DXT1-compressed textures.
//!
//! # Reference
//! See:
//! - [Microsoft Docs sample loader](https://docs.microsoft.com/en-us/windows/uwp/gaming/complete-code-for-ddstextureloader)
//! - [MSDN DDS Programming Guide](https://msdn.microsoft.com/library/windows/desktop/bb943991)

use std::io::{Read, Write};
use std::mem;

use crate::bc1::{DxtBlock, PixelBlock};
use crate::error::{Error, Result};
use crate::importance::ColorImportance;
use crate::pixmap::Pixmap;

#[repr(C, packed)]
#[derive(Serialize, Deserialize)]
struct Header {
	size: u32,
	flags: HeaderFlags,
	height: u32,
	width: u32,
	// Pitch (scan line length) for uncompressed textures.
	// Size in bytes of top-level texture for compressed textures.
	pitch_or_linear_size: u32,
	// Depth for 3D textures.
	depth: u32,
	mipmap_count: u32,
	_unused1: [u32; 11],
	format: PixelFormat,
	caps: Capabilities,
	caps2: u32,
	_unused2: [u32; 3],
}

bitflags! {
	#[derive(Serialize, Deserialize)]
	struct HeaderFlags: u32 {
		const CAPS = 0x1;
		const HEIGHT = 0x2;
		const WIDTH = 0x4;
		const PIXEL_FORMAT = 0x1000;

		const UNCOMPRESSED_PITCH = 0x8;
		const COMPRESSED_PITCH = 0x80000;

		const HAS_MIPMAPS = 0x20000;
	}
}

bitflags! {
	#[derive(Serialize, Deserialize)]
	struct Capabilities: u32 {
		// Required on every DDS file.
		const TEXTURE = 0x1000;

		// Contains more than one type of surface.
		const COMPLEX = 0x8;

		// Contains a mipmap chain.
		const MIPMAP = 0x400000;
	}
}

#[repr(C, packed)]
#[derive(Serialize, Deserialize)]
struct PixelFormat {
	size: u32,
	flags: PixelFormatFlags,
	four_cc: [u8; 4],
	rgb_bit_count: u32,
	red_mask: u32,
	green_mask: u32,
	blue_mask: u32,
	alpha_mask: u32,
}

bitflags! {
	#[derive(Serialize, Deserialize)]
	struct PixelFormatFlags: u32 {
		const FOURCC = 0x4;
	}
}

const MAGIC: &[u8; 4] = b"DDS ";
const FOURCC_DXT1: &[u8; 4] = b"DXT1";

fn header_size_field() -> usize {
	mem::size_of::<Header>()
}

/// Reads a DDS file carrying DXT1-compressed data and decodes it into a
/// [`Pixmap`].
pub fn read(reader: &mut dyn Read) -> Result<Pixmap> {
	let mut magic = [0u8; 4];
	reader.read_exact(&mut magic)?;
	if &magic != MAGIC {
		return Err(Error::FormatError("DDS magic number not found.".to_string()));
	}

	let limit = bincode::Bounded(header_size_field() as u64);
	let header: Header = bincode::deserialize_from(reader, limit)?;

	if header.size as usize != header_size_field() {
		return Err(Error::FormatError(format!(
			"Invalid DDS header length. Expected 124, found {}.",
			header.size
		)));
	}

	let width = header.width as usize;
	let height = header.height as usize;
	if width % 4 != 0 {
		return Err(Error::FormatError("DDS image width must be divisible by 4.".to_string()));
	}
	if height % 4 != 0 {
		return Err(Error::FormatError("DDS image height must be divisible by 4.".to_string()));
	}

	// Copy the packed fields out before calling any reference-taking method
	// on them; `header` is `#[repr(packed)]` so its fields are not
	// generally aligned.
	let pixel_format_flags = header.format.flags;
	let four_cc = header.format.four_cc;
	let caps = header.caps;

	if pixel_format_flags.bits() != PixelFormatFlags::FOURCC.bits() {
		return Err(Error::FormatError("Only compressed non-alpha RGB files are supported.".to_string()));
	}
	if &four_cc != FOURCC_DXT1 {
		return Err(Error::FormatError("Only DXT1-compressed files are supported.".to_string()));
	}

	if !caps.contains(Capabilities::TEXTURE) {
		return Err(Error::FormatError("DDS file content must be a texture.".to_string()));
	}

	log::info!("Reading {}x{} DDS image.", width, height);

	let mut pixmap = Pixmap::new();
	pixmap.resize(width, height);

	// Blocks are written bottom-to-top, in strides of 4 rows.
	let mut y = height as isize - 4;
	while y >= 0 {
		let mut x = 0;
		while x < width {
			let block = DxtBlock::read(reader)?;
			block.decode(&mut pixmap, x, y as usize);
			x += 4;
		}
		y -= 4;
	}

	Ok(pixmap)
}

/// Compresses `pixmap` with BC1 and writes it as a DDS file.
pub fn write(writer: &mut dyn Write, pixmap: &Pixmap, importance: ColorImportance) -> Result<()> {
	let width = pixmap.width();
	let height = pixmap.height();

	let header = Header {
		size: header_size_field() as u32,
		flags: HeaderFlags::CAPS | HeaderFlags::HEIGHT | HeaderFlags::WIDTH | HeaderFlags::PIXEL_FORMAT | HeaderFlags::COMPRESSED_PITCH,
		height: height as u32,
		width: width as u32,
		pitch_or_linear_size: (width / 4 * (height / 4) * 8) as u32,
		depth: 0,
		mipmap_count: 0,
		_unused1: [0; 11],
		format: PixelFormat {
			size: mem::size_of::<PixelFormat>() as u32,
			flags: PixelFormatFlags::FOURCC,
			four_cc: *FOURCC_DXT1,
			rgb_bit_count: 0,
			red_mask: 0x00ff_0000,
			green_mask: 0x0000_ff00,
			blue_mask: 0x0000_00ff,
			alpha_mask: 0,
		},
		caps: Capabilities::TEXTURE,
		caps2: 0,
		_unused2: [0; 3],
	};

	writer.write_all(MAGIC)?;
	bincode::serialize_into(writer, &header)?;

	let mut error = 0.0f32;

	let mut y = height as isize - 4;
	while y >= 0 {
		let mut x = 0;
		while x < width {
			let block = PixelBlock::read(pixmap, x, y as usize, importance);
			let (dxt, block_error) = block.compress();
			error += block_error;
			dxt.write(writer)?;
			x += 4;
		}
		y -= 4;
	}

	let pixels = (width * height) as f32;
	let rms_percent = (error / pixels).sqrt() * 100.0 / 256.0;
	log::info!("DDS image written. Weighted RMS error per pixel: {:.4}%.", rms_percent);

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pixmap::Pixel;

	fn gradient_pixmap(width: usize, height: usize) -> Pixmap {
		let mut pixmap = Pixmap::new();
		pixmap.resize(width, height);
		for y in 0..height {
			for x in 0..width {
				let v = ((x * 255) / (width.max(1) - 1).max(1)) as u8;
				pixmap.set(x, y, Pixel::new(v, v, v));
			}
		}
		pixmap
	}

	#[test]
	fn fail_magic_number() {
		let data = b"not dds";
		let mut view = &data[..];
		assert!(read(&mut view).is_err());
	}

	#[test]
	fn fail_not_enough_data() {
		let data = b"DDS 1234";
		let mut view = &data[..];
		assert!(read(&mut view).is_err());
	}

	#[test]
	fn write_then_read_roundtrips_dimensions() {
		let pixmap = gradient_pixmap(8, 8);
		let mut bytes = Vec::new();
		write(&mut bytes, &pixmap, ColorImportance::default()).unwrap();

		let mut cursor = &bytes[..];
		let decoded = read(&mut cursor).unwrap();
		assert_eq!(decoded.width(), 8);
		assert_eq!(decoded.height(), 8);
	}

	#[test]
	fn solid_blocks_compress_losslessly() {
		let mut pixmap = Pixmap::new();
		pixmap.resize(8, 4);
		for y in 0..4 {
			for x in 0..4 {
				pixmap.set(x, y, Pixel::new(0, 0, 0));
			}
		}
		for y in 0..4 {
			for x in 4..8 {
				pixmap.set(x, y, Pixel::new(255, 255, 255));
			}
		}

		let mut bytes = Vec::new();
		write(&mut bytes, &pixmap, ColorImportance::default()).unwrap();
		let mut cursor = &bytes[..];
		let decoded = read(&mut cursor).unwrap();

		for y in 0..4 {
			for x in 0..4 {
				assert_eq!(decoded.get(x, y), Pixel::new(0, 0, 0));
			}
			for x in 4..8 {
				assert_eq!(decoded.get(x, y), Pixel::new(255, 255, 255));
			}
		}
	}
}
