//! A 24-bit uncompressed BMP reader/writer.
//!
//! Both directions are written top-to-bottom, which is the opposite of the
//! BMP specification's bottom-up row order. This is a deliberate, observed
//! behavior kept for internal round-trip consistency; files produced here
//! may appear vertically flipped in third-party BMP viewers.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::pixmap::{Pixel, Pixmap};

const FILE_HEADER_SIZE: u32 = 14;
const DIB_HEADER_SIZE: u32 = 40;
const BITMAP_OFFSET: u32 = (FILE_HEADER_SIZE + DIB_HEADER_SIZE) as u32;
const BYTES_PER_PIXEL: u32 = 3;

/// Reads a 24-bit uncompressed BMP image.
///
/// The three bytes of each pixel are read in file order directly into the
/// `r`, `g`, `b` channels without reinterpreting them as a standard color
/// space; this matches the writer's inverse so round-trips through this
/// crate are exact, even though the bytes are conventionally BGR on disk.
pub fn read(reader: &mut dyn Read) -> Result<Pixmap> {
	let mut signature = [0u8; 2];
	reader.read_exact(&mut signature)?;
	if &signature != b"BM" {
		return Err(Error::FormatError("BMP file type header not found.".to_string()));
	}

	let mut skip_buf = [0u8; 8];
	reader.read_exact(&mut skip_buf)?;

	let bitmap_offset = reader.read_u32::<LittleEndian>()?;
	let header_size = reader.read_u32::<LittleEndian>()?;
	let width = reader.read_u32::<LittleEndian>()? as usize;
	let height = reader.read_u32::<LittleEndian>()? as usize;

	if width % 4 != 0 {
		return Err(Error::FormatError("BMP image width must be divisible by 4.".to_string()));
	}
	if height % 4 != 0 {
		return Err(Error::FormatError("BMP image height must be divisible by 4.".to_string()));
	}

	let _planes = reader.read_u16::<LittleEndian>()?;
	let bpp = reader.read_u16::<LittleEndian>()?;
	if bpp != 24 {
		return Err(Error::FormatError("Only 24-bit BMP bitmap format is supported.".to_string()));
	}

	if header_size > FILE_HEADER_SIZE {
		let compression = reader.read_u32::<LittleEndian>()?;
		if compression != 0 {
			return Err(Error::FormatError("Only uncompressed BMP files are supported.".to_string()));
		}
	}

	log::info!("Reading {}x{} BMP image.", width, height);

	// The header has already consumed FILE_HEADER_SIZE + 4 + 4 + 4 + 4 + 2 + 2 (+ 4) bytes;
	// `bitmap_offset` tells us exactly where pixel data starts regardless of header variant,
	// but since this reader is not seekable in general we only support the case where the
	// pixel data immediately follows what we've already read, matching the writer.
	let consumed = FILE_HEADER_SIZE + 4 + 4 + 4 + 2 + 2 + if header_size > FILE_HEADER_SIZE { 4 } else { 0 };
	if bitmap_offset > consumed {
		let mut padding = vec![0u8; (bitmap_offset - consumed) as usize];
		reader.read_exact(&mut padding)?;
	}

	let mut pixmap = Pixmap::new();
	pixmap.resize(width, height);

	for y in 0..height {
		for x in 0..width {
			let mut rgb = [0u8; 3];
			reader.read_exact(&mut rgb)?;
			pixmap.set(x, y, Pixel::new(rgb[0], rgb[1], rgb[2]));
		}
	}

	Ok(pixmap)
}

/// Writes a 24-bit uncompressed BMP image.
pub fn write(writer: &mut dyn Write, pixmap: &Pixmap) -> Result<()> {
	let width = pixmap.width() as u32;
	let height = pixmap.height() as u32;
	let file_size = BITMAP_OFFSET + BYTES_PER_PIXEL * width * height;

	writer.write_all(b"BM")?;
	writer.write_u32::<LittleEndian>(file_size)?;
	writer.write_u32::<LittleEndian>(0)?;
	writer.write_u32::<LittleEndian>(BITMAP_OFFSET)?;
	writer.write_u32::<LittleEndian>(DIB_HEADER_SIZE)?;
	writer.write_u32::<LittleEndian>(width)?;
	writer.write_u32::<LittleEndian>(height)?;
	writer.write_u16::<LittleEndian>(1)?; // planes
	writer.write_u16::<LittleEndian>(24)?; // bpp
	writer.write_u32::<LittleEndian>(0)?; // compression
	writer.write_u32::<LittleEndian>(0)?; // biSizeImage
	writer.write_u32::<LittleEndian>(100)?; // x resolution
	writer.write_u32::<LittleEndian>(100)?; // y resolution
	writer.write_u32::<LittleEndian>(1 << 24)?; // colors used
	writer.write_u32::<LittleEndian>(0)?; // colors important

	for y in 0..pixmap.height() {
		for x in 0..pixmap.width() {
			let pixel = pixmap.get(x, y);
			writer.write_all(&[pixel.r, pixel.g, pixel.b])?;
		}
	}

	Ok(())
}
