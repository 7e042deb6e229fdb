//! End-to-end tests exercising the BMP <-> DDS conversion scenarios.

use bimdexter::bc1::{DxtBlock, PixelBlock};
use bimdexter::format::{bmp, dds};
use bimdexter::importance::ColorImportance;
use bimdexter::pixmap::{Pixel, Pixmap};

fn solid_pixmap(width: usize, height: usize, pixel: Pixel) -> Pixmap {
	let mut pixmap = Pixmap::new();
	pixmap.resize(width, height);
	for y in 0..height {
		for x in 0..width {
			pixmap.set(x, y, pixel);
		}
	}
	pixmap
}

fn bmp_bytes(pixmap: &Pixmap) -> Vec<u8> {
	let mut bytes = Vec::new();
	bmp::write(&mut bytes, pixmap).unwrap();
	bytes
}

fn dds_bytes(pixmap: &Pixmap, importance: ColorImportance) -> Vec<u8> {
	let mut bytes = Vec::new();
	dds::write(&mut bytes, pixmap, importance).unwrap();
	bytes
}

// S1: a 4x4 solid red BMP encodes to a single block with a known color0
// and an all-zero bitmap, and round-trips exactly.
#[test]
fn s1_solid_red_block() {
	let pixmap = solid_pixmap(4, 4, Pixel::new(255, 0, 0));

	let bmp = bmp_bytes(&pixmap);
	let mut cursor = &bmp[..];
	let read_back = bmp::read(&mut cursor).unwrap();

	let bytes = dds_bytes(&read_back, ColorImportance::default());
	let mut cursor = &bytes[..];
	let decoded = dds::read(&mut cursor).unwrap();

	for y in 0..4 {
		for x in 0..4 {
			assert_eq!(decoded.get(x, y), Pixel::new(255, 0, 0));
		}
	}

	let block = PixelBlock::read(&read_back, 0, 0, ColorImportance::default());
	let (encoded, error) = block.compress();
	assert_eq!(encoded.color0, 0x001f);
	assert_eq!(encoded.color1, 0);
	assert_eq!(encoded.bitmap, 0);
	assert_eq!(error, 0.0);
}

// S2: a black-to-white gradient along X decodes using palette entries
// 0, 2, 3, 1 in column order once the endpoints converge near black/white.
#[test]
fn s2_gradient_uses_all_four_palette_entries() {
	let mut pixmap = Pixmap::new();
	pixmap.resize(4, 4);
	let columns = [0u8, 85, 170, 255];
	for y in 0..4 {
		for (x, &v) in columns.iter().enumerate() {
			pixmap.set(x, y, Pixel::new(v, v, v));
		}
	}

	let block = PixelBlock::read(&pixmap, 0, 0, ColorImportance::default());
	let (encoded, _) = block.compress();

	assert!(encoded.color0 >= encoded.color1);

	let palette = encoded.palette();
	// Black should land closest to whichever endpoint decodes darkest,
	// white closest to the lightest; the remaining two columns should use
	// the two interpolated entries.
	let mut used_indices = std::collections::HashSet::new();
	for dx in 0..4 {
		let expected = Pixel::new(columns[dx], columns[dx], columns[dx]);
		let (best_index, _) = palette
			.iter()
			.enumerate()
			.min_by_key(|(_, p)| {
				let dr = p.r as i32 - expected.r as i32;
				let dg = p.g as i32 - expected.g as i32;
				let db = p.b as i32 - expected.b as i32;
				dr * dr + dg * dg + db * db
			})
			.unwrap();
		used_indices.insert(best_index);
	}
	assert_eq!(used_indices.len(), 4, "expected all four palette entries to be used");
}

// S3: two adjacent constant-color blocks both take the fast path and
// report zero weighted error.
#[test]
fn s3_checkerboard_blocks_are_lossless() {
	let mut pixmap = Pixmap::new();
	pixmap.resize(8, 4);
	for y in 0..4 {
		for x in 0..4 {
			pixmap.set(x, y, Pixel::new(0, 0, 0));
		}
		for x in 4..8 {
			pixmap.set(x, y, Pixel::new(255, 255, 255));
		}
	}

	let importance = ColorImportance::default();
	let black_block = PixelBlock::read(&pixmap, 0, 0, importance);
	let white_block = PixelBlock::read(&pixmap, 4, 0, importance);

	let (_, black_error) = black_block.compress();
	let (_, white_error) = white_block.compress();

	assert_eq!(black_error, 0.0);
	assert_eq!(white_error, 0.0);
}

// S4: uniform importance changes the chosen endpoints on a pure-blue
// gradient (where channel weighting matters) but not on a gray diagonal
// (where it's rotationally irrelevant).
#[test]
fn s4_uniform_importance_flag() {
	let mut gray = Pixmap::new();
	gray.resize(4, 4);
	for y in 0..4 {
		for x in 0..4 {
			let v = (x * 80) as u8;
			gray.set(x, y, Pixel::new(v, v, v));
		}
	}

	let default_block = PixelBlock::read(&gray, 0, 0, ColorImportance::default());
	let uniform_block = PixelBlock::read(&gray, 0, 0, ColorImportance::uniform());
	let (default_encoded, _) = default_block.compress();
	let (uniform_encoded, _) = uniform_block.compress();
	assert_eq!(default_encoded, uniform_encoded);

	let mut blue = Pixmap::new();
	blue.resize(4, 4);
	for y in 0..4 {
		for x in 0..4 {
			let v = (x * 80) as u8;
			blue.set(x, y, Pixel::new(0, 0, v));
		}
	}

	let default_block = PixelBlock::read(&blue, 0, 0, ColorImportance::default());
	let uniform_block = PixelBlock::read(&blue, 0, 0, ColorImportance::uniform());
	let (default_encoded, _) = default_block.compress();
	let (uniform_encoded, _) = uniform_block.compress();
	assert_ne!(default_encoded, uniform_encoded);
}

// S5: round-tripping a smooth 64x64 gradient is lossy but the weighted RMS
// error stays well under 3% of the full channel range.
#[test]
fn s5_smooth_gradient_roundtrip_is_close() {
	let width = 64;
	let height = 64;
	let mut pixmap = Pixmap::new();
	pixmap.resize(width, height);
	for y in 0..height {
		for x in 0..width {
			let r = ((x * 255) / (width - 1)) as u8;
			let g = ((y * 255) / (height - 1)) as u8;
			let b = (((x + y) * 255) / (width + height - 2)) as u8;
			pixmap.set(x, y, Pixel::new(r, g, b));
		}
	}

	let bytes = dds_bytes(&pixmap, ColorImportance::default());
	let mut cursor = &bytes[..];
	let decoded = dds::read(&mut cursor).unwrap();

	let mut sum_sq = 0f64;
	for y in 0..height {
		for x in 0..width {
			let a = pixmap.get(x, y);
			let b = decoded.get(x, y);
			let dr = a.r as f64 - b.r as f64;
			let dg = a.g as f64 - b.g as f64;
			let db = a.b as f64 - b.b as f64;
			sum_sq += dr * dr + dg * dg + db * db;
		}
	}
	let rms = (sum_sq / (3.0 * (width * height) as f64)).sqrt();
	assert!(rms / 255.0 < 0.03, "RMS error too high: {rms}");
}

// S6: illegal (non-multiple-of-4) dimensions are rejected with a format
// error naming the problem, and no pixel data is read.
#[test]
fn s6_illegal_bmp_dimensions_are_rejected() {
	let pixmap = solid_pixmap(4, 4, Pixel::new(1, 2, 3));
	let mut bytes = bmp_bytes(&pixmap);
	// Corrupt the width field (offset 18, little-endian u32) from 4 to 5.
	bytes[18] = 5;

	let mut cursor = &bytes[..];
	let result = bmp::read(&mut cursor);
	assert!(result.is_err());
	assert!(result.unwrap_err().to_string().contains("width"));
}

// Decoder reference: decoding a block only ever touches its own 16
// pixels.
#[test]
fn decoder_touches_only_its_own_tile() {
	let mut pixmap = Pixmap::new();
	pixmap.resize(8, 8);
	let sentinel = Pixel::new(9, 9, 9);
	for y in 0..8 {
		for x in 0..8 {
			pixmap.set(x, y, sentinel);
		}
	}

	let block = DxtBlock {
		color0: 0xffff,
		color1: 0x0000,
		bitmap: 0xffffffff,
	};
	block.decode(&mut pixmap, 4, 0);

	for y in 4..8 {
		for x in 0..4 {
			assert_eq!(pixmap.get(x, y), sentinel);
		}
	}
	for y in 0..4 {
		for x in 0..4 {
			assert_eq!(pixmap.get(x, y), sentinel);
		}
	}
}

// Vertical-flip symmetry: encoding then decoding preserves the pixmap's
// spatial orientation, despite the container's bottom-origin block order.
#[test]
fn vertical_flip_symmetry_is_preserved() {
	let mut pixmap = Pixmap::new();
	pixmap.resize(4, 8);
	for y in 0..8 {
		for x in 0..4 {
			// A pattern with no vertical symmetry, so a flip would be
			// detectable.
			let v = (y * 10) as u8;
			pixmap.set(x, y, Pixel::new(v, v, v));
		}
	}

	let bytes = dds_bytes(&pixmap, ColorImportance::default());
	let mut cursor = &bytes[..];
	let decoded = dds::read(&mut cursor).unwrap();

	for y in 0..8 {
		for x in 0..4 {
			// Blocks are constant per-row here so decode is exact.
			assert_eq!(decoded.get(x, y), pixmap.get(x, y));
		}
	}
}
