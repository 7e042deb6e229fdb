//! Converts between 24-bit uncompressed BMP images and DXT1-compressed DDS
//! textures.
//!
//! # Examples
//! ```rust
//! extern crate bimdexter;
//! ```

#![deny(missing_docs)]

#[macro_use]
extern crate bitflags;

#[macro_use]
extern crate serde_derive;

/// BC1 (a.k.a. DXT1) stores compressed RGB data, with an optional 1-bit
/// alpha channel which this crate does not produce.
///
/// # Reference
///
/// - [DXT1 on Wikipedia](https://en.wikipedia.org/wiki/S3_Texture_Compression#DXT1)
/// - [BC1 on Microsoft Docs](https://docs.microsoft.com/en-us/windows/uwp/graphics-concepts/block-compression#bc1)
/// - [Nathan Reed's article](http://reedbeta.com/blog/understanding-bcn-texture-compression-formats/#bc1)
pub mod bc1;

/// Tools to operate on file formats that store block-compressed data.
///
/// This includes the BMP source container and the DDS container used to
/// carry BC1-compressed textures.
pub mod format;

/// Component-wise float triple, used as a weighted color or a gradient.
pub mod vec3;

/// Per-channel importance weighting applied before squared-error
/// comparison in the block compressor.
pub mod importance;

/// An in-memory, move-only 24-bit RGB image.
pub mod pixmap;

mod error;

pub use error::{Error, Result};
