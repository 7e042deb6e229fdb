use std::io;

/// Error type for the library.
///
/// Argument-parsing problems (unknown flags, missing positional arguments)
/// are handled separately by the CLI, which prints usage text directly and
/// never constructs an `Error`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Some unexpected data was encountered while reading a file.
	#[error("{0}")]
	FormatError(String),
	/// An I/O error was encountered while reading / writing an image.
	#[error(transparent)]
	IoError(#[from] io::Error),
}

/// Type returned by most of the library's functions.
pub type Result<T> = std::result::Result<T, Error>;

impl From<bincode::Error> for Error {
	fn from(err: bincode::Error) -> Error {
		use bincode::ErrorKind;
		match *err {
			ErrorKind::IoError(err) => Error::IoError(err),
			// Everything else (invalid encoding, a slice without a known
			// length, a size limit breach) is impossible for us: we never
			// decode or encode UTF-8 strings or unbounded slices, and our
			// serialized structs always have a known size up front.
			other => Error::FormatError(other.to_string()),
		}
	}
}
