//! # Krunch-LZW: Lempel–Ziv–Welch with variable-width codes
//!
//! The compressed file is a bare bit stream: MSB-first code words, starting
//! at 9 bits and widening up to 15 as the dictionary grows, terminated by a
//! STOP code at the then-current width and zero-padded to a byte boundary.
//! There is no header. Codes 0–255 are the byte singletons, 256 clears the
//! dictionary, 257 stops the stream, and learned phrases start at 258.
//!
//! ## Example
//!
//! ```
//! let compressed = krunch_lzw::compress(b"TOBEORNOTTOBEORTOBEORNOT").unwrap();
//! let restored = krunch_lzw::decompress(&compressed).unwrap();
//! assert_eq!(restored, b"TOBEORNOTTOBEORTOBEORNOT");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod decoder;
mod dictionary;
mod encoder;

use krunch_core::error::Result;
use krunch_core::fsio;
use krunch_core::traits::FileCodec;
use std::fs;
use std::path::Path;

/// Width of the first code word in a fresh stream, in bits.
pub const INITIAL_CODE_WIDTH: u8 = 9;

/// Widest code word the format allows.
pub const MAX_CODE_WIDTH: u8 = 15;

/// Dictionary capacity; reaching it triggers a CLEAR and a full reset.
pub const MAX_DICTIONARY_SIZE: u16 = 32_768;

/// Reserved code instructing the decoder to reset its dictionary.
pub const CLEAR_CODE: u16 = 256;

/// Reserved code marking end-of-data; padding after it is ignored.
pub const STOP_CODE: u16 = 257;

/// First code assigned to a learned phrase.
pub const FIRST_USER_CODE: u16 = 258;

/// Compress `input` into an LZW code stream.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    encoder::encode(input)
}

/// Decompress an LZW code stream.
///
/// A stream that ends without a STOP code fails with
/// [`FormatError::MissingStop`] and the decoded prefix is discarded; use
/// [`decompress_into`] to keep it.
///
/// [`FormatError::MissingStop`]: krunch_core::error::FormatError::MissingStop
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decoder::decode_into(input, &mut output)?;
    Ok(output)
}

/// Decompress an LZW code stream into an existing buffer.
///
/// On error the bytes decoded before the failure remain in `output`, which
/// is how the whole-file operation leaves a salvageable prefix on disk when
/// a stream is truncated.
pub fn decompress_into(input: &[u8], output: &mut Vec<u8>) -> Result<()> {
    decoder::decode_into(input, output)
}

/// The LZW codec as a whole-file operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LzwCodec;

impl FileCodec for LzwCodec {
    fn name(&self) -> &'static str {
        "LZW"
    }

    fn extension(&self) -> &'static str {
        "lzw"
    }

    fn compress(&self, input: &Path, output: &Path) -> Result<()> {
        let data = fs::read(input)?;
        fs::write(output, compress(&data)?)?;
        Ok(())
    }

    fn decompress(&self, input: &Path, output: &Path) -> Result<()> {
        let data = fs::read(input)?;
        let mut decoded = Vec::new();
        let result = decompress_into(&data, &mut decoded);
        // Written even when the stream was cut short: the prefix is all the
        // caller has left to inspect.
        fs::write(output, &decoded)?;
        result
    }

    fn is_valid(&self, path: &Path) -> bool {
        fsio::file_exists(path) && fsio::file_size(path) > 0
    }
}
