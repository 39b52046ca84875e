//! # Krunch-RLE: run-length encoding
//!
//! The simplest of the three Krunch codecs. The compressed form is a bare
//! sequence of `(count, byte)` pairs with no header or trailer, so a valid
//! file always has even size. A run never exceeds 255 bytes; longer runs
//! split into consecutive pairs.
//!
//! ## Example
//!
//! ```
//! let compressed = krunch_rle::compress(b"aaabbbccc");
//! assert_eq!(compressed, [0x03, b'a', 0x03, b'b', 0x03, b'c']);
//!
//! let restored = krunch_rle::decompress(&compressed).unwrap();
//! assert_eq!(restored, b"aaabbbccc");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

use krunch_core::error::{KrunchError, Result};
use krunch_core::fsio;
use krunch_core::traits::FileCodec;
use std::fs;
use std::path::Path;

/// Longest run a single `(count, byte)` pair can express.
pub const MAX_RUN_LENGTH: u8 = u8::MAX;

/// Compress `input` into `(count, byte)` pairs.
///
/// Empty input produces empty output; both round-trip.
pub fn compress(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len().min(64) * 2);
    let mut run: Option<(u8, u8)> = None;

    for &byte in input {
        run = match run {
            Some((count, current)) if current == byte && count < MAX_RUN_LENGTH => {
                Some((count + 1, current))
            }
            Some((count, current)) => {
                output.push(count);
                output.push(current);
                Some((1, byte))
            }
            None => Some((1, byte)),
        };
    }

    if let Some((count, current)) = run {
        output.push(count);
        output.push(current);
    }

    output
}

/// Expand `(count, byte)` pairs back into the original byte stream.
///
/// Fails with [`FormatError::TruncatedRun`] when the input has odd size.
///
/// [`FormatError::TruncatedRun`]: krunch_core::error::FormatError::TruncatedRun
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    if input.len() % 2 != 0 {
        return Err(KrunchError::truncated_run(input.len() as u64));
    }

    let mut output = Vec::with_capacity(input.len());
    for pair in input.chunks_exact(2) {
        let (count, byte) = (pair[0], pair[1]);
        output.extend(std::iter::repeat_n(byte, count as usize));
    }

    Ok(output)
}

/// The RLE codec as a whole-file operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RleCodec;

impl FileCodec for RleCodec {
    fn name(&self) -> &'static str {
        "Run-Length Encoding"
    }

    fn extension(&self) -> &'static str {
        "rle"
    }

    fn compress(&self, input: &Path, output: &Path) -> Result<()> {
        let data = fs::read(input)?;
        fs::write(output, compress(&data))?;
        Ok(())
    }

    fn decompress(&self, input: &Path, output: &Path) -> Result<()> {
        let data = fs::read(input)?;
        fs::write(output, decompress(&data)?)?;
        Ok(())
    }

    fn is_valid(&self, path: &Path) -> bool {
        // An empty file is the legal compression of empty input.
        fsio::file_exists(path) && fsio::file_size(path) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krunch_core::error::FormatError;

    #[test]
    fn test_empty_input() {
        let compressed = compress(b"");
        assert!(compressed.is_empty());
        assert_eq!(decompress(&compressed).unwrap(), b"");
    }

    #[test]
    fn test_simple_runs() {
        let compressed = compress(b"aaabbbccc");
        assert_eq!(compressed, [0x03, 0x61, 0x03, 0x62, 0x03, 0x63]);
        assert_eq!(decompress(&compressed).unwrap(), b"aaabbbccc");
    }

    #[test]
    fn test_run_split_at_255() {
        let original = vec![b'a'; 318];
        let compressed = compress(&original);
        assert_eq!(compressed, [0xFF, 0x61, 0x3F, 0x61]);
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_exactly_255() {
        let original = vec![0u8; 255];
        let compressed = compress(&original);
        assert_eq!(compressed, [0xFF, 0x00]);
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_no_runs() {
        let original = b"abcdef";
        let compressed = compress(original);
        // Worst case: every byte becomes its own pair.
        assert_eq!(compressed.len(), original.len() * 2);
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_single_byte() {
        let compressed = compress(b"x");
        assert_eq!(compressed, [0x01, b'x']);
        assert_eq!(decompress(&compressed).unwrap(), b"x");
    }

    #[test]
    fn test_size_bounds() {
        let original = b"aabbbbcdddddddddddddddddddddddddddddddde";
        let runs = 5;
        let compressed = compress(original);
        assert!(compressed.len() <= 2 * original.len());
        assert_eq!(compressed.len(), 2 * runs);
    }

    #[test]
    fn test_odd_size_rejected() {
        let err = decompress(&[0x03, 0x61, 0x03]).unwrap_err();
        assert!(matches!(
            err,
            KrunchError::Format(FormatError::TruncatedRun { size: 3 })
        ));
    }

    #[test]
    fn test_zero_count_pair_expands_to_nothing() {
        // The compressor never writes a zero count, but the decoder treats
        // one as an empty run rather than failing.
        assert_eq!(decompress(&[0x00, 0x41]).unwrap(), b"");
    }

    #[test]
    fn test_deterministic() {
        let original = b"the same input twice";
        assert_eq!(compress(original), compress(original));
    }
}
