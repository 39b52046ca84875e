//! The shared contract implemented by every codec.

use crate::error::Result;
use std::path::Path;

/// Whole-file compression operations over filesystem paths.
///
/// All three codecs expose the same three operations. Each call reads one
/// input file, writes one output file, and releases both handles on every
/// exit path; on error any partially written output is left on disk for the
/// caller to dispose of.
pub trait FileCodec {
    /// Human-readable algorithm name.
    fn name(&self) -> &'static str;

    /// Conventional file extension for compressed output, without the dot.
    fn extension(&self) -> &'static str;

    /// Compress `input` into `output`.
    fn compress(&self, input: &Path, output: &Path) -> Result<()>;

    /// Decompress `input` into `output`.
    fn decompress(&self, input: &Path, output: &Path) -> Result<()>;

    /// Cheap structural sanity check; never attempts to decode.
    fn is_valid(&self, path: &Path) -> bool;
}
